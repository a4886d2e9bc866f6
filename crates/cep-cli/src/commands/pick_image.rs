//! Pick-image command implementation.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::cli::PickImageArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, Report};

/// The picked image, if any.
#[derive(Debug, Serialize)]
pub struct PickReport {
    /// Image path
    pub image: Option<PathBuf>,
}

impl Report for PickReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["Image"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.image
            .iter()
            .map(|p| vec![p.display().to_string()])
            .collect()
    }

    fn quiet(&self) -> Vec<String> {
        self.image.iter().map(|p| p.display().to_string()).collect()
    }

    fn empty_message(&self) -> &'static str {
        "No image found."
    }
}

/// Execute the pick-image command.
pub fn execute_pick_image(args: PickImageArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let resolver = super::build_resolver(config)?;
    let org = args.org.org_path();
    let title = args.title.as_deref();

    let image = match args.seed {
        Some(seed) => resolver.resolve_image_with(&mut StdRng::seed_from_u64(seed), args.category, &org, title),
        None => resolver.resolve_image(args.category, &org, title),
    };

    println!("{}", formatter.render(&PickReport { image })?);
    Ok(())
}

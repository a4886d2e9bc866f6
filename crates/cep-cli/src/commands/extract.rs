//! Extract command implementation.

use std::path::PathBuf;

use cep_extractor::ExtractedRecord;
use serde::Serialize;

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{preview, Formatter, Report};

/// Text pulled from one folder.
#[derive(Debug, Serialize)]
pub struct ExtractReport {
    /// Inspected folder
    pub folder: PathBuf,
    /// File the text came from
    pub source: Option<PathBuf>,
    /// Character count
    pub chars: usize,
    /// Extracted text
    pub text: String,
}

impl ExtractReport {
    /// Wrap an extraction result.
    pub fn new(folder: PathBuf, record: ExtractedRecord) -> Self {
        Self {
            folder,
            source: record.source,
            chars: record.text.chars().count(),
            text: record.text,
        }
    }
}

impl Report for ExtractReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["Source", "Chars", "Text"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        match &self.source {
            Some(source) => vec![vec![
                source.display().to_string(),
                self.chars.to_string(),
                preview(&self.text, 60),
            ]],
            None => Vec::new(),
        }
    }

    fn quiet(&self) -> Vec<String> {
        if self.text.is_empty() {
            Vec::new()
        } else {
            vec![self.text.clone()]
        }
    }

    fn empty_message(&self) -> &'static str {
        "No usable record found."
    }
}

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let config = config.clone();
    let folder = args.folder;
    let no_vision = args.no_vision;

    let report = tokio::task::spawn_blocking(move || -> Result<ExtractReport> {
        let extractor = super::build_extractor(&config, no_vision)?;
        let record = extractor.extract_first(&folder);
        Ok(ExtractReport::new(folder, record))
    })
    .await
    .map_err(|e| CliError::Worker(e.to_string()))??;

    println!("{}", formatter.render(&report)?);
    Ok(())
}

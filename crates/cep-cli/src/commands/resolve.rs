//! Resolve command implementation.

use std::path::PathBuf;

use cep_domain::{Category, OrgPath};
use cep_resolver::{Evidence, ResourceResolver};
use serde::Serialize;

use crate::cli::ResolveArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, Report};

/// Where a category's evidence was found for an org.
#[derive(Debug, Serialize)]
pub struct ResolveReport {
    /// Category slug
    pub category: String,
    /// `institution/cohort/section`
    pub org: String,
    /// `package` or `file`
    pub kind: Option<&'static str>,
    /// Resolved path
    pub path: Option<PathBuf>,
    /// Folders tried, most specific first
    pub tried: Vec<PathBuf>,
    /// Nothing found and the category must not fall back
    pub blocked: bool,
}

impl Report for ResolveReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["Category", "Org", "Kind", "Path"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let (kind, path) = match (&self.kind, &self.path) {
            (Some(kind), Some(path)) => (kind.to_string(), path.display().to_string()),
            _ if self.blocked => ("blocked".to_string(), tried_list(&self.tried)),
            _ => ("missing".to_string(), tried_list(&self.tried)),
        };
        vec![vec![self.category.clone(), self.org.clone(), kind, path]]
    }

    fn quiet(&self) -> Vec<String> {
        self.path.iter().map(|p| p.display().to_string()).collect()
    }
}

fn tried_list(tried: &[PathBuf]) -> String {
    tried
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolve one category for one org.
pub fn resolve_evidence(
    resolver: &ResourceResolver,
    category: Category,
    org: &OrgPath,
    title: Option<&str>,
) -> ResolveReport {
    let evidence = resolver.resolve(category, org, title);
    let kind = evidence.as_ref().map(|e| match e {
        Evidence::Package(_) => "package",
        Evidence::File(_) => "file",
    });

    ResolveReport {
        category: category.slug().to_string(),
        org: org.to_string(),
        kind,
        blocked: evidence.is_none() && category.scope().blocks_when_missing(),
        path: evidence.map(|e| e.path().to_path_buf()),
        tried: resolver.candidates(category, org),
    }
}

/// Execute the resolve command.
pub fn execute_resolve(args: ResolveArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let resolver = super::build_resolver(config)?;
    let org = args.org.org_path();
    let report = resolve_evidence(&resolver, args.category, &org, args.title.as_deref());
    println!("{}", formatter.render(&report)?);
    Ok(())
}

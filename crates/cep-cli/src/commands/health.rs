//! Health command implementation.

use std::collections::BTreeMap;

use cep_domain::OrgPath;
use cep_resolver::ResourceResolver;
use serde::Serialize;

use crate::cli::HealthArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{Formatter, Report};
use crate::tasks::load_accounts;

/// Evidence readiness, one row per distinct org.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// Rows in org order
    pub orgs: Vec<OrgHealth>,
}

/// Readiness of one org.
#[derive(Debug, Serialize)]
pub struct OrgHealth {
    /// `institution/cohort/section`
    pub org: String,
    /// Accounts sharing this org
    pub accounts: Vec<String>,
    /// Labor evidence resolves
    pub labor: bool,
    /// Military evidence resolves
    pub military: bool,
    /// Public speech evidence resolves
    pub public_speech: bool,
    /// Some theme-session package has images
    pub theme_session_images: bool,
    /// Some theme-session package has a record
    pub theme_session_records: bool,
    /// Folders tried for each missing category
    pub missing: Vec<String>,
}

impl OrgHealth {
    /// Whether everything is in place.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.theme_session_images && self.theme_session_records
    }
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}

impl Report for HealthReport {
    fn headers(&self) -> Vec<&'static str> {
        vec![
            "Org",
            "Accounts",
            "Labor",
            "Military",
            "Speech",
            "Session images",
            "Session records",
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.orgs
            .iter()
            .map(|h| {
                vec![
                    h.org.clone(),
                    h.accounts.len().to_string(),
                    yes_no(h.labor),
                    yes_no(h.military),
                    yes_no(h.public_speech),
                    yes_no(h.theme_session_images),
                    yes_no(h.theme_session_records),
                ]
            })
            .collect()
    }

    fn quiet(&self) -> Vec<String> {
        self.orgs
            .iter()
            .filter(|h| !h.is_complete())
            .map(|h| h.org.clone())
            .collect()
    }

    fn empty_message(&self) -> &'static str {
        "No accounts."
    }
}

/// Check every distinct org once.
///
/// Accounts are grouped by org path; each group is inspected once.
pub fn check_health(resolver: &ResourceResolver, accounts: &[(String, OrgPath)]) -> HealthReport {
    let mut groups: BTreeMap<&OrgPath, Vec<String>> = BTreeMap::new();
    for (name, org) in accounts {
        groups.entry(org).or_default().push(name.clone());
    }

    let orgs = groups
        .into_iter()
        .map(|(org, names)| {
            let health = resolver.health(org);
            OrgHealth {
                org: org.to_string(),
                accounts: names,
                labor: health.labor,
                military: health.military,
                public_speech: health.public_speech,
                theme_session_images: health.theme_session_images,
                theme_session_records: health.theme_session_records,
                missing: resolver.audit(org).iter().map(|m| m.to_string()).collect(),
            }
        })
        .collect();

    HealthReport { orgs }
}

/// Execute the health command.
pub fn execute_health(args: HealthArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let resolver = super::build_resolver(config)?;

    let accounts: Vec<(String, OrgPath)> = match (&args.accounts, &args.institution, &args.cohort, &args.section) {
        (Some(path), _, _, _) => load_accounts(path)?
            .into_iter()
            .map(|a| {
                let org = a.org_path();
                (a.username, org)
            })
            .collect(),
        (None, Some(institution), Some(cohort), Some(section)) => {
            vec![("-".to_string(), OrgPath::new(institution, cohort, section))]
        }
        _ => {
            return Err(CliError::InvalidInput(
                "Give --accounts or all of --institution, --cohort and --section".to_string(),
            ))
        }
    };

    let report = check_health(&resolver, &accounts);
    println!("{}", formatter.render(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cep_resolver::LayoutConfig;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_groups_accounts_by_org() {
        let dir = TempDir::new().unwrap();
        let speech = dir.path().join("国旗下讲话").join("福清一中").join("默认");
        fs::create_dir_all(&speech).unwrap();
        fs::write(speech.join("a.jpg"), b"jpg").unwrap();

        let resolver = ResourceResolver::new(LayoutConfig::with_root(dir.path())).unwrap();
        let accounts = vec![
            ("s01".to_string(), OrgPath::new("福清一中", "高一", "高一八班")),
            ("s02".to_string(), OrgPath::new("福清一中", "高一", "八班")),
            ("s03".to_string(), OrgPath::new("福清一中", "高一", "九班")),
        ];

        let report = check_health(&resolver, &accounts);
        assert_eq!(report.orgs.len(), 2);
        let eighth = report
            .orgs
            .iter()
            .find(|h| h.org == "福清一中/高一/八班")
            .unwrap();
        assert_eq!(eighth.accounts, vec!["s01", "s02"]);
        assert!(report.orgs.iter().all(|h| h.public_speech));
        assert!(report.orgs.iter().all(|h| !h.labor));
        assert_eq!(eighth.missing.len(), 3);
        assert_eq!(report.quiet().len(), 2);
    }
}

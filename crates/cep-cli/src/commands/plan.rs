//! Plan command implementation.
//!
//! One blocking worker per account. Workers share nothing but the
//! extraction cache, so a record read for one section is reused by every
//! other account of the same institution asking for the same title.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use cep_classifier::{apply_scope, select, Classifier, Scope, Selection};
use cep_domain::{Category, VisionDescriber, WorkItem};
use cep_extractor::{EvidenceService, SharedExtractionCache};
use cep_resolver::ResourceResolver;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::PlanArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{Formatter, Report};
use crate::tasks::{load_accounts, load_task_list, Account};

/// What will happen to one work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanStatus {
    /// Evidence found
    Ready,
    /// Section-exclusive evidence missing; the item must not be submitted
    Blocked,
    /// No evidence; the generic path applies
    NoEvidence,
    /// Not a special category
    Generic,
}

impl PlanStatus {
    fn label(&self) -> &'static str {
        match self {
            PlanStatus::Ready => "ready",
            PlanStatus::Blocked => "blocked",
            PlanStatus::NoEvidence => "no evidence",
            PlanStatus::Generic => "generic",
        }
    }
}

/// Plan for one work item.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    /// Account the item belongs to
    pub account: String,
    /// Position in the account's task list
    pub index: usize,
    /// Work item title
    pub title: String,
    /// Primary category slug, if special
    pub category: Option<&'static str>,
    /// Outcome
    pub status: PlanStatus,
    /// Resolved evidence path
    pub evidence: Option<PathBuf>,
    /// Image that would be attached
    pub image: Option<PathBuf>,
    /// Record file the text came from (absent when reused from the cache)
    pub record_source: Option<PathBuf>,
    /// Record text length in characters
    pub record_chars: usize,
    /// Record text was reused from another worker
    pub from_cache: bool,
}

/// Plan for every account.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    /// Entries, account by account in input order
    pub entries: Vec<PlanEntry>,
    /// Records actually read
    pub extractions: usize,
    /// Records reused
    pub cache_hits: usize,
}

impl Report for PlanReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["Account", "#", "Title", "Category", "Status", "Evidence", "Record"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.entries
            .iter()
            .map(|e| {
                let record = match (e.record_chars, e.from_cache) {
                    (0, _) => "-".to_string(),
                    (n, true) => format!("{} chars (cached)", n),
                    (n, false) => format!("{} chars", n),
                };
                vec![
                    e.account.clone(),
                    e.index.to_string(),
                    e.title.clone(),
                    e.category.unwrap_or("-").to_string(),
                    e.status.label().to_string(),
                    e.evidence
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    record,
                ]
            })
            .collect()
    }

    fn quiet(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.status == PlanStatus::Blocked)
            .map(|e| format!("{}\t{}\t{}", e.account, e.index, e.title))
            .collect()
    }

    fn empty_message(&self) -> &'static str {
        "Nothing to plan."
    }
}

/// Plan the selected items of one account.
pub fn plan_account<V: VisionDescriber>(
    account: &Account,
    items: &[WorkItem],
    scope: Scope,
    selection: &Selection,
    classifier: &Classifier,
    resolver: &ResourceResolver,
    service: &EvidenceService<V>,
) -> Vec<PlanEntry> {
    let org = account.org_path();
    let scoped = apply_scope(items, scope);
    info!(
        account = %account.username,
        org = %org,
        pending = scoped.pending,
        done = scoped.done,
        "Planning account"
    );

    let in_scope: BTreeSet<usize> = scoped.items.iter().map(|(i, _)| *i).collect();
    let known_folders = resolver.known_folders(Category::ThemeSession, &org);

    select(items, selection, classifier, &known_folders)
        .into_iter()
        .filter(|(index, _)| in_scope.contains(index))
        .map(|(index, item)| {
            let mut entry = PlanEntry {
                account: account.username.clone(),
                index,
                title: item.title.clone(),
                category: None,
                status: PlanStatus::Generic,
                evidence: None,
                image: None,
                record_source: None,
                record_chars: 0,
                from_cache: false,
            };

            let Some(category) = classifier.classify_item(item, &known_folders).primary() else {
                return entry;
            };
            entry.category = Some(category.slug());

            let Some(evidence) = resolver.resolve(category, &org, Some(&item.title)) else {
                entry.status = if category.scope().blocks_when_missing() {
                    warn!(account = %account.username, title = %item.title, "Blocked: no section evidence");
                    PlanStatus::Blocked
                } else {
                    PlanStatus::NoEvidence
                };
                return entry;
            };

            entry.status = PlanStatus::Ready;
            entry.image = evidence.pick_image();
            if category == Category::ThemeSession {
                let record = service.extract_record_text(org.institution(), &item.title, evidence.folder());
                entry.record_chars = record.text.chars().count();
                entry.record_source = record.source;
                entry.from_cache = record.from_cache;
            }
            entry.evidence = Some(evidence.path().to_path_buf());
            entry
        })
        .collect()
}

/// Execute the plan command.
pub async fn execute_plan(args: PlanArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let accounts = load_accounts(&args.accounts)?;
    let classifier = Arc::new(super::build_classifier(config)?);
    let resolver = Arc::new(super::build_resolver(config)?);
    let cache = SharedExtractionCache::shared();

    let mut handles = Vec::with_capacity(accounts.len());
    for account in accounts {
        let task_path = account
            .tasks
            .clone()
            .or_else(|| args.tasks.clone())
            .ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "Account {} has no task list and no --tasks was given",
                    account.username
                ))
            })?;

        let config = config.clone();
        let classifier = Arc::clone(&classifier);
        let resolver = Arc::clone(&resolver);
        let cache = Arc::clone(&cache);
        let selection = args.select.clone();
        let scope = args.scope;
        let no_vision = args.no_vision;

        handles.push(tokio::task::spawn_blocking(move || -> Result<Vec<PlanEntry>> {
            let items = load_task_list(&task_path)?;
            let service = EvidenceService::new(cache, super::build_extractor(&config, no_vision)?);
            Ok(plan_account(
                &account,
                &items,
                scope,
                &selection,
                &classifier,
                &resolver,
                &service,
            ))
        }));
    }

    let mut entries = Vec::new();
    for handle in handles {
        let account_entries = handle.await.map_err(|e| CliError::Worker(e.to_string()))??;
        entries.extend(account_entries);
    }

    let stats = cache.stats();
    let report = PlanReport {
        entries,
        extractions: stats.computes,
        cache_hits: stats.hits,
    };

    println!("{}", formatter.render(&report)?);
    if formatter.is_table() {
        println!(
            "{}",
            formatter.success(&format!(
                "{} record(s) read, {} reused",
                report.extractions, report.cache_hits
            ))
        );
        let blocked = report
            .entries
            .iter()
            .filter(|e| e.status == PlanStatus::Blocked)
            .count();
        if blocked > 0 {
            println!(
                "{}",
                formatter.warning(&format!("{} item(s) blocked: missing section evidence", blocked))
            );
        }
    }
    Ok(())
}

//! Planning across accounts that share an institution

use std::fs;
use std::path::Path;

use cep_classifier::{Classifier, ClassifierConfig, Scope, Selection};
use cep_domain::Category;
use cep_cli::commands::plan::{plan_account, PlanReport, PlanStatus};
use cep_cli::output::Report;
use cep_cli::tasks::{parse_task_list, Account};
use cep_extractor::{EvidenceService, ExtractorConfig, RecordExtractor, SharedExtractionCache};
use cep_resolver::{LayoutConfig, ResourceResolver};
use tempfile::TempDir;

const TASKS: &str = r#"[
    {"id": 1, "name": "2025.9.8 高一(8)班《消防安全》主题班会", "dimensionName": "主题班会", "circleTaskStatus": "未提交"},
    {"id": 2, "name": "校园劳动实践", "dimensionName": "劳动教育", "circleTaskStatus": "未提交"},
    {"id": 3, "name": "期中考试", "dimensionName": "学业", "circleTaskStatus": "未提交"},
    {"id": 4, "name": "2025.9.1《开学第一课》主题班会", "dimensionName": "主题班会", "circleTaskStatus": "已提交"}
]"#;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn evidence_tree(root: &Path) {
    let school = root.join("主题班会").join("福清一中").join("高一");
    write(&school.join("八班").join("2025.9.8 消防安全").join("记录.txt"), "八班记录");
    write(&school.join("八班").join("2025.9.8 消防安全").join("a.jpg"), "jpg");
    write(&school.join("九班").join("2025.9.8 消防安全").join("记录.txt"), "九班记录");
    write(&school.join("九班").join("2025.9.8 消防安全").join("b.jpg"), "jpg");
    write(&root.join("劳动").join("福清一中").join("默认").join("labor.jpg"), "jpg");
}

fn account(username: &str, section: &str) -> Account {
    Account {
        username: username.to_string(),
        institution: "福清一中".to_string(),
        cohort: "高一".to_string(),
        section: section.to_string(),
        tasks: None,
    }
}

#[test]
fn test_plan_shares_records_and_blocks_missing_sections() {
    let root = TempDir::new().unwrap();
    evidence_tree(root.path());

    let items = parse_task_list(TASKS).unwrap();
    let classifier = Classifier::new(ClassifierConfig::default()).unwrap();
    let resolver = ResourceResolver::new(LayoutConfig::with_root(root.path())).unwrap();
    let cache = SharedExtractionCache::shared();
    let service = EvidenceService::new(
        cache.clone(),
        RecordExtractor::without_vision(ExtractorConfig::default()).unwrap(),
    );

    let plan = |acc: &Account| {
        plan_account(acc, &items, Scope::Pending, &Selection::Special, &classifier, &resolver, &service)
    };

    let eighth = plan(&account("s01", "高一八班"));
    assert_eq!(eighth.len(), 2);
    assert_eq!(eighth[0].index, 0);
    assert_eq!(eighth[0].category, Some("theme-session"));
    assert_eq!(eighth[0].status, PlanStatus::Ready);
    assert_eq!(eighth[0].record_chars, 4);
    assert!(!eighth[0].from_cache);
    assert!(eighth[0].record_source.as_ref().unwrap().ends_with("记录.txt"));
    assert!(eighth[0].evidence.as_ref().unwrap().ends_with("2025.9.8 消防安全"));
    assert!(eighth[0].image.as_ref().unwrap().ends_with("a.jpg"));

    assert_eq!(eighth[1].index, 1);
    assert_eq!(eighth[1].category, Some("labor"));
    assert_eq!(eighth[1].status, PlanStatus::Ready);
    assert!(eighth[1].image.as_ref().unwrap().ends_with("labor.jpg"));
    assert_eq!(eighth[1].record_chars, 0);

    let ninth = plan(&account("s02", "九班"));
    assert_eq!(ninth[0].status, PlanStatus::Ready);
    assert!(ninth[0].from_cache);
    assert!(ninth[0].image.as_ref().unwrap().ends_with("b.jpg"));
    assert_eq!(cache.get("福清一中_消防安全").as_deref(), Some("八班记录"));

    let tenth = plan(&account("s03", "十班"));
    assert_eq!(tenth[0].status, PlanStatus::Blocked);
    assert!(tenth[0].evidence.is_none());
    assert_eq!(tenth[1].status, PlanStatus::Ready);

    assert_eq!(cache.stats().computes, 1);

    let mut entries = eighth;
    entries.extend(ninth);
    entries.extend(tenth);
    let report = PlanReport {
        entries,
        extractions: 1,
        cache_hits: 1,
    };
    assert_eq!(report.rows().len(), 6);
    assert_eq!(report.quiet().len(), 1);
}

#[test]
fn test_plan_indices_respect_scope() {
    let root = TempDir::new().unwrap();
    evidence_tree(root.path());

    let items = parse_task_list(TASKS).unwrap();
    let classifier = Classifier::new(ClassifierConfig::default()).unwrap();
    let resolver = ResourceResolver::new(LayoutConfig::with_root(root.path())).unwrap();
    let service = EvidenceService::new(
        SharedExtractionCache::shared(),
        RecordExtractor::without_vision(ExtractorConfig::default()).unwrap(),
    );

    let entries = plan_account(
        &account("s01", "八班"),
        &items,
        Scope::Pending,
        &Selection::Indices(vec![2, 3, 9]),
        &classifier,
        &resolver,
        &service,
    );

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].index, 2);
    assert_eq!(entries[0].status, PlanStatus::Generic);
    assert_eq!(entries[0].category, None);
}

#[test]
fn test_labor_evidence_wins_over_theme_session() {
    let root = TempDir::new().unwrap();
    evidence_tree(root.path());

    let items = parse_task_list(
        r#"[{"id": 7, "name": "高一(8)班教室大扫除", "dimensionName": "思想品德", "circleTaskStatus": "未提交"}]"#,
    )
    .unwrap();
    let classifier = Classifier::new(ClassifierConfig::default()).unwrap();
    let resolver = ResourceResolver::new(LayoutConfig::with_root(root.path())).unwrap();
    let service = EvidenceService::new(
        SharedExtractionCache::shared(),
        RecordExtractor::without_vision(ExtractorConfig::default()).unwrap(),
    );

    let eighth = account("s01", "八班");
    let known = resolver.known_folders(Category::ThemeSession, &eighth.org_path());
    let classification = classifier.classify_item(&items[0], &known);
    assert!(classification.contains(Category::ThemeSession));
    assert!(classification.contains(Category::Labor));

    let entries = plan_account(
        &eighth,
        &items,
        Scope::Pending,
        &Selection::Special,
        &classifier,
        &resolver,
        &service,
    );

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].category, Some("labor"));
    assert_eq!(entries[0].status, PlanStatus::Ready);
    assert!(entries[0].image.as_ref().unwrap().ends_with("labor.jpg"));
    assert_eq!(entries[0].record_chars, 0);
}

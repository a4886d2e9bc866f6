//! Task lists and account files.
//!
//! A task list is the platform's JSON array of work items:
//!
//! ```json
//! [{"id": 17, "name": "2025.9.8《消防安全》", "dimensionName": "主题班会", "circleTaskStatus": "未提交"}]
//! ```
//!
//! An accounts file lists who is processed and where their evidence lives:
//!
//! ```json
//! [{"username": "s01", "institution": "福清一中", "cohort": "高一", "section": "高一八班", "tasks": "s01.json"}]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use cep_domain::{OrgPath, WorkItem, WorkStatus};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{CliError, Result};

/// Turn the platform's task records into work items.
///
/// Records without a usable name are skipped with a warning.
pub fn parse_task_list(json: &str) -> Result<Vec<WorkItem>> {
    let records: Vec<Value> = serde_json::from_str(json)?;
    let mut items = Vec::with_capacity(records.len());

    for (position, record) in records.iter().enumerate() {
        let name = text_field(record, &["name"]);
        let id = text_field(record, &["id", "taskId"]);
        let hint = text_field(record, &["dimensionName"]);
        let status = WorkStatus::from_platform(&text_field(
            record,
            &["circleTaskStatus", "checkResult", "status"],
        ));

        match WorkItem::new(id, name, hint, status) {
            Ok(item) => items.push(item),
            Err(e) => warn!(position, error = %e, "Skipping task record"),
        }
    }

    Ok(items)
}

/// Read and parse a task list file.
pub fn load_task_list(path: &Path) -> Result<Vec<WorkItem>> {
    let json = fs::read_to_string(path)
        .map_err(|e| CliError::InvalidInput(format!("Cannot read task list {}: {}", path.display(), e)))?;
    parse_task_list(&json)
}

fn text_field(record: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

/// One account to process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    /// Login name, used only for display
    pub username: String,

    /// Institution (school) name
    #[serde(alias = "schoolName")]
    pub institution: String,

    /// Cohort (grade) name
    #[serde(alias = "gradeName")]
    pub cohort: String,

    /// Section (class) name
    #[serde(alias = "className")]
    pub section: String,

    /// The account's own task list, relative to the accounts file
    #[serde(default)]
    pub tasks: Option<PathBuf>,
}

impl Account {
    /// Sanitized org path.
    pub fn org_path(&self) -> OrgPath {
        OrgPath::new(&self.institution, &self.cohort, &self.section)
    }
}

/// Read an accounts file, resolving task paths against its directory.
pub fn load_accounts(path: &Path) -> Result<Vec<Account>> {
    let json = fs::read_to_string(path)
        .map_err(|e| CliError::InvalidInput(format!("Cannot read accounts {}: {}", path.display(), e)))?;
    let mut accounts: Vec<Account> = serde_json::from_str(&json)?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for account in &mut accounts {
        if let Some(tasks) = account.tasks.take() {
            account.tasks = Some(if tasks.is_absolute() { tasks } else { base.join(tasks) });
        }
    }
    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_task_list() {
        let items = parse_task_list(
            r#"[
                {"id": 17, "name": "2025.9.8《消防安全》", "dimensionName": "主题班会", "circleTaskStatus": "未提交"},
                {"id": "18", "name": "校园劳动", "dimensionName": "劳动教育", "status": "已完成"},
                {"id": 19, "name": "   "},
                {"id": 20, "name": "国旗下讲话", "checkResult": "待写实"}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, "17");
        assert_eq!(items[0].category_hint, "主题班会");
        assert!(items[0].is_pending());
        assert!(!items[1].is_pending());
        assert!(items[2].is_pending());
    }

    #[test]
    fn test_not_a_list() {
        assert!(parse_task_list(r#"{"name": "x"}"#).is_err());
    }

    #[test]
    fn test_load_accounts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("accounts.json");
        fs::write(
            &path,
            r#"[
                {"username": "s01", "schoolName": "福清一中", "gradeName": "高一", "className": "高一八班", "tasks": "s01.json"},
                {"username": "s02", "institution": "福清一中", "cohort": "高一", "section": "九班"}
            ]"#,
        )
        .unwrap();

        let accounts = load_accounts(&path).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].org_path().to_string(), "福清一中/高一/八班");
        assert_eq!(accounts[0].tasks.as_deref(), Some(dir.path().join("s01.json").as_path()));
        assert_eq!(accounts[1].tasks, None);
    }
}

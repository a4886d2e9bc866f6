//! Choosing which work items to process

use std::collections::BTreeSet;
use std::str::FromStr;

use cep_domain::{Category, WorkItem, WorkStatus};

use crate::classifier::Classifier;

/// Which items a run should act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every item that matches any special category
    Special,
    /// Items matching one category
    Category(Category),
    /// Explicit zero-based positions in the task list
    Indices(Vec<usize>),
}

impl FromStr for Selection {
    type Err = String;

    /// `special`, a category slug, or a comma-separated index list (`0,3,5`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("special") {
            return Ok(Selection::Special);
        }
        if let Ok(category) = s.parse::<Category>() {
            return Ok(Selection::Category(category));
        }
        s.split(',')
            .map(|part| part.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map(Selection::Indices)
            .map_err(|_| format!("Invalid selection: {}", s))
    }
}

/// Status filter applied before selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Only items still waiting for a submission
    #[default]
    Pending,
    /// Only items already submitted
    Done,
    /// Everything
    All,
}

impl Scope {
    fn admits(&self, status: WorkStatus) -> bool {
        match self {
            Scope::Pending => status == WorkStatus::Pending,
            Scope::Done => status == WorkStatus::Done,
            Scope::All => true,
        }
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Scope::Pending),
            "done" => Ok(Scope::Done),
            "all" => Ok(Scope::All),
            other => Err(format!("Unknown scope: {}", other)),
        }
    }
}

/// Items admitted by a scope, with status counts over the whole list
#[derive(Debug, Clone)]
pub struct ScopedItems<'a> {
    /// Admitted items with their original positions
    pub items: Vec<(usize, &'a WorkItem)>,
    /// Pending items in the whole list
    pub pending: usize,
    /// Done items in the whole list
    pub done: usize,
}

/// Filter a task list by status
pub fn apply_scope(items: &[WorkItem], scope: Scope) -> ScopedItems<'_> {
    let pending = items.iter().filter(|i| i.is_pending()).count();
    ScopedItems {
        items: items
            .iter()
            .enumerate()
            .filter(|(_, item)| scope.admits(item.status))
            .collect(),
        pending,
        done: items.len() - pending,
    }
}

/// Pick items from a task list, keeping input order
///
/// Out-of-range indices are ignored; duplicates collapse.
pub fn select<'a, S: AsRef<str>>(
    items: &'a [WorkItem],
    selection: &Selection,
    classifier: &Classifier,
    known_folders: &[S],
) -> Vec<(usize, &'a WorkItem)> {
    match selection {
        Selection::Special => items
            .iter()
            .enumerate()
            .filter(|(_, item)| classifier.classify_item(item, known_folders).is_special())
            .collect(),
        Selection::Category(category) => items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                classifier.is_category(*category, &item.title, &item.category_hint, known_folders)
            })
            .collect(),
        Selection::Indices(indices) => indices
            .iter()
            .copied()
            .filter(|i| *i < items.len())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|i| (i, &items[i]))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClassifierConfig, NO_FOLDERS};

    fn item(id: &str, title: &str, hint: &str, status: WorkStatus) -> WorkItem {
        WorkItem::new(id, title, hint, status).unwrap()
    }

    fn sample() -> Vec<WorkItem> {
        vec![
            item("1", "《网络安全教育》", "思想品德", WorkStatus::Pending),
            item("2", "读书笔记", "其它", WorkStatus::Pending),
            item("3", "校园卫生大扫除", "劳动", WorkStatus::Done),
            item("4", "劳动素养自我评价", "劳动", WorkStatus::Pending),
        ]
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!("special".parse::<Selection>().unwrap(), Selection::Special);
        assert_eq!("labor".parse::<Selection>().unwrap(), Selection::Category(Category::Labor));
        assert_eq!("0, 2".parse::<Selection>().unwrap(), Selection::Indices(vec![0, 2]));
        assert!("x,1".parse::<Selection>().is_err());
    }

    #[test]
    fn test_scope_counts() {
        let items = sample();
        let scoped = apply_scope(&items, Scope::Pending);
        assert_eq!(scoped.items.len(), 3);
        assert_eq!(scoped.pending, 3);
        assert_eq!(scoped.done, 1);

        let done = apply_scope(&items, Scope::Done);
        assert_eq!(done.items[0].0, 2);
        assert_eq!(apply_scope(&items, Scope::All).items.len(), 4);
    }

    #[test]
    fn test_select_special_and_category() {
        let items = sample();
        let classifier = Classifier::new(ClassifierConfig::default()).unwrap();

        let special = select(&items, &Selection::Special, &classifier, NO_FOLDERS);
        let ids: Vec<_> = special.iter().map(|(_, i)| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        let labor = select(&items, &Selection::Category(Category::Labor), &classifier, NO_FOLDERS);
        assert_eq!(labor.len(), 1);
        assert_eq!(labor[0].0, 2);
    }

    #[test]
    fn test_select_indices() {
        let items = sample();
        let classifier = Classifier::new(ClassifierConfig::default()).unwrap();
        let picked = select(&items, &Selection::Indices(vec![3, 1, 3, 99]), &classifier, NO_FOLDERS);
        let positions: Vec<_> = picked.iter().map(|(i, _)| *i).collect();
        assert_eq!(positions, vec![1, 3]);
    }
}

//! Work items as seen by the core

use std::fmt;

/// Submission state of a work item on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkStatus {
    /// Not yet submitted
    Pending,
    /// Already submitted or completed
    Done,
}

/// Status labels the platform uses for items that still need a submission
const PENDING_MARKERS: [&str; 4] = ["未提交", "待写实", "待完成", "pending"];

impl WorkStatus {
    /// Map a free-text platform status label onto a status
    ///
    /// Anything that does not carry a pending marker counts as done, which
    /// matches how the platform reports reviewed, submitted and checked items.
    pub fn from_platform(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        if PENDING_MARKERS.iter().any(|m| label.contains(m)) {
            WorkStatus::Pending
        } else {
            WorkStatus::Done
        }
    }

    /// Whether the item still needs a submission
    pub fn is_pending(&self) -> bool {
        matches!(self, WorkStatus::Pending)
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkStatus::Pending => write!(f, "pending"),
            WorkStatus::Done => write!(f, "done"),
        }
    }
}

/// A unit of required activity pulled from the platform task list
///
/// Immutable for the duration of one processing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Platform identifier
    pub id: String,
    /// Free-text title
    pub title: String,
    /// Free-text dimension label the platform files the item under
    pub category_hint: String,
    /// Submission state
    pub status: WorkStatus,
}

impl WorkItem {
    /// Create a new work item
    ///
    /// # Errors
    /// Returns error if the title is blank
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category_hint: impl Into<String>,
        status: WorkStatus,
    ) -> Result<Self, String> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err("Work item title cannot be empty".to_string());
        }

        Ok(Self {
            id: id.into(),
            title,
            category_hint: category_hint.into(),
            status,
        })
    }

    /// Whether the item still needs a submission
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }
}

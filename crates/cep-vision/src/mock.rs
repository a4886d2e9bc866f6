//! Deterministic describer for tests

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use cep_domain::VisionDescriber;

use crate::VisionError;

/// Describer returning a canned answer without any network call
///
/// Clones share the call log.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use cep_domain::VisionDescriber;
/// use cep_vision::MockDescriber;
///
/// let describer = MockDescriber::new("活动记录");
/// let text = describer.describe(&[PathBuf::from("page-1.png")], "prompt").unwrap();
/// assert_eq!(text, "活动记录");
/// assert_eq!(describer.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockDescriber {
    answer: Result<String, String>,
    calls: Arc<Mutex<Vec<Vec<PathBuf>>>>,
}

impl MockDescriber {
    /// Describer that always answers `answer`
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: Ok(answer.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Describer that always fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            answer: Err(message.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of describe calls so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Image lists received, in call order
    pub fn calls(&self) -> Vec<Vec<PathBuf>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Forget recorded calls
    pub fn reset(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }
}

impl Default for MockDescriber {
    fn default() -> Self {
        Self::new("Default mock description")
    }
}

impl VisionDescriber for MockDescriber {
    type Error = VisionError;

    fn describe(&self, images: &[PathBuf], _prompt: &str) -> Result<String, Self::Error> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(images.to_vec());
        }
        self.answer.clone().map_err(VisionError::Other)
    }
}

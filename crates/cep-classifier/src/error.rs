//! Classifier error types

use thiserror::Error;

/// Errors that can occur while building a classifier
///
/// Classification itself never fails; an ambiguous title is simply not
/// matched. Only configuration problems surface here.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// A configured regular expression does not compile
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Configuration values are out of range
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<regex::Error> for ClassifierError {
    fn from(e: regex::Error) -> Self {
        ClassifierError::InvalidPattern(e.to_string())
    }
}

//! Resolver error types

use thiserror::Error;

/// Errors that can occur while inspecting the evidence tree
///
/// Missing evidence is not an error; resolution simply yields `None`.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Filesystem error while listing a folder
    #[error("IO error: {0}")]
    Io(String),

    /// Invalid layout configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for ResolverError {
    fn from(e: std::io::Error) -> Self {
        ResolverError::Io(e.to_string())
    }
}

impl From<walkdir::Error> for ResolverError {
    fn from(e: walkdir::Error) -> Self {
        ResolverError::Io(e.to_string())
    }
}

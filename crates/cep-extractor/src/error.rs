//! Error types for the extractor

use thiserror::Error;

/// Errors that can occur while reading one evidence file
///
/// `RecordExtractor::extract_first` never returns these; they are logged
/// and the next candidate file is tried.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Filesystem error
    #[error("IO error: {0}")]
    Io(String),

    /// Spreadsheet could not be read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Rich-text document could not be read
    #[error("Document error: {0}")]
    Document(String),

    /// External program failed or is missing
    #[error("External program `{program}` failed: {message}")]
    Program {
        /// Program name
        program: String,
        /// What went wrong
        message: String,
    },

    /// Vision describer failed or is absent
    #[error("Vision error: {0}")]
    Vision(String),

    /// File type has no parser
    #[error("Unsupported file: {0}")]
    Unsupported(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for ExtractorError {
    fn from(e: std::io::Error) -> Self {
        ExtractorError::Io(e.to_string())
    }
}

impl From<calamine::Error> for ExtractorError {
    fn from(e: calamine::Error) -> Self {
        ExtractorError::Spreadsheet(e.to_string())
    }
}

impl From<zip::result::ZipError> for ExtractorError {
    fn from(e: zip::result::ZipError) -> Self {
        ExtractorError::Document(e.to_string())
    }
}

impl From<quick_xml::Error> for ExtractorError {
    fn from(e: quick_xml::Error) -> Self {
        ExtractorError::Document(e.to_string())
    }
}

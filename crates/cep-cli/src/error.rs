//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Classifier setup error
    #[error("Classifier error: {0}")]
    Classifier(#[from] cep_classifier::ClassifierError),

    /// Resolver setup error
    #[error("Resolver error: {0}")]
    Resolver(#[from] cep_resolver::ResolverError),

    /// Extractor setup error
    #[error("Extractor error: {0}")]
    Extractor(#[from] cep_extractor::ExtractorError),

    /// Vision setup error
    #[error("Vision error: {0}")]
    Vision(#[from] cep_vision::VisionError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A background worker panicked or was cancelled
    #[error("Worker failed: {0}")]
    Worker(String),
}

//! Error types for vision describers

use thiserror::Error;

/// Errors that can occur while describing images
#[derive(Error, Debug)]
pub enum VisionError {
    /// No API key available
    #[error("Vision provider not configured: {0}")]
    NotConfigured(String),

    /// Network or HTTP client error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Provider answered with an error status or an unusable body
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Image could not be read
    #[error("IO error: {0}")]
    Io(String),

    /// No image was given
    #[error("No images to describe")]
    NoImages,

    /// Every configured model failed
    #[error("All models failed, last error: {0}")]
    AllModelsFailed(String),

    /// Mock failure
    #[error("Vision error: {0}")]
    Other(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for VisionError {
    fn from(e: std::io::Error) -> Self {
        VisionError::Io(e.to_string())
    }
}

impl From<reqwest::Error> for VisionError {
    fn from(e: reqwest::Error) -> Self {
        VisionError::Communication(e.to_string())
    }
}

impl From<serde_json::Error> for VisionError {
    fn from(e: serde_json::Error) -> Self {
        VisionError::InvalidResponse(e.to_string())
    }
}

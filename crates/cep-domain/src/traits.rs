//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the core and infrastructure.
//! Implementations live in other crates.

use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Capability that turns a set of images into descriptive text
///
/// Implemented by the infrastructure layer (cep-vision)
pub trait VisionDescriber: Send + Sync {
    /// Error type for describe operations
    type Error: Display;

    /// Describe the given images, guided by a prompt
    fn describe(&self, images: &[PathBuf], prompt: &str) -> Result<String, Self::Error>;
}

/// Parser for one document file into plain text
///
/// Implemented by the application layer (cep-extractor)
pub trait RecordParser: Send + Sync {
    /// Error type for parse operations
    type Error: Display;

    /// Whether this parser handles the given file
    fn accepts(&self, path: &Path) -> bool;

    /// Extract the text content of a file
    fn parse(&self, path: &Path) -> Result<String, Self::Error>;
}

impl<T: VisionDescriber + ?Sized> VisionDescriber for std::sync::Arc<T> {
    type Error = T::Error;

    fn describe(&self, images: &[PathBuf], prompt: &str) -> Result<String, Self::Error> {
        (**self).describe(images, prompt)
    }
}

//! CEP Domain Layer
//!
//! Core vocabulary for the evidence pipeline: work items pulled from the
//! evaluation platform, the special categories they can belong to, the
//! organizational path that scopes evidence folders, and the trait seams
//! for the capabilities the pipeline consumes but does not implement.
//!
//! ## Key Concepts
//!
//! - **Work item**: a unit of required activity (title + dimension hint + status)
//! - **Category**: a special activity class with its own evidence policy
//! - **OrgPath**: institution / cohort / section, sanitized for filesystem use
//! - **Date token**: an optional `month.day` pulled out of a title or folder name
//!
//! ## Architecture
//!
//! This crate has no third-party dependencies. Text heuristics live in
//! `cep-classifier`, filesystem policy in `cep-resolver`, parsing in
//! `cep-extractor`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod date;
pub mod format;
pub mod org;
pub mod traits;
pub mod work_item;

// Re-exports for convenience
pub use category::{Category, EvidenceScope};
pub use date::DateToken;
pub use format::{is_document, is_image, is_resource, FormatClass, IMAGE_EXTENSIONS};
pub use org::{sanitize_component, OrgPath};
pub use traits::{RecordParser, VisionDescriber};
pub use work_item::{WorkItem, WorkStatus};

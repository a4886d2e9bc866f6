//! Record text extraction for evidence folders
//!
//! Reads the first usable record document in a folder, trying formats in
//! priority order: spreadsheet, rich text, plain text, then PDF pages
//! described by a [`VisionDescriber`](cep_domain::VisionDescriber).
//! Results are memoized per institution and title in a
//! [`SharedExtractionCache`] that concurrent workers share.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use cep_extractor::{ExtractorConfig, RecordExtractor, SharedExtractionCache, EvidenceService};
//!
//! let extractor = RecordExtractor::without_vision(ExtractorConfig::default()).unwrap();
//! let service = EvidenceService::new(SharedExtractionCache::shared(), extractor);
//!
//! let record = service.extract_record_text(
//!     "福清一中",
//!     "2025.9.8《消防安全》",
//!     Path::new("assets/images/主题班会/福清一中/2025级/1班/消防安全"),
//! );
//! println!("{}", record.text);
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod extractor;
mod parser;
mod pdf;
mod service;

pub use cache::{CacheStats, SharedExtractionCache};
pub use config::{ExtractorConfig, DEFAULT_PAGE_PROMPT};
pub use error::ExtractorError;
pub use extractor::{ExtractedRecord, NoVision, RecordExtractor};
pub use parser::{DocxParser, LegacyDocParser, SpreadsheetParser, TextParser};
pub use pdf::{PageRenderer, RenderedPages};
pub use service::{CachedRecord, EvidenceService};

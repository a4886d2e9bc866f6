//! Cached record extraction shared across accounts

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cep_domain::VisionDescriber;
use tracing::debug;

use crate::cache::SharedExtractionCache;
use crate::extractor::RecordExtractor;

/// Record text for one work item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedRecord {
    /// Extracted text, empty when nothing usable was found
    pub text: String,
    /// File the text came from; `None` on a cache hit
    pub source: Option<PathBuf>,
    /// Whether the text was reused from an earlier extraction
    pub from_cache: bool,
}

/// Extraction front door for concurrent workers
///
/// Every worker gets a clone of the same cache handle, so a record read for
/// one account of an institution is reused by the others.
pub struct EvidenceService<V> {
    cache: Arc<SharedExtractionCache>,
    extractor: RecordExtractor<V>,
}

impl<V: VisionDescriber> EvidenceService<V> {
    /// Create a service over a shared cache
    pub fn new(cache: Arc<SharedExtractionCache>, extractor: RecordExtractor<V>) -> Self {
        Self { cache, extractor }
    }

    /// The shared cache
    pub fn cache(&self) -> &Arc<SharedExtractionCache> {
        &self.cache
    }

    /// The underlying extractor
    pub fn extractor(&self) -> &RecordExtractor<V> {
        &self.extractor
    }

    /// Record text for `title` at `institution`, read from `folder` at most once
    pub fn extract_record_text(&self, institution: &str, title: &str, folder: &Path) -> CachedRecord {
        let key = SharedExtractionCache::key(institution, title);
        let mut source = None;
        let mut computed = false;

        let text = self.cache.get_or_compute(&key, || {
            computed = true;
            let record = self.extractor.extract_first(folder);
            source = record.source;
            record.text
        });

        debug!(key = %key, from_cache = !computed, "Record text ready");
        CachedRecord {
            text,
            source,
            from_cache: !computed,
        }
    }
}

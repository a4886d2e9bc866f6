//! Process-wide memo of extracted record text

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use cep_classifier::normalized_key;
use tracing::debug;

type Slot = Arc<Mutex<Option<String>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Values are only written after a computation succeeds, so a poisoned
    // lock still guards consistent data.
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Hit/compute counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: usize,
    /// Compute closures actually run
    pub computes: usize,
}

/// First-writer-wins memo shared by every worker in the process
///
/// Each key has its own slot lock: a computation holds only its key's slot,
/// so other keys proceed while a second caller for the same key waits and
/// reuses the result. Entries never expire and are never overwritten.
/// Empty results are not stored.
#[derive(Debug, Default)]
pub struct SharedExtractionCache {
    slots: Mutex<HashMap<String, Slot>>,
    hits: AtomicUsize,
    computes: AtomicUsize,
}

impl SharedExtractionCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache ready to hand to several workers
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// `institution + "_" + normalized title key`
    pub fn key(institution: &str, title: &str) -> String {
        format!("{}_{}", institution, normalized_key(title))
    }

    /// Cached value for `key`, running `compute` on a miss
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> String
    where
        F: FnOnce() -> String,
    {
        let slot = {
            let mut slots = lock(&self.slots);
            Arc::clone(slots.entry(key.to_string()).or_default())
        };

        let mut value = lock(&slot);
        if let Some(cached) = value.as_ref() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key, "Extraction cache hit");
            return cached.clone();
        }

        self.computes.fetch_add(1, Ordering::Relaxed);
        let computed = compute();
        if !computed.is_empty() {
            *value = Some(computed.clone());
        }
        computed
    }

    /// Cached value, if any
    pub fn get(&self, key: &str) -> Option<String> {
        let slot = lock(&self.slots).get(key).cloned()?;
        let value = lock(&slot).clone();
        value
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = lock(&self.slots).values().cloned().collect();
        slots.iter().filter(|s| lock(s).is_some()).count()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counters since creation
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            computes: self.computes.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_uses_normalized_title() {
        assert_eq!(
            SharedExtractionCache::key("福清一中", "2025.9.8 高一(1)班《消防 安全》"),
            "福清一中_消防安全"
        );
        assert_eq!(SharedExtractionCache::key("A", "Fire Safety"), "A_firesafety");
    }

    #[test]
    fn test_compute_once() {
        let cache = SharedExtractionCache::new();
        assert_eq!(cache.get_or_compute("k", || "first".to_string()), "first");
        assert_eq!(cache.get_or_compute("k", || "second".to_string()), "first");
        assert_eq!(cache.get("k").as_deref(), Some("first"));
        assert_eq!(cache.stats(), CacheStats { hits: 1, computes: 1 });
    }

    #[test]
    fn test_empty_result_not_stored() {
        let cache = SharedExtractionCache::new();
        assert_eq!(cache.get_or_compute("k", String::new), "");
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_compute("k", || "late".to_string()), "late");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let cache = SharedExtractionCache::new();
        cache.get_or_compute("a", || "1".to_string());
        cache.get_or_compute("b", || "2".to_string());
        assert_eq!(cache.get("a").as_deref(), Some("1"));
        assert_eq!(cache.get("b").as_deref(), Some("2"));
        assert_eq!(cache.get("c"), None);
    }

    #[test]
    fn test_poisoned_slot_recovers() {
        let cache = Arc::new(SharedExtractionCache::new());
        let c = Arc::clone(&cache);
        let result = std::thread::spawn(move || {
            c.get_or_compute("k", || panic!("compute failed"));
        })
        .join();
        assert!(result.is_err());
        assert_eq!(cache.get_or_compute("k", || "ok".to_string()), "ok");
    }
}

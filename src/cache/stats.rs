//! Cache Statistics Module
//!
//! Tracks LRU cache activity: insertions, deletions, evictions, hits and misses.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of LRU cache counters and sizing.
///
/// The counters are maintained by the cache; `capacity`, `byte_size` and
/// `entry_count` are filled in when a snapshot is taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of new keys stored
    pub insertions: u64,
    /// Number of entries removed explicitly or by expiry on read
    pub deletions: u64,
    /// Number of entries evicted due to the LRU policy
    pub evictions: u64,
    /// Number of successful retrievals
    pub hits: u64,
    /// Number of retrievals of unknown keys
    pub misses: u64,
    /// Maximum number of entries
    pub capacity: usize,
    /// Sum of key and value byte lengths of live entries
    pub byte_size: usize,
    /// Current number of entries
    pub entry_count: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    pub fn record_deletion(&mut self) {
        self.deletions += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

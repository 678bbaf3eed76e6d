//! Cache Entry Module
//!
//! Defines the structure for individual LRU cache entries with expiry support.

use chrono::Utc;

use crate::cache::recency::Position;

// == Cache Entry ==
/// Represents a single LRU cache entry with value and metadata.
///
/// The key itself lives in the owning index and in the recency list node,
/// so the entry only carries what is needed to answer a lookup.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Absolute expiration time (Unix seconds), None = no expiration
    pub expire_at: Option<u64>,
    /// Handle of this entry's node in the recency list
    pub position: Position,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `expire_at` - Absolute expiry in Unix seconds; `None` or `Some(0)` never expires
    /// * `position` - The entry's node in the recency list
    pub fn new(value: String, expire_at: Option<u64>, position: Position) -> Self {
        Self {
            value,
            expire_at: normalize_expiry(expire_at),
            position,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at the given time.
    ///
    /// Boundary condition: an entry is only expired once `now` is strictly
    /// greater than its expiration time, so a read at exactly `expire_at`
    /// still hits. A `now` of 0 never expires anything.
    pub fn is_expired_at(&self, now: u64) -> bool {
        match self.expire_at {
            Some(expires) => now > expires,
            None => false,
        }
    }

    // == Byte Size ==
    /// Returns the accounted footprint of this entry together with its key.
    pub fn footprint(&self, key: &str) -> usize {
        key.len() + self.value.len()
    }
}

/// Maps the "0 means never" convention onto `None`.
pub fn normalize_expiry(expire_at: Option<u64>) -> Option<u64> {
    expire_at.filter(|&t| t > 0)
}

// == Utility Functions ==
/// Returns current Unix timestamp in seconds.
pub fn current_timestamp() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

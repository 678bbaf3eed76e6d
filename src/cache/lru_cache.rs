//! LRU Cache Module
//!
//! Bounded cache engine combining a HashMap index with an O(1) recency list
//! and lazy per-entry expiry.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::cache::counter;
use crate::cache::entry::normalize_expiry;
use crate::cache::{CacheEntry, CacheStats, RecencyList};
use crate::error::{CacheError, Result};

/// Callback told about every change of the cache's byte footprint.
///
/// Receives the signed delta in bytes. Purely advisory: an embedding memory
/// manager can use it to track external allocations.
pub type MemoryHook = Box<dyn Fn(i64) + Send + Sync>;

// == Key Listing ==
/// How much of each entry [`LruCache::list_keys`] reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyDetail {
    /// Key only
    #[default]
    Key,
    /// Key and expiry
    WithExpiry,
    /// Key, expiry and value
    Full,
}

/// One item produced by [`LruCache::list_keys`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KeyListing {
    Key(String),
    WithExpiry {
        key: String,
        expire_at: Option<u64>,
    },
    Full {
        key: String,
        expire_at: Option<u64>,
        value: String,
    },
}

impl KeyListing {
    /// Returns the listed key regardless of detail level.
    pub fn key(&self) -> &str {
        match self {
            KeyListing::Key(key) => key,
            KeyListing::WithExpiry { key, .. } | KeyListing::Full { key, .. } => key,
        }
    }
}

// == LRU Cache ==
/// Bounded key/value cache with least-recently-used eviction.
///
/// Expiry is checked lazily on [`get`](Self::get) against the caller's clock;
/// there is no background sweep of individual keys.
pub struct LruCache {
    /// Key to entry index
    entries: HashMap<String, CacheEntry>,
    /// Access order, oldest at the head
    recency: RecencyList,
    /// Activity counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Sum of key and value lengths of live entries
    byte_size: usize,
    memory_hook: Option<MemoryHook>,
}

impl fmt::Debug for LruCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("entries", &self.entries.len())
            .field("byte_size", &self.byte_size)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl LruCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Returns [`CacheError::InvalidArgument`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        validate_capacity(capacity)?;
        Ok(Self {
            entries: HashMap::new(),
            recency: RecencyList::new(),
            stats: CacheStats::new(),
            capacity,
            byte_size: 0,
            memory_hook: None,
        })
    }

    // == Memory Hook ==
    /// Installs the byte-accounting callback, replacing any previous one.
    pub fn set_memory_hook(&mut self, hook: MemoryHook) {
        self.memory_hook = Some(hook);
    }

    // == Get ==
    /// Retrieves a value by key, marking it most recently used.
    ///
    /// An entry whose expiry is strictly before `now` is deleted and reported
    /// as absent; that counts as a deletion, neither a hit nor a miss. Passing
    /// `now = 0` disables the expiry check.
    pub fn get(&mut self, key: &str, now: u64) -> Option<String> {
        let (position, value) = match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => (entry.position, entry.value.clone()),
            Some(_) => {
                debug!(key, now, "LRU entry expired on read");
                self.delete(key);
                return None;
            }
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        self.recency.touch(position);
        self.stats.record_hit();
        Some(value)
    }

    // == Put ==
    /// Stores a key-value pair with an optional absolute expiry.
    ///
    /// Overwriting replaces both value and expiry and marks the key most
    /// recently used. Inserting a new key into a full cache first evicts from
    /// the head of the recency list until there is room.
    pub fn put(&mut self, key: String, value: String, expire_at: Option<u64>) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::empty("key"));
        }

        if let Some(entry) = self.entries.get_mut(&key) {
            let delta = value.len() as i64 - entry.value.len() as i64;
            entry.value = value;
            entry.expire_at = normalize_expiry(expire_at);
            self.recency.touch(entry.position);
            self.adjust_bytes(delta);
            return Ok(());
        }

        while self.entries.len() >= self.capacity {
            if self.evict_oldest().is_none() {
                break;
            }
        }

        let bytes = (key.len() + value.len()) as i64;
        let position = self.recency.push_back(key.clone());
        self.entries
            .insert(key, CacheEntry::new(value, expire_at, position));
        self.stats.record_insertion();
        self.adjust_bytes(bytes);
        Ok(())
    }

    // == Increment ==
    /// Adds `delta` to the integer stored under `key` and returns the new value.
    ///
    /// The current value is read with the expiry check disabled, so a stale
    /// entry that has not yet been read with a real clock is still counted.
    /// Missing or non-numeric values read as 0.
    pub fn increment(&mut self, key: &str, delta: &str, expire_at: Option<u64>) -> Result<String> {
        if key.is_empty() {
            return Err(CacheError::empty("key"));
        }

        let current = self.get(key, 0).unwrap_or_default();
        let sum = counter::add(&current, delta);
        self.put(key.to_string(), sum.clone(), expire_at)?;
        Ok(sum)
    }

    // == Exists ==
    /// Checks presence without touching recency or counters.
    pub fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns false if the key was not present.
    pub fn delete(&mut self, key: &str) -> bool {
        let Some(entry) = self.entries.remove(key) else {
            return false;
        };
        self.recency.remove(entry.position);
        self.stats.record_deletion();
        self.adjust_bytes(-(entry.footprint(key) as i64));
        true
    }

    // == Evict Oldest ==
    /// Evicts the least recently used entry and returns its key.
    ///
    /// Returns None on an empty cache.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let key = self.recency.pop_front()?;
        if let Some(entry) = self.entries.remove(&key) {
            self.adjust_bytes(-(entry.footprint(&key) as i64));
        }
        self.stats.record_eviction();
        debug!(key = %key, "Evicted least recently used entry");
        Some(key)
    }

    // == Oldest Key ==
    /// Returns the next eviction candidate without removing it.
    pub fn oldest_key(&self) -> Option<&str> {
        self.recency.front()
    }

    // == Clear ==
    /// Removes every entry and resets all counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
        self.adjust_bytes(-(self.byte_size as i64));
        self.byte_size = 0;
        self.stats = CacheStats::new();
    }

    // == Stats ==
    /// Returns a snapshot of the counters and sizing.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            capacity: self.capacity,
            byte_size: self.byte_size,
            entry_count: self.entries.len(),
            ..self.stats.clone()
        }
    }

    // == List Keys ==
    /// Lazily lists keys from least to most recently used.
    ///
    /// Only keys starting with `prefix` are produced; an empty prefix matches
    /// everything. The sequence borrows the cache, so it is consumed before
    /// the next mutation.
    pub fn list_keys<'a>(
        &'a self,
        prefix: &'a str,
        detail: KeyDetail,
    ) -> impl Iterator<Item = KeyListing> + 'a {
        self.recency
            .iter()
            .filter(move |key| key.starts_with(prefix))
            .filter_map(move |key| {
                let entry = self.entries.get(key)?;
                Some(match detail {
                    KeyDetail::Key => KeyListing::Key(key.to_string()),
                    KeyDetail::WithExpiry => KeyListing::WithExpiry {
                        key: key.to_string(),
                        expire_at: entry.expire_at,
                    },
                    KeyDetail::Full => KeyListing::Full {
                        key: key.to_string(),
                        expire_at: entry.expire_at,
                        value: entry.value.clone(),
                    },
                })
            })
    }

    // == Capacity ==
    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the maximum number of entries.
    ///
    /// Shrinking below the current entry count does not evict anything now;
    /// the next insertion of a new key evicts down to the new bound.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        validate_capacity(capacity)?;
        self.capacity = capacity;
        Ok(())
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the sum of key and value byte lengths of live entries.
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    fn adjust_bytes(&mut self, delta: i64) {
        if delta == 0 {
            return;
        }
        self.byte_size = (self.byte_size as i64 + delta).max(0) as usize;
        if let Some(hook) = &self.memory_hook {
            hook(delta);
        }
    }
}

fn validate_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(CacheError::InvalidArgument(
            "capacity must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

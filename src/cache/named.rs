//! Named Cache Map Module
//!
//! An unbounded string map with a whole-map expiry and a resumable cursor.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::cache::counter;

// == Cursor ==
/// Resumable position of a map traversal.
///
/// The cursor remembers the last key it produced rather than a live iterator,
/// so writes between steps never invalidate it in a memory-unsafe way; the
/// traversal simply continues after that key in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Cursor {
    /// No traversal in progress
    #[default]
    Idle,
    /// Traversal started, nothing produced yet
    Start,
    /// Last produced key
    After(String),
}

// == Named Cache Map ==
/// One named map in the registry.
///
/// Keys are kept sorted, which gives every traversal a deterministic order.
/// Individual keys never expire; the whole map carries a single optional
/// expiry enforced by the sweeper.
#[derive(Debug, Clone, Default)]
pub struct NamedCacheMap {
    items: BTreeMap<String, String>,
    /// Absolute expiry (Unix seconds) for the whole map, None = never
    expire_at: Option<u64>,
    cursor: Cursor,
}

impl NamedCacheMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Inserts or replaces a value.
    pub fn put(&mut self, key: String, value: String) {
        self.items.insert(key, value);
    }

    /// Adds `delta` to the integer stored under `key` and returns the new value.
    pub fn increment(&mut self, key: &str, delta: &str) -> String {
        let sum = counter::add(self.get(key).unwrap_or_default(), delta);
        self.items.insert(key.to_string(), sum.clone());
        sum
    }

    /// Removes a key, returning whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.items.remove(key).is_some()
    }

    pub fn exists(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    /// Iterates entries in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Drops every entry and abandons any traversal in progress.
    ///
    /// The map-level expiry is left alone; callers decide what it becomes.
    pub fn clear(&mut self) {
        self.items.clear();
        self.cursor = Cursor::Idle;
    }

    // == Expiry ==
    pub fn expire_at(&self) -> Option<u64> {
        self.expire_at
    }

    pub fn set_expire_at(&mut self, expire_at: Option<u64>) {
        self.expire_at = expire_at.filter(|&t| t > 0);
    }

    /// True once `now` is past the map's expiry, matching the LRU entry boundary.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expire_at.is_some_and(|t| now > t)
    }

    // == Iteration ==
    /// Resets the cursor to the first entry.
    pub fn begin_iteration(&mut self) {
        self.cursor = Cursor::Start;
    }

    /// Returns a copy of the entry at the cursor and advances past it.
    ///
    /// Returns None once the traversal is exhausted, and also when no
    /// traversal was started.
    pub fn next_entry(&mut self) -> Option<(String, String)> {
        let next = self.peek().map(|(k, v)| (k.to_string(), v.to_string()));
        self.cursor = match &next {
            Some((key, _)) => Cursor::After(key.clone()),
            None => Cursor::Idle,
        };
        next
    }

    /// Whether [`next_entry`](Self::next_entry) would produce an entry.
    pub fn has_next(&self) -> bool {
        self.peek().is_some()
    }

    fn peek(&self) -> Option<(&str, &str)> {
        let entry = match &self.cursor {
            Cursor::Idle => None,
            Cursor::Start => self.items.iter().next(),
            Cursor::After(last) => self
                .items
                .range::<str, _>((Bound::Excluded(last.as_str()), Bound::Unbounded))
                .next(),
        };
        entry.map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

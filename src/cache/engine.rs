//! Cache Engine Module
//!
//! The explicit handle owning the LRU cache and the named-map registry.

use tracing::info;

use crate::cache::entry::current_timestamp;
use crate::cache::traversal::{Step, Traversal};
use crate::cache::{CacheRegistry, LruCache};
use crate::config::Config;
use crate::error::Result;

// == Cache Engine ==
/// Owner of all cache state.
///
/// Starts empty and is torn down by dropping it. The engine does no locking
/// of its own; hosts that share it between tasks wrap it, see
/// [`SharedEngine`](crate::tasks::SharedEngine).
#[derive(Debug)]
pub struct CacheEngine {
    lru: LruCache,
    registry: CacheRegistry,
}

impl CacheEngine {
    // == Constructor ==
    /// Creates an engine whose LRU cache holds at most `lru_capacity` entries.
    pub fn new(lru_capacity: usize) -> Result<Self> {
        Ok(Self {
            lru: LruCache::new(lru_capacity)?,
            registry: CacheRegistry::new(),
        })
    }

    /// Creates an engine from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.lru_capacity)
    }

    pub fn lru(&self) -> &LruCache {
        &self.lru
    }

    pub fn lru_mut(&mut self) -> &mut LruCache {
        &mut self.lru
    }

    pub fn registry(&self) -> &CacheRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CacheRegistry {
        &mut self.registry
    }

    // == Named Map TTL ==
    /// Clears a named map against the wall clock.
    ///
    /// See [`CacheRegistry::clear`] for the meaning of `ttl_secs`.
    pub fn clear_map(&mut self, name: &str, ttl_secs: u64) -> Result<()> {
        self.registry.clear(name, ttl_secs, current_timestamp())
    }

    /// Runs one expiry sweep against the wall clock.
    pub fn sweep(&mut self) -> usize {
        self.registry.sweep(current_timestamp())
    }

    /// Advances a chunked traversal by one entry and returns a copy of it.
    pub fn step_traversal(&mut self, traversal: &mut Traversal) -> Step {
        traversal.step(&mut self.registry)
    }

    // == Reset ==
    /// Drops every LRU entry and every named map.
    pub fn reset(&mut self) {
        self.lru.clear();
        self.registry = CacheRegistry::new();
        info!("Cache engine reset");
    }
}

//! Cache Module
//!
//! Provides the bounded LRU cache with per-entry expiry, the registry of
//! named maps with whole-map expiry, and chunked traversal of named maps.

mod counter;
mod engine;
mod entry;
mod lru_cache;
mod named;
mod recency;
mod registry;
mod stats;
mod traversal;


// Re-export public types
pub use counter::parse_integer;
pub use engine::CacheEngine;
pub use entry::{current_timestamp, CacheEntry};
pub use lru_cache::{KeyDetail, KeyListing, LruCache, MemoryHook};
pub use named::NamedCacheMap;
pub use recency::{Position, RecencyList};
pub use registry::CacheRegistry;
pub use stats::CacheStats;
pub use traversal::{Step, Traversal};

// == Public Constants ==
/// LRU capacity used when none is configured
pub const DEFAULT_LRU_CAPACITY: usize = 100_000;

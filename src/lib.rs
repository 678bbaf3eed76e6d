//! strcache - An embeddable in-process string cache
//!
//! Provides a bounded LRU cache with per-entry expiry and a registry of
//! named maps with whole-map expiry and chunked traversal.

pub mod cache;
pub mod config;
pub mod error;
pub mod shell;
pub mod tasks;

pub use cache::CacheEngine;
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::{shared, spawn_sweeper_task, SharedEngine};

//! Background Tasks Module
//!
//! Contains the tasks that drive the engine from a tokio runtime.
//!
//! # Tasks
//! - Expiry sweep: clears expired named maps at a fixed interval
//! - Traversal: walks a named map one entry per scheduler tick

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::CacheEngine;

mod sweeper;
mod traversal;

pub use sweeper::spawn_sweeper_task;
pub use traversal::{drive_traversal, spawn_traversal};

/// Engine handle shared between the host and background tasks.
pub type SharedEngine = Arc<RwLock<CacheEngine>>;

/// Wraps an engine for sharing with background tasks.
pub fn shared(engine: CacheEngine) -> SharedEngine {
    Arc::new(RwLock::new(engine))
}

//! Expiry Sweep Task
//!
//! Background task that periodically clears named maps whose whole-map
//! expiry has passed. Individual LRU entries are never swept; they expire
//! lazily on read.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::tasks::SharedEngine;

/// Spawns a background task that periodically sweeps expired named maps.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. Each sweep holds the engine's write lock for one pass
/// over the registry.
///
/// # Arguments
/// * `engine` - Shared engine handle
/// * `interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let engine = shared(CacheEngine::new(1000)?);
/// let sweeper = spawn_sweeper_task(engine.clone(), 60);
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweeper_task(engine: SharedEngine, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let cleared = {
                let mut guard = engine.write().await;
                guard.sweep()
            };

            if cleared > 0 {
                info!("Expiry sweep: cleared {} expired named maps", cleared);
            } else {
                debug!("Expiry sweep: no expired named maps found");
            }
        }
    })
}

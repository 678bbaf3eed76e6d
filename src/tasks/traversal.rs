//! Traversal Task
//!
//! Drives a chunked named-map traversal from the tokio scheduler, one entry
//! per tick, so a large map never holds the engine for a whole walk.

use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{Step, Traversal};
use crate::tasks::SharedEngine;

/// Walks the named map to completion, yielding to the runtime between entries.
///
/// The engine lock is taken only to copy out the next entry and is released
/// before either callback runs, so callbacks may use the engine themselves
/// (for example via `try_write`). Control goes back to the runtime after
/// every entry. `on_complete` runs once after the last entry (or right away
/// when the map does not exist).
///
/// Returns the number of entries delivered.
pub async fn drive_traversal<F, C>(
    engine: &SharedEngine,
    name: impl Into<String>,
    mut on_entry: F,
    on_complete: C,
) -> usize
where
    F: FnMut(String, String) + Send,
    C: FnOnce() + Send,
{
    let mut traversal = Traversal::new(name);

    loop {
        let step = {
            let mut guard = engine.write().await;
            guard.step_traversal(&mut traversal)
        };
        match step {
            Step::Delivered { key, value } => on_entry(key, value),
            Step::Completed => break,
        }
        tokio::task::yield_now().await;
    }

    on_complete();

    debug!(
        name = traversal.name(),
        delivered = traversal.delivered(),
        "Traversal completed"
    );
    traversal.delivered()
}

/// Spawns [`drive_traversal`] as a background task.
///
/// Aborting the returned handle cancels the walk; the completion callback
/// then never runs.
pub fn spawn_traversal<F, C>(
    engine: SharedEngine,
    name: impl Into<String>,
    on_entry: F,
    on_complete: C,
) -> JoinHandle<usize>
where
    F: FnMut(String, String) + Send + 'static,
    C: FnOnce() + Send + 'static,
{
    let name = name.into();
    tokio::spawn(async move { drive_traversal(&engine, name, on_entry, on_complete).await })
}

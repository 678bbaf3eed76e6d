//! Shell Handlers
//!
//! Executes parsed commands against the shared engine.
//!
//! Each command takes the engine lock for exactly one operation, except
//! `MAP.EACH`, which takes it once per delivered entry.

use tracing::debug;

use crate::cache::{current_timestamp, CacheEngine};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::shell::{Command, Reply};
use crate::tasks::{drive_traversal, SharedEngine};

/// Parses and executes one input line.
///
/// Parse failures are reported as a single error reply.
pub async fn run_line(engine: &SharedEngine, config: &Config, line: &str) -> Vec<Reply> {
    match Command::parse(line) {
        Ok(command) => execute(engine, config, command).await,
        Err(err) => vec![Reply::from(err)],
    }
}

/// Executes a command and returns the replies to print, in order.
pub async fn execute(engine: &SharedEngine, config: &Config, command: Command) -> Vec<Reply> {
    debug!(?command, "Executing shell command");

    match command {
        Command::MapEach { name } => each(engine, &name).await,
        command => {
            let mut guard = engine.write().await;
            vec![apply(&mut guard, config, command)]
        }
    }
}

/// Runs a single-reply command against the locked engine.
fn apply(guard: &mut CacheEngine, config: &Config, command: Command) -> Reply {
    match command {
        // == LRU cache ==
        Command::LruGet { key, now } => {
            let now = now.unwrap_or_else(current_timestamp);
            Reply::value(guard.lru_mut().get(&key, now))
        }
        Command::LruSet {
            key,
            value,
            expire_at,
        } => respond(guard.lru_mut().put(key, value, expire_at), |_| Reply::ok()),
        Command::LruIncr {
            key,
            delta,
            expire_at,
        } => respond(guard.lru_mut().increment(&key, &delta, expire_at), |v| {
            Reply::value(Some(v))
        }),
        Command::LruDel { key } => {
            guard.lru_mut().delete(&key);
            Reply::ok()
        }
        Command::LruExists { key } => Reply::Exists {
            exists: guard.lru().exists(&key),
        },
        Command::LruEvict => Reply::value(guard.lru_mut().evict_oldest()),
        Command::LruOldest => Reply::value(guard.lru().oldest_key().map(str::to_string)),
        Command::LruClear => {
            guard.lru_mut().clear();
            Reply::ok()
        }
        Command::LruStats => Reply::stats(guard.lru().stats()),
        Command::LruKeys { prefix, detail } => Reply::Listing {
            keys: guard.lru().list_keys(&prefix, detail).collect(),
        },
        Command::LruCapacity { capacity } => {
            respond(guard.lru_mut().set_capacity(capacity), |_| Reply::ok())
        }

        // == Named maps ==
        Command::MapSet { name, key, value } => {
            respond(guard.registry_mut().put(&name, key, value), |_| Reply::ok())
        }
        Command::MapGet { name, key } => Reply::value(guard.registry().get(&name, &key)),
        Command::MapIncr { name, key, delta } => respond(
            guard.registry_mut().increment(&name, &key, &delta),
            |v| Reply::value(Some(v)),
        ),
        Command::MapDel { name, key } => {
            guard.registry_mut().delete(&name, &key);
            Reply::ok()
        }
        Command::MapExists { name, key } => Reply::Exists {
            exists: guard.registry().exists(&name, &key),
        },
        Command::MapSize { name } => Reply::Size {
            size: guard.registry().size(&name),
        },
        Command::MapNames => Reply::Names {
            names: guard.registry().names(),
        },
        Command::MapKeys { name } => Reply::Keys {
            keys: guard.registry().keys(&name),
        },
        Command::MapClear { name, ttl } => respond(guard.clear_map(&name, ttl), |_| Reply::ok()),
        Command::MapDump { name, path } => respond(
            guard
                .registry()
                .dump(&name, &path, &config.dump_separator),
            |records| Reply::Dumped {
                path: path.clone(),
                records,
            },
        ),
        Command::MapBegin { name } => Reply::Started {
            started: guard.registry_mut().begin_iteration(&name),
        },
        Command::MapNext { name } => match guard.registry_mut().next_entry(&name) {
            Some((key, value)) => Reply::Entry { key, value },
            None => Reply::end(),
        },
        Command::Sweep => Reply::Swept {
            cleared: guard.sweep(),
        },
        Command::Ping => Reply::pong(),
        // Streams several replies, so it never reaches the single-reply path
        Command::MapEach { .. } => Reply::from(CacheError::InvalidArgument(
            "MAP.EACH streams its replies and cannot be applied directly".to_string(),
        )),
    }
}

async fn each(engine: &SharedEngine, name: &str) -> Vec<Reply> {
    let mut replies = Vec::new();
    let delivered = drive_traversal(
        engine,
        name,
        |key, value| replies.push(Reply::Entry { key, value }),
        || {},
    )
    .await;
    replies.push(Reply::Completed {
        completed: delivered,
    });
    replies
}

fn respond<T>(result: Result<T>, on_ok: impl FnOnce(T) -> Reply) -> Reply {
    match result {
        Ok(value) => on_ok(value),
        Err(err) => Reply::from(err),
    }
}

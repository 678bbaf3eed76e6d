//! Shell Module
//!
//! Line-oriented host surface for the engine: one command per input line,
//! one JSON reply per output line.
//!
//! # Commands
//! - `LRU.GET key [now]`, `LRU.SET key value [expire_at]`, `LRU.INCR key delta [expire_at]`
//! - `LRU.DEL key`, `LRU.EXISTS key`, `LRU.EVICT`, `LRU.OLDEST`, `LRU.CLEAR`
//! - `LRU.STATS`, `LRU.KEYS [prefix] [key|expiry|full]`, `LRU.CAPACITY n`
//! - `MAP.SET name key value`, `MAP.GET name key`, `MAP.INCR name key delta`
//! - `MAP.DEL name key`, `MAP.EXISTS name key`, `MAP.SIZE name`, `MAP.NAMES`, `MAP.KEYS name`
//! - `MAP.CLEAR name [ttl]`, `MAP.DUMP name path`
//! - `MAP.BEGIN name`, `MAP.NEXT name`, `MAP.EACH name`
//! - `SWEEP`, `PING`

pub mod command;
pub mod handlers;
pub mod reply;

pub use command::Command;
pub use handlers::{execute, run_line};
pub use reply::Reply;

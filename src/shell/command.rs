//! Shell Commands
//!
//! Parses one line of shell input into a [`Command`].
//!
//! Arguments are separated by whitespace, so keys and values cannot contain
//! spaces. Verbs are case-insensitive.

use crate::cache::KeyDetail;
use crate::error::{CacheError, Result};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LruGet { key: String, now: Option<u64> },
    LruSet { key: String, value: String, expire_at: Option<u64> },
    LruIncr { key: String, delta: String, expire_at: Option<u64> },
    LruDel { key: String },
    LruExists { key: String },
    LruEvict,
    LruOldest,
    LruClear,
    LruStats,
    LruKeys { prefix: String, detail: KeyDetail },
    LruCapacity { capacity: usize },
    MapSet { name: String, key: String, value: String },
    MapGet { name: String, key: String },
    MapIncr { name: String, key: String, delta: String },
    MapDel { name: String, key: String },
    MapExists { name: String, key: String },
    MapSize { name: String },
    MapNames,
    MapKeys { name: String },
    MapClear { name: String, ttl: u64 },
    MapDump { name: String, path: String },
    MapBegin { name: String },
    MapNext { name: String },
    MapEach { name: String },
    Sweep,
    Ping,
}

impl Command {
    /// Parses a command line.
    ///
    /// Returns [`CacheError::InvalidArgument`] for unknown verbs, missing
    /// arguments, extra arguments or malformed numbers.
    pub fn parse(line: &str) -> Result<Self> {
        let mut args = Args::new(line);
        let verb = args.required("command")?.to_ascii_uppercase();

        let command = match verb.as_str() {
            "LRU.GET" => Command::LruGet {
                key: args.required("key")?,
                now: args.optional_number("now")?,
            },
            "LRU.SET" => Command::LruSet {
                key: args.required("key")?,
                value: args.required("value")?,
                expire_at: args.optional_number("expire_at")?,
            },
            "LRU.INCR" => Command::LruIncr {
                key: args.required("key")?,
                delta: args.required("delta")?,
                expire_at: args.optional_number("expire_at")?,
            },
            "LRU.DEL" => Command::LruDel {
                key: args.required("key")?,
            },
            "LRU.EXISTS" => Command::LruExists {
                key: args.required("key")?,
            },
            "LRU.EVICT" => Command::LruEvict,
            "LRU.OLDEST" => Command::LruOldest,
            "LRU.CLEAR" => Command::LruClear,
            "LRU.STATS" => Command::LruStats,
            "LRU.KEYS" => Command::LruKeys {
                prefix: args.optional().unwrap_or_default(),
                detail: match args.optional().as_deref() {
                    None | Some("key") => KeyDetail::Key,
                    Some("expiry") => KeyDetail::WithExpiry,
                    Some("full") => KeyDetail::Full,
                    Some(other) => {
                        return Err(CacheError::InvalidArgument(format!(
                            "unknown detail level '{}', expected key, expiry or full",
                            other
                        )))
                    }
                },
            },
            "LRU.CAPACITY" => Command::LruCapacity {
                capacity: args.required_number("capacity")?,
            },
            "MAP.SET" => Command::MapSet {
                name: args.required("name")?,
                key: args.required("key")?,
                value: args.required("value")?,
            },
            "MAP.GET" => Command::MapGet {
                name: args.required("name")?,
                key: args.required("key")?,
            },
            "MAP.INCR" => Command::MapIncr {
                name: args.required("name")?,
                key: args.required("key")?,
                delta: args.required("delta")?,
            },
            "MAP.DEL" => Command::MapDel {
                name: args.required("name")?,
                key: args.required("key")?,
            },
            "MAP.EXISTS" => Command::MapExists {
                name: args.required("name")?,
                key: args.required("key")?,
            },
            "MAP.SIZE" => Command::MapSize {
                name: args.required("name")?,
            },
            "MAP.NAMES" => Command::MapNames,
            "MAP.KEYS" => Command::MapKeys {
                name: args.required("name")?,
            },
            "MAP.CLEAR" => Command::MapClear {
                name: args.required("name")?,
                ttl: args.optional_number("ttl")?.unwrap_or(0),
            },
            "MAP.DUMP" => Command::MapDump {
                name: args.required("name")?,
                path: args.required("path")?,
            },
            "MAP.BEGIN" => Command::MapBegin {
                name: args.required("name")?,
            },
            "MAP.NEXT" => Command::MapNext {
                name: args.required("name")?,
            },
            "MAP.EACH" => Command::MapEach {
                name: args.required("name")?,
            },
            "SWEEP" => Command::Sweep,
            "PING" => Command::Ping,
            other => {
                return Err(CacheError::InvalidArgument(format!(
                    "unknown command '{}'",
                    other
                )))
            }
        };

        args.finish()?;
        Ok(command)
    }
}

struct Args<'a> {
    parts: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            parts: line.split_whitespace(),
        }
    }

    fn optional(&mut self) -> Option<String> {
        self.parts.next().map(str::to_string)
    }

    fn required(&mut self, field: &str) -> Result<String> {
        self.optional()
            .ok_or_else(|| CacheError::InvalidArgument(format!("missing {}", field)))
    }

    fn optional_number<T: std::str::FromStr>(&mut self, field: &str) -> Result<Option<T>> {
        self.optional()
            .map(|raw| {
                raw.parse().map_err(|_| {
                    CacheError::InvalidArgument(format!("{} must be a number, got '{}'", field, raw))
                })
            })
            .transpose()
    }

    fn required_number<T: std::str::FromStr>(&mut self, field: &str) -> Result<T> {
        self.optional_number(field)?
            .ok_or_else(|| CacheError::InvalidArgument(format!("missing {}", field)))
    }

    fn finish(mut self) -> Result<()> {
        match self.parts.next() {
            Some(extra) => Err(CacheError::InvalidArgument(format!(
                "unexpected argument '{}'",
                extra
            ))),
            None => Ok(()),
        }
    }
}

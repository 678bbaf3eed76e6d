//! Shell Replies
//!
//! Defines the JSON documents written to stdout, one per line.

use serde::Serialize;

use crate::cache::{CacheStats, KeyListing};
use crate::error::CacheError;

/// One line of shell output.
///
/// Serialized untagged, so each variant is a small self-describing object
/// such as `{"value":"alice"}` or `{"error":"..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Ok { ok: bool },
    Value { value: Option<String> },
    Exists { exists: bool },
    Size { size: usize },
    Names { names: Vec<String> },
    Keys { keys: Vec<String> },
    Listing { keys: Vec<KeyListing> },
    Stats { stats: CacheStats, hit_rate: f64 },
    Started { started: bool },
    Entry { key: String, value: String },
    End { end: bool },
    Completed { completed: usize },
    Swept { cleared: usize },
    Dumped { path: String, records: usize },
    Pong { pong: String },
    Error { error: String },
}

impl Reply {
    pub fn ok() -> Self {
        Reply::Ok { ok: true }
    }

    pub fn value(value: Option<String>) -> Self {
        Reply::Value { value }
    }

    pub fn stats(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Reply::Stats { stats, hit_rate }
    }

    /// End-of-sequence marker for `MAP.NEXT`.
    pub fn end() -> Self {
        Reply::End { end: true }
    }

    pub fn pong() -> Self {
        Reply::Pong {
            pong: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(error: impl std::fmt::Display) -> Self {
        Reply::Error {
            error: error.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error { .. })
    }
}

impl From<CacheError> for Reply {
    fn from(err: CacheError) -> Self {
        Reply::error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_serialize() {
        let json = serde_json::to_string(&Reply::value(Some("alice".to_string()))).unwrap();
        assert_eq!(json, r#"{"value":"alice"}"#);

        let json = serde_json::to_string(&Reply::value(None)).unwrap();
        assert_eq!(json, r#"{"value":null}"#);
    }

    #[test]
    fn test_entry_and_end_serialize() {
        let entry = Reply::Entry {
            key: "k".to_string(),
            value: "v".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"key":"k","value":"v"}"#
        );
        assert_eq!(serde_json::to_string(&Reply::end()).unwrap(), r#"{"end":true}"#);
    }

    #[test]
    fn test_stats_reply_includes_hit_rate() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..CacheStats::default()
        };
        let json = serde_json::to_value(Reply::stats(stats)).unwrap();
        assert_eq!(json["stats"]["hits"], 3);
        assert_eq!(json["hit_rate"], 0.75);
    }

    #[test]
    fn test_error_from_cache_error() {
        let reply = Reply::from(CacheError::empty("key"));
        assert!(reply.is_error());
        let json = serde_json::to_value(&reply).unwrap();
        assert!(json["error"].as_str().unwrap().contains("key cannot be empty"));
    }

    #[test]
    fn test_pong_has_timestamp() {
        match Reply::pong() {
            Reply::Pong { pong } => assert!(pong.contains('T')),
            other => panic!("unexpected reply {:?}", other),
        }
    }
}

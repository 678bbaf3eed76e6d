//! Integration Tests for Shell Commands
//!
//! Tests the full parse -> execute -> JSON cycle for each command family.

use serde_json::Value;
use strcache::shell::run_line;
use strcache::{shared, CacheEngine, Config, SharedEngine};
use tempfile::TempDir;

// == Helper Functions ==

fn create_test_engine() -> SharedEngine {
    shared(CacheEngine::new(100).unwrap())
}

async fn send(engine: &SharedEngine, line: &str) -> Vec<Value> {
    run_line(engine, &Config::default(), line)
        .await
        .iter()
        .map(|reply| serde_json::to_value(reply).unwrap())
        .collect()
}

async fn send_one(engine: &SharedEngine, line: &str) -> Value {
    let mut replies = send(engine, line).await;
    assert_eq!(replies.len(), 1, "expected a single reply to '{}'", line);
    replies.remove(0)
}

// == LRU Commands ==

#[tokio::test]
async fn test_lru_set_get_delete() {
    let engine = create_test_engine();

    assert_eq!(send_one(&engine, "LRU.SET user:1 alice").await["ok"], true);

    let json = send_one(&engine, "LRU.GET user:1").await;
    assert_eq!(json["value"].as_str().unwrap(), "alice");

    assert_eq!(send_one(&engine, "LRU.EXISTS user:1").await["exists"], true);
    send_one(&engine, "LRU.DEL user:1").await;
    assert_eq!(send_one(&engine, "LRU.EXISTS user:1").await["exists"], false);
    assert!(send_one(&engine, "LRU.GET user:1").await["value"].is_null());
}

#[tokio::test]
async fn test_lru_expiry_with_explicit_clock() {
    let engine = create_test_engine();

    send_one(&engine, "LRU.SET session abc 1000").await;

    let json = send_one(&engine, "LRU.GET session 999").await;
    assert_eq!(json["value"].as_str().unwrap(), "abc");

    let json = send_one(&engine, "LRU.GET session 1001").await;
    assert!(json["value"].is_null());

    let stats = send_one(&engine, "LRU.STATS").await;
    assert_eq!(stats["stats"]["hits"], 1);
    assert_eq!(stats["stats"]["deletions"], 1);
    assert_eq!(stats["stats"]["evictions"], 0);
}

#[tokio::test]
async fn test_lru_increment() {
    let engine = create_test_engine();

    assert_eq!(send_one(&engine, "LRU.INCR visits 5").await["value"], "5");
    send_one(&engine, "LRU.SET total 10").await;
    assert_eq!(send_one(&engine, "LRU.INCR total -3").await["value"], "7");
    assert_eq!(send_one(&engine, "LRU.INCR total x").await["value"], "7");
}

#[tokio::test]
async fn test_lru_eviction_and_oldest() {
    let engine = create_test_engine();

    send_one(&engine, "LRU.CAPACITY 2").await;
    send_one(&engine, "LRU.SET a 1").await;
    send_one(&engine, "LRU.SET b 2").await;
    send_one(&engine, "LRU.GET a").await;

    assert_eq!(send_one(&engine, "LRU.OLDEST").await["value"], "b");

    send_one(&engine, "LRU.SET c 3").await;
    assert_eq!(send_one(&engine, "LRU.EXISTS b").await["exists"], false);

    assert_eq!(send_one(&engine, "LRU.EVICT").await["value"], "a");
    let stats = send_one(&engine, "LRU.STATS").await;
    assert_eq!(stats["stats"]["evictions"], 2);
    assert_eq!(stats["stats"]["entry_count"], 1);
    assert_eq!(stats["stats"]["capacity"], 2);
}

#[tokio::test]
async fn test_lru_keys_listing() {
    let engine = create_test_engine();

    send_one(&engine, "LRU.SET user:1 alice 500").await;
    send_one(&engine, "LRU.SET cart:1 apples").await;
    send_one(&engine, "LRU.SET user:2 bob").await;

    let json = send_one(&engine, "LRU.KEYS").await;
    assert_eq!(json["keys"], serde_json::json!(["user:1", "cart:1", "user:2"]));

    let json = send_one(&engine, "LRU.KEYS user: expiry").await;
    assert_eq!(
        json["keys"],
        serde_json::json!([
            {"key": "user:1", "expire_at": 500},
            {"key": "user:2", "expire_at": null}
        ])
    );

    let json = send_one(&engine, "LRU.KEYS cart full").await;
    assert_eq!(json["keys"][0]["value"], "apples");
}

#[tokio::test]
async fn test_lru_clear_resets_stats() {
    let engine = create_test_engine();

    send_one(&engine, "LRU.SET a 1").await;
    send_one(&engine, "LRU.GET a").await;
    send_one(&engine, "LRU.CLEAR").await;

    let stats = send_one(&engine, "LRU.STATS").await;
    assert_eq!(stats["stats"]["hits"], 0);
    assert_eq!(stats["stats"]["insertions"], 0);
    assert_eq!(stats["stats"]["byte_size"], 0);
    assert_eq!(stats["hit_rate"], 0.0);
}

// == Named Map Commands ==

#[tokio::test]
async fn test_map_lifecycle() {
    let engine = create_test_engine();

    send_one(&engine, "MAP.SET sessions s1 alice").await;
    send_one(&engine, "MAP.SET sessions s2 bob").await;
    send_one(&engine, "MAP.SET counters hits 1").await;

    assert_eq!(
        send_one(&engine, "MAP.NAMES").await["names"],
        serde_json::json!(["counters", "sessions"])
    );
    assert_eq!(
        send_one(&engine, "MAP.KEYS sessions").await["keys"],
        serde_json::json!(["s1", "s2"])
    );
    assert_eq!(send_one(&engine, "MAP.SIZE sessions").await["size"], 2);
    assert_eq!(send_one(&engine, "MAP.GET sessions s1").await["value"], "alice");
    assert_eq!(send_one(&engine, "MAP.INCR counters hits 4").await["value"], "5");

    send_one(&engine, "MAP.DEL sessions s1").await;
    assert_eq!(send_one(&engine, "MAP.EXISTS sessions s1").await["exists"], false);

    send_one(&engine, "MAP.CLEAR sessions").await;
    assert_eq!(
        send_one(&engine, "MAP.NAMES").await["names"],
        serde_json::json!(["counters"])
    );
}

#[tokio::test]
async fn test_map_clear_with_ttl_keeps_name() {
    let engine = create_test_engine();

    send_one(&engine, "MAP.SET A k v").await;
    send_one(&engine, "MAP.CLEAR A 3600").await;

    assert_eq!(send_one(&engine, "MAP.SIZE A").await["size"], 0);
    assert_eq!(send_one(&engine, "MAP.NAMES").await["names"], serde_json::json!(["A"]));

    // Not expired yet, so a sweep leaves it alone
    assert_eq!(send_one(&engine, "SWEEP").await["cleared"], 0);
    assert_eq!(send_one(&engine, "MAP.NAMES").await["names"], serde_json::json!(["A"]));
}

#[tokio::test]
async fn test_map_manual_iteration() {
    let engine = create_test_engine();

    assert_eq!(send_one(&engine, "MAP.BEGIN missing").await["started"], false);

    send_one(&engine, "MAP.SET m a 1").await;
    send_one(&engine, "MAP.SET m b 2").await;

    assert_eq!(send_one(&engine, "MAP.BEGIN m").await["started"], true);
    let first = send_one(&engine, "MAP.NEXT m").await;
    assert_eq!(first["key"], "a");
    assert_eq!(first["value"], "1");
    assert_eq!(send_one(&engine, "MAP.NEXT m").await["key"], "b");
    assert_eq!(send_one(&engine, "MAP.NEXT m").await["end"], true);
}

#[tokio::test]
async fn test_map_each_streams_then_completes() {
    let engine = create_test_engine();

    for i in 0..5 {
        send_one(&engine, &format!("MAP.SET m k{} v{}", i, i)).await;
    }

    let replies = send(&engine, "MAP.EACH m").await;

    assert_eq!(replies.len(), 6);
    for (i, reply) in replies.iter().take(5).enumerate() {
        assert_eq!(reply["key"], format!("k{}", i));
        assert_eq!(reply["value"], format!("v{}", i));
    }
    assert_eq!(replies[5]["completed"], 5);

    let replies = send(&engine, "MAP.EACH missing").await;
    assert_eq!(replies, vec![serde_json::json!({"completed": 0})]);
}

#[tokio::test]
async fn test_map_dump() {
    let engine = create_test_engine();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sessions.tsv");

    send_one(&engine, "MAP.SET sessions s2 bob").await;
    send_one(&engine, "MAP.SET sessions s1 alice").await;

    let json = send_one(&engine, &format!("MAP.DUMP sessions {}", path.display())).await;
    assert_eq!(json["records"], 2);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "s1\talice\ns2\tbob\n");
}

#[tokio::test]
async fn test_map_dump_to_missing_directory_fails() {
    let engine = create_test_engine();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("out.tsv");

    let json = send_one(&engine, &format!("MAP.DUMP sessions {}", path.display())).await;

    assert!(json["error"].as_str().unwrap().contains("Cannot write dump file"));
}

// == Error Handling ==

#[tokio::test]
async fn test_malformed_commands() {
    let engine = create_test_engine();

    for line in ["FLUSHALL", "LRU.SET onlykey", "LRU.CAPACITY 0", "MAP.CLEAR m soon"] {
        let json = send_one(&engine, line).await;
        assert!(json.get("error").is_some(), "'{}' should fail", line);
    }
}

#[tokio::test]
async fn test_ping() {
    let engine = create_test_engine();

    let json = send_one(&engine, "ping").await;
    assert!(json["pong"].is_string());
}

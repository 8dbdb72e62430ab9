//! Integration tests for the cache subsystem.
//!
//! Tests cover:
//! 1. File backend persistence across cache instances
//! 2. Namespace isolation on a shared cache file
//! 3. TTL expiry through the facade
//! 4. Corrupt cache file recovery
//! 5. Memory backend LRU eviction under the facade

use serde_json::json;
use tempfile::tempdir;

use satchel::cache::{Cache, FileBackend, MemoryBackend};

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn file_cache(path: &std::path::Path) -> Cache {
    Cache::new(Box::new(FileBackend::new(path)))
}

// ─── Test 1: persistence across instances ────────────────────────────────────

#[test]
fn file_cache_persists_across_instances() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cache.json");

    let mut c = file_cache(&path);
    c.set("greeting", json!("hello"));
    c.set("numbers", json!([1, 2, 3]));
    c.flush().unwrap();

    let mut reopened = file_cache(&path);
    assert_eq!(reopened.get("greeting"), Some(json!("hello")));
    assert_eq!(reopened.get("numbers"), Some(json!([1, 2, 3])));
    assert_eq!(reopened.len(), 2);
}

// ─── Test 2: namespace isolation ─────────────────────────────────────────────

#[test]
fn namespaces_share_a_file_without_colliding() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cache.json");

    let mut users = file_cache(&path).with_namespace("user");
    users.set("42", json!({"name": "Ada"}));
    users.flush().unwrap();

    let mut sessions = file_cache(&path).with_namespace("session");
    sessions.set("42", json!("token"));
    sessions.flush().unwrap();

    let mut users = file_cache(&path).with_namespace("user");
    assert_eq!(users.get("42"), Some(json!({"name": "Ada"})));
    assert_eq!(users.keys(), vec!["42"]);

    // Clearing one namespace leaves the other intact.
    users.clear();
    users.flush().unwrap();
    let mut sessions = file_cache(&path).with_namespace("session");
    assert_eq!(sessions.get("42"), Some(json!("token")));
}

// ─── Test 3: TTL expiry ──────────────────────────────────────────────────────

#[test]
fn expired_entries_stay_dead_after_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cache.json");

    let mut c = file_cache(&path);
    c.set_with_ttl("ephemeral", json!(1), chrono::Duration::milliseconds(-1));
    c.set_with_ttl("durable", json!(2), chrono::Duration::hours(1));
    c.flush().unwrap();

    let mut reopened = file_cache(&path);
    assert_eq!(reopened.get("ephemeral"), None);
    assert_eq!(reopened.get("durable"), Some(json!(2)));
}

// ─── Test 4: corrupt file recovery ───────────────────────────────────────────

#[test]
fn corrupt_cache_file_starts_empty_and_recovers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cache.json");
    std::fs::write(&path, "<<definitely not json>>").unwrap();

    let mut c = file_cache(&path);
    assert_eq!(c.get("anything"), None);
    c.set("fresh", json!(true));
    c.flush().unwrap();

    let mut reopened = file_cache(&path);
    assert_eq!(reopened.get("fresh"), Some(json!(true)));
}

// ─── Test 5: LRU facade behavior ─────────────────────────────────────────────

#[test]
fn bounded_memory_backend_evicts_under_facade() {
    let mut c = Cache::new(Box::new(MemoryBackend::with_capacity(2)));
    c.set("a", json!(1));
    c.set("b", json!(2));
    assert!(c.get("a").is_some()); // refresh `a`
    c.set("c", json!(3));

    assert_eq!(c.get("a"), Some(json!(1)));
    assert_eq!(c.get("b"), None);
    assert_eq!(c.get("c"), Some(json!(3)));
}

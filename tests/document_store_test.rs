//! Document Store Integration Tests
//!
//! Tests for path-addressed reads and writes including:
//! - set/get/delete invariants
//! - persistence across independent store instances
//! - on-disk layout
//! - change listeners

mod common;

use common::{TestFixture, read_file};
use recstore::{DocumentStore, Error, StoreConfig};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// =============================================================================
// Core Invariants
// =============================================================================

#[test]
fn test_set_then_get_returns_equal_value() {
    let mut fixture = TestFixture::new();
    let cases = [
        (vec!["Client", "1"], json!({"Name": "John", "Age": 40, "VIP": true})),
        (vec!["Airline"], json!({})),
        (vec!["deep", "er", "est"], json!([1, "two", null, {"three": 3.5}])),
        (vec!["leaf"], Value::Null),
    ];

    for (path, value) in cases {
        fixture.store.set(&path, value.clone()).unwrap();
        assert_eq!(fixture.store.get(&path).unwrap(), &value);
    }
}

#[test]
fn test_delete_then_get_is_not_found() {
    let mut fixture = TestFixture::new();
    fixture.store.set(&["Client", "1"], json!({"Name": "John"})).unwrap();

    fixture.store.delete(&["Client", "1"]).unwrap();

    let err = fixture.store.get(&["Client", "1"]).unwrap_err();
    assert!(matches!(err, Error::PathNotFound(_)));

    fixture.store.set(&["Client", "1"], json!({"Name": "Again"})).unwrap();
    assert_eq!(fixture.store.get(&["Client", "1", "Name"]).unwrap(), &json!("Again"));
}

#[test]
fn test_fresh_store_over_missing_file() {
    let fixture = TestFixture::new();

    for path in [vec!["Client"], vec!["Client", "1"], vec!["x", "y", "z"]] {
        assert!(fixture.store.get(&path).unwrap_err().is_not_found());
    }
}

#[test]
fn test_delete_missing_record() {
    let mut fixture = TestFixture::new();

    let err = fixture.store.delete(&["Client", "1"]).unwrap_err();
    assert!(err.is_not_found());
    assert!(!fixture.file_path().exists());
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_reopen_sees_previous_writes() {
    let mut fixture = TestFixture::new();
    fixture.store.set(&["Client", "1"], json!({"Name": "John"})).unwrap();

    let reopened = fixture.reopen();

    assert_eq!(reopened.get(&["Client", "1"]).unwrap(), &json!({"Name": "John"}));
}

#[test]
fn test_file_matches_memory_after_each_mutation() {
    let mut fixture = TestFixture::new();

    fixture.store.set(&["Client", "1"], json!({"Name": "John"})).unwrap();
    fixture.store.set(&["Flight", "F1", "Status"], json!("Pending")).unwrap();
    fixture.store.delete(&["Client", "1"]).unwrap();

    let expected = Value::Object(fixture.store.document().clone());
    assert_eq!(read_file(&fixture).unwrap(), expected);
    assert_eq!(expected, json!({"Client": {}, "Flight": {"F1": {"Status": "Pending"}}}));
}

#[test]
fn test_last_writer_wins_across_instances() {
    let mut fixture = TestFixture::new();
    let mut other = fixture.reopen();

    fixture.store.set(&["Client", "1"], json!("first")).unwrap();
    other.set(&["Client", "2"], json!("second")).unwrap();

    let reopened = fixture.reopen();
    assert!(!reopened.exists(&["Client", "1"]));
    assert!(reopened.exists(&["Client", "2"]));
}

#[test]
fn test_default_layout_is_four_space_json() {
    let mut fixture = TestFixture::new();
    fixture.store.set(&["Client", "1"], json!({"Name": "John"})).unwrap();

    let raw = std::fs::read_to_string(fixture.file_path()).unwrap();
    assert!(raw.starts_with("{\n    \"Client\": {\n        \"1\": {"));
}

#[test]
fn test_compact_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::builder()
        .data_dir(dir.path())
        .file_name("db.json")
        .compact_json()
        .build();
    let mut store = DocumentStore::with_config(config).unwrap();

    store.set(&["a"], json!({"b": 1})).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("db.json")).unwrap();
    assert_eq!(raw, r#"{"a":{"b":1}}"#);
}

#[test]
fn test_config_creates_missing_data_dir_on_first_write() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("not/yet/there");
    let config = StoreConfig::builder().data_dir(&data_dir).build();
    let mut store = DocumentStore::with_config(config).unwrap();

    assert!(!data_dir.exists());
    store.set(&["k"], json!(1)).unwrap();
    assert!(data_dir.join("records.json").is_file());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = StoreConfig::builder().file_name("").build();
    assert!(matches!(DocumentStore::with_config(config), Err(Error::Config(_))));
}

// =============================================================================
// Change Listeners
// =============================================================================

#[test]
fn test_listeners_fire_once_per_persisted_mutation() {
    let mut fixture = TestFixture::new();
    let all = Arc::new(AtomicUsize::new(0));
    let flights = Arc::new(AtomicUsize::new(0));

    let all_clone = all.clone();
    fixture.store.on_change(move |_, _, _| {
        all_clone.fetch_add(1, Ordering::SeqCst);
    });
    let flights_clone = flights.clone();
    fixture.store.watch("Flight", move |_, _, _| {
        flights_clone.fetch_add(1, Ordering::SeqCst);
    });

    fixture.store.set(&["Client", "1"], json!("leaf")).unwrap();
    fixture.store.set(&["Flight", "F1"], json!({})).unwrap();
    fixture.store.delete(&["Flight", "F1"]).unwrap();

    // Failed mutations stay silent
    assert!(fixture.store.delete(&["Flight", "F1"]).is_err());
    assert!(fixture.store.set(&["Client", "1", "Name"], json!(1)).is_err());

    assert_eq!(all.load(Ordering::SeqCst), 3);
    assert_eq!(flights.load(Ordering::SeqCst), 2);
}

#[test]
fn test_listener_sees_persisted_file() {
    let mut fixture = TestFixture::new();
    let path = fixture.file_path();
    let seen = Arc::new(std::sync::Mutex::new(None));
    let seen_clone = seen.clone();

    fixture.store.on_change(move |_, _, _| {
        let content = std::fs::read_to_string(&path).unwrap();
        *seen_clone.lock().unwrap() = Some(serde_json::from_str::<Value>(&content).unwrap());
    });

    fixture.store.set(&["Client", "1"], json!("x")).unwrap();

    assert_eq!(
        seen.lock().unwrap().clone(),
        Some(json!({"Client": {"1": "x"}}))
    );
}

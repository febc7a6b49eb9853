//! Specs for flush policy and durable round-trips

use crate::prelude::*;
use burrow_core::{MemoryStore, Settings, Value};
use burrow_storage::{FileStore, InitError, StorageAdapter};

#[test]
fn without_flush_on_write_mutations_are_not_durable_until_flush() {
    let mut adapter = memory_adapter();
    adapter.set("a", v(serde_json::json!(1)));

    // A fresh adapter over the same slot sees the pre-mutation state
    let store = adapter.into_store();
    let adapter = StorageAdapter::open(store, Settings::default()).unwrap();
    assert_eq!(adapter.get("a"), None);
}

#[test]
fn explicit_flush_makes_mutations_durable() {
    let mut adapter = memory_adapter();
    adapter.set("a", v(serde_json::json!(1)));
    adapter.flush().unwrap();

    let adapter = StorageAdapter::open(adapter.into_store(), Settings::default()).unwrap();
    assert_eq!(adapter.get("a"), Some(v(serde_json::json!(1))));
}

#[test]
fn flush_on_write_makes_every_mutation_immediately_durable() {
    let settings = Settings::default().with_flush_on_write(true);
    let mut adapter = StorageAdapter::open(MemoryStore::new(), settings).unwrap();

    adapter.set("user", v(serde_json::json!({"name": "Ada"})));
    adapter.set("user.name", v(serde_json::json!("Grace")));

    let adapter = StorageAdapter::open(adapter.into_store(), Settings::default()).unwrap();
    assert_eq!(adapter.get("user.name"), Some(Value::from("Grace")));
}

#[test]
fn round_trip_reproduces_an_equivalent_document() {
    let mut adapter = memory_adapter();
    adapter.set(
        "profile",
        v(serde_json::json!({
            "name": "Ada",
            "years": [1815, 1852],
            "meta": {"fields": {"active": false, "note": null}}
        })),
    );
    adapter.flush().unwrap();
    let before = adapter.document();

    let adapter = StorageAdapter::open(adapter.into_store(), Settings::default()).unwrap();
    similar_asserts::assert_eq!(adapter.document(), before);
}

#[test]
fn empty_resets_memory_and_slot() {
    let mut adapter = memory_adapter();
    adapter.set("a", v(serde_json::json!(1)));
    adapter.flush().unwrap();

    adapter.empty();
    assert_eq!(adapter.get("a"), None);
    assert_eq!(adapter.store().slot("storage"), Some("{}"));
}

#[test]
fn corrupt_slot_text_fails_construction() {
    let store = MemoryStore::new().with_slot("storage", "][ not json");
    let err = StorageAdapter::open(store, Settings::default()).unwrap_err();
    assert!(matches!(err, InitError::Corrupt { .. }));
}

#[test]
fn corrupt_slot_is_not_overwritten_by_a_failed_open() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("storage.json"), "{not json").unwrap();

    let store = FileStore::open(dir.path()).unwrap();
    assert!(StorageAdapter::open(store, Settings::default()).is_err());

    // The unreadable text is untouched, available for manual recovery
    let text = std::fs::read_to_string(dir.path().join("storage.json")).unwrap();
    assert_eq!(text, "{not json");
}

#[test]
fn non_object_slot_text_fails_construction() {
    let store = MemoryStore::new().with_slot("storage", "\"scalar\"");
    let err = StorageAdapter::open(store, Settings::default()).unwrap_err();
    assert!(matches!(err, InitError::NotAnObject { kind: "string", .. }));
}

#[test]
fn file_store_round_trips_across_adapters() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::default()
        .with_storage_key("prefs")
        .with_flush_on_write(true);

    let store = FileStore::open(dir.path()).unwrap();
    let mut adapter = StorageAdapter::open(store, settings.clone()).unwrap();
    adapter.set("theme", v(serde_json::json!("dark")));
    drop(adapter);

    let store = FileStore::open(dir.path()).unwrap();
    let adapter = StorageAdapter::open(store, settings).unwrap();
    assert_eq!(adapter.get("theme"), Some(Value::from("dark")));
    assert!(dir.path().join("prefs.json").exists());
}

#[test]
fn serialize_matches_the_flushed_slot() {
    let mut adapter = memory_adapter();
    adapter.set("k", v(serde_json::json!({"x": [1, 2, 3]})));
    adapter.flush().unwrap();

    let text = adapter.serialize().unwrap();
    assert_eq!(adapter.store().slot("storage"), Some(text.as_str()));
}

//! Specs for lifecycle notification ordering and isolation

use crate::prelude::*;
use burrow_core::{EventPattern, Settings, StoreEvent, Subscription};

#[test]
fn construction_publishes_save_then_init() {
    let (_adapter, mut rx) = observed_adapter(Settings::default());
    assert_eq!(drain_names(&mut rx), ["store:save", "store:init"]);
}

#[test]
fn each_operation_publishes_exactly_one_notification() {
    let (mut adapter, mut rx) = observed_adapter(Settings::default());
    drain_names(&mut rx);

    adapter.set("a", v(serde_json::json!(1)));
    adapter.get("a");
    adapter.remove("a");
    adapter.flush().unwrap();

    assert_eq!(
        drain_names(&mut rx),
        ["store:set", "store:get", "store:remove", "store:save"]
    );
}

#[test]
fn flush_on_write_orders_save_before_the_operation_event() {
    let settings = Settings::default().with_flush_on_write(true);
    let (mut adapter, mut rx) = observed_adapter(settings);
    drain_names(&mut rx);

    adapter.set("a", v(serde_json::json!(1)));
    adapter.remove("a");

    assert_eq!(
        drain_names(&mut rx),
        ["store:save", "store:set", "store:save", "store:remove"]
    );
}

#[test]
fn empty_publishes_save_then_emptied() {
    let (mut adapter, mut rx) = observed_adapter(Settings::default());
    drain_names(&mut rx);

    adapter.empty();
    assert_eq!(drain_names(&mut rx), ["store:save", "store:emptied"]);
}

#[test]
fn get_notification_carries_the_resolved_value() {
    let bus = burrow_core::EventBus::new();
    let sub = Subscription::new("reads", vec![EventPattern::new("store:get")], "Reads");
    let mut rx = bus.subscribe(sub);

    let mut adapter = burrow_storage::StorageAdapter::open_with_bus(
        burrow_core::MemoryStore::new(),
        Settings::default(),
        bus,
    )
    .unwrap();
    adapter.set("name", v(serde_json::json!("Ada")));
    adapter.get("name");
    adapter.get("ghost");

    assert_eq!(
        rx.try_recv().unwrap(),
        StoreEvent::Get {
            value: Some(v(serde_json::json!("Ada")))
        }
    );
    assert_eq!(rx.try_recv().unwrap(), StoreEvent::Get { value: None });
}

#[test]
fn set_notification_carries_key_and_value_even_for_dropped_writes() {
    let (mut adapter, mut rx) = observed_adapter(Settings::default());
    drain_names(&mut rx);

    adapter.set("no.parent", v(serde_json::json!("lost")));

    let event = rx.try_recv().unwrap();
    assert_eq!(
        event,
        StoreEvent::Set {
            key: "no.parent".to_string(),
            value: v(serde_json::json!("lost")),
        }
    );
}

#[test]
fn a_failing_subscriber_does_not_affect_the_adapter() {
    let bus = burrow_core::EventBus::new();

    // This subscriber drops its receiver immediately: every later publish
    // to it fails, which the adapter must shrug off
    let dead = Subscription::new("dead", vec![EventPattern::new("store:*")], "Dropped");
    drop(bus.subscribe(dead));

    let live = Subscription::new("live", vec![EventPattern::new("store:*")], "Alive");
    let mut rx = bus.subscribe(live);

    let mut adapter = burrow_storage::StorageAdapter::open_with_bus(
        burrow_core::MemoryStore::new(),
        Settings::default(),
        bus,
    )
    .unwrap();
    adapter.set("a", v(serde_json::json!(1)));
    assert_eq!(adapter.get("a"), Some(v(serde_json::json!(1))));

    let names = drain_names(&mut rx);
    assert!(names.contains(&"store:set".to_string()));
}

#[test]
fn subscribers_see_only_matching_events() {
    let bus = burrow_core::EventBus::new();
    let sub = Subscription::new(
        "saves-only",
        vec![EventPattern::new("store:save")],
        "Saves",
    );
    let mut rx = bus.subscribe(sub);

    let mut adapter = burrow_storage::StorageAdapter::open_with_bus(
        burrow_core::MemoryStore::new(),
        Settings::default(),
        bus,
    )
    .unwrap();
    adapter.set("a", v(serde_json::json!(1)));
    adapter.flush().unwrap();

    // Init save plus the explicit flush; the set was filtered out
    assert_eq!(drain_names(&mut rx), ["store:save", "store:save"]);
}

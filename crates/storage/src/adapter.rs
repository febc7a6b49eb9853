// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The storage adapter: persistence sync and lifecycle notifications
//!
//! One adapter owns one in-memory [`Document`] synchronized with one slot
//! of a [`DurableStore`]. Memory is the source of truth between flushes; a
//! flush serializes the whole document and overwrites the slot.

use burrow_core::{
    Container, Document, DurableStore, EventBus, Settings, StoreError, StoreEvent, Value,
};
use thiserror::Error;
use tracing::{debug, error};

/// Fatal construction errors; the adapter never exists half-initialized
#[derive(Debug, Error)]
pub enum InitError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("existing text under {key:?} is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("document under {key:?} must be a JSON object, got {kind}")]
    NotAnObject { key: String, kind: &'static str },
    #[error("initial flush failed: {0}")]
    Flush(#[from] FlushError),
}

/// Errors from a single flush attempt
///
/// Fatal for that flush only; the in-memory mutation that triggered it is
/// never rolled back.
#[derive(Debug, Error)]
pub enum FlushError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// An embedded document store bound to one durable slot
///
/// Construction loads (or seeds) the persisted document; afterwards the
/// adapter is fully synchronous. With `flush_on_write` every `set`/`remove`
/// call persists immediately; otherwise only `flush()` and `empty()` write
/// to the store.
///
/// Caveat, inherited from the persisted-key format: a nested `set` through
/// a missing or non-container intermediate is silently dropped, and `set`
/// still returns the input value. Callers that need the distinction check
/// `get` afterwards or use [`Document::set`] directly.
#[derive(Debug)]
pub struct StorageAdapter<S: DurableStore> {
    store: S,
    settings: Settings,
    document: Document,
    bus: EventBus,
    last_flush_error: Option<FlushError>,
}

impl<S: DurableStore> StorageAdapter<S> {
    /// Open an adapter with its own event bus
    pub fn open(store: S, settings: Settings) -> Result<Self, InitError> {
        Self::open_with_bus(store, settings, EventBus::new())
    }

    /// Open an adapter publishing on an existing bus
    ///
    /// Reads the slot; existing text must parse as a JSON object
    /// (malformed text is fatal rather than silently discarded). An
    /// unwritten slot is seeded with `"{}"`. Construction always flushes
    /// once so the stored text reflects the current encoding, publishing
    /// `store:save` and then `store:init`.
    pub fn open_with_bus(
        mut store: S,
        settings: Settings,
        bus: EventBus,
    ) -> Result<Self, InitError> {
        let document = match store.read_raw(&settings.storage_key)? {
            Some(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Container(root)) => Document::from_container(root),
                Ok(other) => {
                    return Err(InitError::NotAnObject {
                        key: settings.storage_key.clone(),
                        kind: other.kind(),
                    })
                }
                Err(source) => {
                    return Err(InitError::Corrupt {
                        key: settings.storage_key.clone(),
                        source,
                    })
                }
            },
            None => {
                debug!(key = %settings.storage_key, "seeding empty document");
                store.write_raw(&settings.storage_key, "{}")?;
                Document::new()
            }
        };

        let mut adapter = Self {
            store,
            settings,
            document,
            bus,
            last_flush_error: None,
        };
        adapter.flush()?;

        debug!(key = %adapter.settings.storage_key, "storage adapter initialized");
        adapter.bus.publish(StoreEvent::Init);
        Ok(adapter)
    }

    /// Read the value at a key; `None` when the path is absent at any point
    pub fn get(&self, key: &str) -> Option<Value> {
        let value = self.document.get(key).cloned();
        self.bus.publish(StoreEvent::Get {
            value: value.clone(),
        });
        value
    }

    /// Read the value at a key as JSON text
    pub fn get_json(&self, key: &str) -> Option<String> {
        let value = self.get(key)?;
        serde_json::to_string(&value).ok()
    }

    /// Write a value at a key, returning the value passed in
    ///
    /// The return value does not distinguish an applied write from a
    /// nested write that was silently dropped (see the type-level caveat).
    /// With `flush_on_write` the document is persisted after every call,
    /// applied or not.
    pub fn set(&mut self, key: &str, value: Value) -> Value {
        self.document.set(key, value.clone());
        if self.settings.flush_on_write {
            self.flush_or_record();
        }
        self.bus.publish(StoreEvent::Set {
            key: key.to_string(),
            value: value.clone(),
        });
        value
    }

    /// Delete the entry at a key; no-op and no error when absent
    pub fn remove(&mut self, key: &str) {
        self.document.remove(key);
        if self.settings.flush_on_write {
            self.flush_or_record();
        }
        self.bus.publish(StoreEvent::Remove {
            key: key.to_string(),
        });
    }

    /// Serialize the document and write it to the durable slot
    pub fn flush(&mut self) -> Result<(), FlushError> {
        let text = self.document.serialize()?;
        self.store.write_raw(&self.settings.storage_key, &text)?;
        self.last_flush_error = None;
        self.bus.publish(StoreEvent::Save);
        Ok(())
    }

    /// Reset the document to an empty container and persist immediately
    pub fn empty(&mut self) {
        self.document.empty();
        self.flush_or_record();
        self.bus.publish(StoreEvent::Emptied);
    }

    /// Whole-document JSON text
    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        self.document.serialize()
    }

    /// Deep-copy snapshot of the full tree
    pub fn document(&self) -> Container {
        self.document.to_container()
    }

    /// Error from the most recent auto-flush, if it failed
    ///
    /// `set`/`remove`/`empty` keep infallible signatures; a flush they
    /// trigger that fails is recorded here (and logged) instead of
    /// surfaced. Cleared by the next successful flush.
    pub fn last_flush_error(&self) -> Option<&FlushError> {
        self.last_flush_error.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the adapter, returning the store handle
    pub fn into_store(self) -> S {
        self.store
    }

    fn flush_or_record(&mut self) {
        if let Err(err) = self.flush() {
            error!(
                key = %self.settings.storage_key,
                error = %err,
                "auto-flush failed; in-memory document retained"
            );
            self.last_flush_error = Some(err);
        }
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable store binding
//!
//! The adapter never touches a global persistent namespace; it owns one
//! handle implementing this trait, passed in at construction.

use std::collections::HashMap;
use thiserror::Error;

/// Errors from durable store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A key-value slot the document is serialized into
///
/// One slot holds one whole document as JSON text. `read_raw` returns
/// `None` for a slot that has never been written.
pub trait DurableStore {
    fn read_raw(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// A write observed by [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub key: String,
    pub value: String,
}

/// In-memory durable store for tests
///
/// Records every write so tests can assert on flush behavior, and can be
/// told to fail writes to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
    writes: Vec<RecordedWrite>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a slot, for tests starting from existing persisted text
    pub fn with_slot(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.slots.insert(key.into(), text.into());
        self
    }

    /// Make every subsequent write fail with a permission error
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Current contents of a slot
    pub fn slot(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    /// All writes in order, including overwrites
    pub fn writes(&self) -> &[RecordedWrite] {
        &self.writes
    }
}

impl DurableStore for MemoryStore {
    fn read_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "writes disabled",
            )));
        }
        self.writes.push(RecordedWrite {
            key: key.to_string(),
            value: value.to_string(),
        });
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

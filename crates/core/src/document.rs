// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The in-memory document tree

use crate::path::Path;
use crate::resolve::{resolve_get, resolve_remove, resolve_set};
use crate::value::{Container, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document root must be a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },
}

/// The full nested key-value tree owned by one adapter instance
///
/// All operations are synchronous and infallible. Keys are flat
/// (`"name"`) or dot-delimited (`"user.profile.name"`); nested keys
/// traverse containers that already exist and never create intermediates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Container,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_container(root: Container) -> Self {
        Self { root }
    }

    /// Parse a document from JSON text; the root must be an object
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Container(root) => Ok(Self { root }),
            other => Err(DocumentError::NotAnObject { kind: other.kind() }),
        }
    }

    /// Read the value at a key; `None` when the path is absent at any point
    pub fn get(&self, key: &str) -> Option<&Value> {
        resolve_get(&self.root, &Path::parse(key))
    }

    /// Write a value at a key
    ///
    /// Caveat: a nested write through a missing or non-container
    /// intermediate is silently dropped. The returned `bool` reports
    /// whether the write applied; the adapter surface deliberately
    /// discards it.
    pub fn set(&mut self, key: &str, value: Value) -> bool {
        resolve_set(&mut self.root, &Path::parse(key), value)
    }

    /// Delete the entry at a key, returning the prior value
    ///
    /// No-op and no error when the key is absent or traversal fails.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        resolve_remove(&mut self.root, &Path::parse(key))
    }

    pub fn root(&self) -> &Container {
        &self.root
    }

    /// Deep-copy snapshot; mutating it cannot affect this document
    pub fn to_container(&self) -> Container {
        self.root.clone()
    }

    /// Replace the tree with an empty container
    pub fn empty(&mut self) {
        self.root = Container::new();
    }

    /// Whole-document JSON text
    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.root)
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;

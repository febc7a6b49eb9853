// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure path resolution against a document tree
//!
//! Traversal only descends through containers that already exist —
//! intermediate containers are never auto-created, and a write through a
//! missing or non-container intermediate is silently dropped. That policy
//! is observable behavior the rest of the crate depends on; callers that
//! need the write/no-op distinction use the `bool` returned by
//! [`resolve_set`].

use crate::path::Path;
use crate::value::{Container, Value};

/// Resolve a path for reading
///
/// Walks every parent segment; descends only while the node at each
/// segment is a container. Returns `None` when traversal fails at any
/// intermediate segment or the final entry is absent.
pub fn resolve_get<'a>(root: &'a Container, path: &Path) -> Option<&'a Value> {
    if path.is_flat() {
        return root.get(path.last());
    }

    let mut current = root;
    for segment in path.parents() {
        current = current.get(segment)?.as_container()?;
    }
    current.get(path.last())
}

/// Resolve a path for writing
///
/// Same traversal rule as [`resolve_get`]. On success the final entry is
/// overwritten unconditionally, including replacing a container with a
/// scalar or vice versa. On traversal failure the write is dropped and
/// `false` is returned; nothing is created or modified.
pub fn resolve_set(root: &mut Container, path: &Path, value: Value) -> bool {
    if path.is_flat() {
        root.insert(path.last().to_string(), value);
        return true;
    }

    let mut current = root;
    for segment in path.parents() {
        match current.get_mut(segment).and_then(Value::as_container_mut) {
            Some(next) => current = next,
            None => return false,
        }
    }
    current.insert(path.last().to_string(), value);
    true
}

/// Resolve a path for deletion
///
/// Same traversal rule. Removes and returns the prior value on success;
/// returns `None` without error when traversal fails or the entry is
/// absent.
pub fn resolve_remove(root: &mut Container, path: &Path) -> Option<Value> {
    if path.is_flat() {
        return root.remove(path.last());
    }

    let mut current = root;
    for segment in path.parents() {
        current = current.get_mut(segment)?.as_container_mut()?;
    }
    current.remove(path.last())
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle notifications emitted by the storage adapter

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// One notification fires per completed adapter operation, after the
/// in-memory mutation and any triggered flush have taken effect. Payloads
/// are constructed fresh per publication; nothing is shared or reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// Adapter finished initializing against its durable slot
    Init,
    /// A read completed; payload is the resolved value, `None` on a miss
    Get { value: Option<Value> },
    /// A write call completed (including silently dropped nested writes)
    Set { key: String, value: Value },
    /// A delete call completed
    Remove { key: String },
    /// The document was serialized and written to the durable store
    Save,
    /// The document was reset to an empty container
    Emptied,
}

impl StoreEvent {
    /// Event name for pattern matching, in `category:action` form
    pub fn name(&self) -> String {
        match self {
            StoreEvent::Init => "store:init".to_string(),
            StoreEvent::Get { .. } => "store:get".to_string(),
            StoreEvent::Set { .. } => "store:set".to_string(),
            StoreEvent::Remove { .. } => "store:remove".to_string(),
            StoreEvent::Save => "store:save".to_string(),
            StoreEvent::Emptied => "store:emptied".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

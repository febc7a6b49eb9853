// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only audit trail of store events

use super::subscription::EventPattern;
use crate::event::StoreEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// A logged event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Monotonic sequence number
    pub sequence: u64,
    /// Wall-clock time the event was recorded
    pub at: DateTime<Utc>,
    /// The event name
    pub name: String,
    /// The full event payload
    pub event: StoreEvent,
}

/// JSONL event log; one record per line
pub struct EventLog {
    path: PathBuf,
    file: File,
    sequence: u64,
}

impl EventLog {
    /// Open or create an event log at the given path
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        // Count existing entries to continue the sequence
        let sequence = BufReader::new(File::open(&path)?).lines().count() as u64;

        Ok(Self {
            path,
            file,
            sequence,
        })
    }

    /// Append an event to the log
    pub fn append(&mut self, event: StoreEvent) -> io::Result<EventRecord> {
        self.sequence += 1;

        let record = EventRecord {
            sequence: self.sequence,
            at: Utc::now(),
            name: event.name(),
            event,
        };

        let json = serde_json::to_string(&record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(self.file, "{}", json)?;

        Ok(record)
    }

    /// Read all records from the log
    pub fn read_all(&self) -> io::Result<Vec<EventRecord>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let record: EventRecord = serde_json::from_str(&line)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            records.push(record);
        }

        Ok(records)
    }

    /// Query records by name pattern
    pub fn query(&self, pattern: &EventPattern) -> io::Result<Vec<EventRecord>> {
        let all = self.read_all()?;
        Ok(all
            .into_iter()
            .filter(|r| pattern.matches(&r.name))
            .collect())
    }

    /// Query records after a sequence number
    pub fn after(&self, sequence: u64) -> io::Result<Vec<EventRecord>> {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(|r| r.sequence > sequence).collect())
    }

    /// Get current sequence number
    pub fn current_sequence(&self) -> u64 {
        self.sequence
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;

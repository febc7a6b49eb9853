//! burrow-storage: Durable bindings and the storage adapter
//!
//! This crate provides:
//! - `FileStore` - A file-per-slot durable store
//! - `StorageAdapter` - The document store bound to one durable slot,
//!   with flush policy and lifecycle notifications

pub mod adapter;
pub mod file;

pub use adapter::{FlushError, InitError, StorageAdapter};
pub use file::FileStore;

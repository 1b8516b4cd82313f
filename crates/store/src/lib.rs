//! # recordbook-store
//!
//! The record store boundary.
//!
//! A store does two things: insert a record and hand back its new id, and
//! list everything it holds. [`FirestoreStore`] talks to Cloud Firestore over
//! its REST API; [`MemoryStore`] keeps records in process.

use async_trait::async_trait;
use recordbook_core::{Record, StoredRecord};

/// Store configuration.
pub mod config;
/// Error types and result aliases.
pub mod error;
mod firestore;
mod memory;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

/// An external document store holding records.
///
/// Failures are returned as values; implementations never panic on a bad
/// response. Nothing is retried.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist one record and return the id the store assigned to it.
    async fn insert(&self, record: &Record) -> StoreResult<String>;

    /// Fetch every stored record. Always goes to the store; no caching.
    async fn list_all(&self) -> StoreResult<Vec<StoredRecord>>;
}

//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and the
//! storage/notification infrastructure. Implementations live in other
//! crates (`vellum-store`, `vellum-pipeline`).

use crate::{DocumentRef, FetchError, Notification, NotificationError, PersistenceError};
use crate::{RecordKey, StoredRecord};
use async_trait::async_trait;

/// Resolves a document reference to its raw text content
///
/// Implemented by the infrastructure layer (vellum-store). A fetch has no
/// side effects beyond a read.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Read the document's content as UTF-8 text
    async fn fetch(&self, document: &DocumentRef) -> Result<String, FetchError>;
}

/// Push channel used to reach a human reviewer
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Deliver one notification; either fully delivered or an error
    async fn deliver(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// Durable store for final records
///
/// Implemented by the infrastructure layer (vellum-store). Writes are
/// upserts keyed by `(id, language)`; concurrent writes to the same key are
/// last-write-wins.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert or overwrite the record sharing this record's key
    async fn put(&self, record: &StoredRecord) -> Result<(), PersistenceError>;

    /// Read a record back by its composite key
    async fn get(&self, key: &RecordKey) -> Result<Option<StoredRecord>, PersistenceError>;
}

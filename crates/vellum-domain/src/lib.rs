//! Vellum Domain Layer
//!
//! This crate contains the data model shared by every stage of the Vellum
//! document pipeline, together with the trait interfaces for the external
//! collaborators the pipeline talks to. It carries no I/O of its own.
//!
//! ## Key Concepts
//!
//! - **DocumentRef**: `{bucket, key}` identity of a triggering storage event
//! - **ExtractedMetadata**: document type, language and summary produced by the LLM
//! - **GuardrailDisposition**: the content-safety verdict (pass / intervened)
//! - **TaskResult**: tagged outcome of one extraction task
//! - **StoredRecord**: the final upserted record, keyed by `(id, language)`
//!
//! ## Architecture
//!
//! Infrastructure implementations (filesystem fetcher, SQLite store,
//! webhook channel, ...) live in other crates and implement the traits in
//! [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod disposition;
pub mod document;
pub mod error;
pub mod metadata;
pub mod notification;
pub mod record;
pub mod run;
pub mod task;
pub mod traits;

// Re-exports for convenience
pub use disposition::GuardrailDisposition;
pub use document::DocumentRef;
pub use error::{FetchError, NotificationError, PersistenceError};
pub use metadata::ExtractedMetadata;
pub use notification::Notification;
pub use record::{RecordKey, RecordStatus, StoredRecord};
pub use run::RunId;
pub use task::{TaskOutcome, TaskResult};

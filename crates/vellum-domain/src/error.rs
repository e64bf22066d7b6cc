//! Error taxonomy for the collaborator boundaries owned by the domain
//!
//! Extraction and evaluation errors live with their components
//! (`vellum-extractor`, `vellum-gatekeeper`).

use thiserror::Error;

/// Errors resolving a document reference to its content
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The reference does not resolve to a document
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Retryable access failure
    #[error("Transient I/O error: {0}")]
    TransientIo(String),
}

impl FetchError {
    /// Whether an adapter may retry the read
    ///
    /// Only `TransientIo` is retried; a missing document stays missing.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::TransientIo(_))
    }
}

/// Delivery failure on the escalation channel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Notification error: {0}")]
pub struct NotificationError(pub String);

/// Write failure in the result store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Persistence error: {0}")]
pub struct PersistenceError(pub String);

//! Error types for pipeline runs

use std::time::Duration;
use thiserror::Error;
use vellum_domain::{NotificationError, PersistenceError};

/// Why a run ended in the `Failed` state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// Fetch, extraction or evaluation failed; carries the task's message
    #[error("{0}")]
    Extraction(String),

    /// Escalation could not be delivered
    #[error(transparent)]
    Notification(#[from] NotificationError),

    /// Final record could not be written
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Run exceeded its time budget
    #[error("Run timed out after {0:?}")]
    Timeout(Duration),

    /// Trigger envelope did not carry a document reference
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

impl RunError {
    /// Stage the run failed in
    pub fn stage(&self) -> &'static str {
        match self {
            RunError::Extraction(_) => "extraction",
            RunError::Notification(_) => "notification",
            RunError::Persistence(_) => "persistence",
            RunError::Timeout(_) => "timeout",
            RunError::InvalidEvent(_) => "invalid_event",
        }
    }
}

/// Errors from the worker loop itself
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}

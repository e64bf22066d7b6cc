//! Task result - the tagged outcome of one extraction task

use crate::{DocumentRef, ExtractedMetadata, GuardrailDisposition};

/// Status string for a task that passed the guardrail
pub const STATUS_SUCCEEDED: &str = "SUCCEEDED";

/// Status string for a task the guardrail intervened on
pub const STATUS_GUARDRAIL_INTERVENED: &str = "GUARDRAIL_INTERVENED";

/// Status string for a failed task
pub const STATUS_FAILED: &str = "FAILED";

/// What the extraction task produced
///
/// `Succeeded` always carries metadata and `Failed` never does; the shape
/// of the enum is the invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Fetch, extraction and evaluation all completed
    Succeeded {
        /// Extracted metadata
        metadata: ExtractedMetadata,
        /// Guardrail verdict on the content and metadata
        disposition: GuardrailDisposition,
    },

    /// One of the steps failed
    Failed {
        /// Human-readable error message
        error: String,
    },
}

/// Result of one extraction task, always tied to its originating document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    /// Document that triggered the task
    pub document: DocumentRef,

    /// Tagged outcome
    pub outcome: TaskOutcome,
}

impl TaskResult {
    /// Build a successful result
    pub fn succeeded(
        document: DocumentRef,
        metadata: ExtractedMetadata,
        disposition: GuardrailDisposition,
    ) -> Self {
        Self {
            document,
            outcome: TaskOutcome::Succeeded {
                metadata,
                disposition,
            },
        }
    }

    /// Build a failed result
    pub fn failed(document: DocumentRef, error: impl Into<String>) -> Self {
        Self {
            document,
            outcome: TaskOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// Wire status of the result
    pub fn status(&self) -> &'static str {
        match &self.outcome {
            TaskOutcome::Succeeded {
                disposition: GuardrailDisposition::Pass,
                ..
            } => STATUS_SUCCEEDED,
            TaskOutcome::Succeeded {
                disposition: GuardrailDisposition::Intervened,
                ..
            } => STATUS_GUARDRAIL_INTERVENED,
            TaskOutcome::Failed { .. } => STATUS_FAILED,
        }
    }

    /// Metadata, if the task succeeded
    pub fn metadata(&self) -> Option<&ExtractedMetadata> {
        match &self.outcome {
            TaskOutcome::Succeeded { metadata, .. } => Some(metadata),
            TaskOutcome::Failed { .. } => None,
        }
    }

    /// Error message, if the task failed
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            TaskOutcome::Succeeded { .. } => None,
            TaskOutcome::Failed { error } => Some(error),
        }
    }

    /// Whether the task failed
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, TaskOutcome::Failed { .. })
    }
}

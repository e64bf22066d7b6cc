//! Gatekeeper error types

use thiserror::Error;
use vellum_llm::LlmError;

/// Errors that can occur during safety evaluation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatekeeperError {
    /// Guardrail service transport error (message passed through as-is)
    #[error("{0}")]
    Service(#[from] LlmError),

    /// Metadata could not be serialized for evaluation
    #[error("Failed to serialize metadata: {0}")]
    Serialization(String),
}

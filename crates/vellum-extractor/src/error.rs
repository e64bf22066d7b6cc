//! Error types for the Extractor

use thiserror::Error;
use vellum_llm::LlmError;

/// Message reported for any structurally unusable model reply
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Invalid JSON Generated.";

/// Errors that can occur during extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// Reply had no usable metadata tool invocation
    ///
    /// `detail` is for logs only; the display message is fixed.
    #[error("Invalid JSON Generated.")]
    MalformedResponse {
        /// What was wrong with the reply
        detail: String,
    },

    /// Inference service transport error
    #[error("Inference service error: {0}")]
    Inference(#[from] LlmError),

    /// Content exceeds the configured maximum
    #[error("Content too long: {0} chars (max: {1})")]
    ContentTooLong(usize, usize),
}

impl ExtractorError {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        ExtractorError::MalformedResponse {
            detail: detail.into(),
        }
    }

    /// Whether this is a structural failure of the model reply
    pub fn is_malformed(&self) -> bool {
        matches!(self, ExtractorError::MalformedResponse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_is_fixed() {
        let err = ExtractorError::malformed("no tool invocation named 'print_document_metadata'");
        assert_eq!(err.to_string(), MALFORMED_RESPONSE_MESSAGE);
        assert!(err.is_malformed());
    }

    #[test]
    fn test_inference_error_wraps_transport() {
        let err: ExtractorError = LlmError::Communication("connection refused".into()).into();
        assert_eq!(
            err.to_string(),
            "Inference service error: Communication error: connection refused"
        );
        assert!(!err.is_malformed());
    }
}

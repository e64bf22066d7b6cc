//! Vellum LLM Service Layer
//!
//! Clients for the two model-side services the pipeline depends on: the
//! prompt-based inference endpoint used for metadata extraction and the
//! guardrail endpoint used for content-safety evaluation.
//!
//! # Architecture
//!
//! Each service is a trait ([`InferenceService`], [`GuardrailService`]) with
//! its request/response wire types next to it. Two implementations exist
//! for each:
//!
//! - `Mock*`: deterministic, records requests, for tests
//! - `Http*`: JSON over HTTP with bounded retries
//!
//! # Examples
//!
//! ```
//! use vellum_llm::{ContentItem, InferenceRequest, InferenceResponse, InferenceService, MockInference};
//!
//! let response = InferenceResponse::from_content(vec![ContentItem::text("hello")]);
//! let service = MockInference::new(response.clone());
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let got = rt
//!     .block_on(service.converse(&InferenceRequest::new("prompt:1", "some text")))
//!     .unwrap();
//! assert_eq!(got, response);
//! assert_eq!(service.call_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod guardrail;
pub mod http;
pub mod inference;
pub mod mock;

use thiserror::Error;

pub use guardrail::{
    GuardrailContent, GuardrailRequest, GuardrailResponse, GuardrailService, GuardrailSource,
    GuardrailText, HttpGuardrailClient, Qualifier, ACTION_INTERVENED, ACTION_NONE,
};
pub use http::{HttpClientConfig, JsonHttpClient};
pub use inference::{
    ContentItem, HttpInferenceClient, InferenceOutput, InferenceRequest, InferenceResponse,
    InferenceService, Message, PromptVariables, ToolUse,
};
pub use mock::{MockGuardrail, MockInference};

/// Errors that can occur talking to the inference or guardrail service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Service rejected the request (non-retryable 4xx)
    #[error("Request rejected (HTTP {status}): {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether a retry may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, LlmError::Communication(_) | LlmError::RateLimitExceeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(LlmError::Communication("reset".into()).is_retryable());
        assert!(LlmError::RateLimitExceeded.is_retryable());
        assert!(!LlmError::InvalidResponse("bad json".into()).is_retryable());
        assert!(!LlmError::Rejected {
            status: 400,
            body: "bad prompt id".into()
        }
        .is_retryable());
    }
}

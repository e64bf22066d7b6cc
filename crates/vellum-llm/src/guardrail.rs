//! Guardrail evaluation service
//!
//! The guardrail receives an ordered list of qualified text segments and
//! answers with a single action string.

use crate::http::{HttpClientConfig, JsonHttpClient};
use crate::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Path of the apply operation on the guardrail endpoint
pub const APPLY_PATH: &str = "/guardrail/apply";

/// Action reported when the guardrail lets the content through
pub const ACTION_NONE: &str = "NONE";

/// Action reported when the guardrail blocks or flags the content
pub const ACTION_INTERVENED: &str = "GUARDRAIL_INTERVENED";

/// Request to evaluate content against a guardrail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailRequest {
    /// Guardrail identifier
    pub guardrail_identifier: String,

    /// Pinned guardrail version
    pub guardrail_version: String,

    /// Whether the content is model input or output
    pub source: GuardrailSource,

    /// Ordered, qualified text segments
    pub content: Vec<GuardrailContent>,
}

/// Which side of the model the evaluated content sits on
///
/// The pipeline only evaluates model input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardrailSource {
    /// Model input
    Input,
}

/// One content block of a guardrail request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailContent {
    /// Text block
    pub text: GuardrailText,
}

impl GuardrailContent {
    /// A text block with its qualifiers
    pub fn new(text: impl Into<String>, qualifiers: Vec<Qualifier>) -> Self {
        Self {
            text: GuardrailText {
                text: text.into(),
                qualifiers,
            },
        }
    }
}

/// Qualified text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailText {
    /// The text itself
    pub text: String,

    /// How the guardrail should treat the text
    pub qualifiers: Vec<Qualifier>,
}

/// Role of a text segment in the evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualifier {
    /// Reference material the answer must be grounded in
    GroundingSource,
    /// Content to screen against the policy
    GuardContent,
    /// The question that was asked of the model
    Query,
}

/// Guardrail reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailResponse {
    /// Action taken (`NONE` or `GUARDRAIL_INTERVENED`)
    pub action: String,
}

impl GuardrailResponse {
    /// Reply with the given action
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }
}

/// Guardrail endpoint
#[async_trait]
pub trait GuardrailService: Send + Sync {
    /// Evaluate the request's segments against the guardrail
    async fn apply(&self, request: &GuardrailRequest) -> Result<GuardrailResponse, LlmError>;
}

/// HTTP client for the guardrail endpoint
#[derive(Debug, Clone)]
pub struct HttpGuardrailClient {
    http: JsonHttpClient,
}

impl HttpGuardrailClient {
    /// Create a client from endpoint settings
    pub fn new(config: HttpClientConfig) -> Result<Self, LlmError> {
        Ok(Self {
            http: JsonHttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl GuardrailService for HttpGuardrailClient {
    async fn apply(&self, request: &GuardrailRequest) -> Result<GuardrailResponse, LlmError> {
        self.http.post_json(APPLY_PATH, request).await
    }
}

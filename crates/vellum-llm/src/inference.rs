//! Prompt-based inference service
//!
//! A request names a pre-registered prompt (identifier plus pinned
//! version) and supplies the template variables; the reply is a chat
//! message whose content items may include structured tool invocations.

use crate::http::{HttpClientConfig, JsonHttpClient};
use crate::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Path of the converse operation on the inference endpoint
pub const CONVERSE_PATH: &str = "/converse";

/// Inference request against a registered prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceRequest {
    /// Prompt identifier with its pinned version (`{arn}:{version}`)
    pub prompt_id: String,

    /// Template variables
    pub variables: PromptVariables,
}

impl InferenceRequest {
    /// Build a request with `text` as the sole template variable
    pub fn new(prompt_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            prompt_id: prompt_id.into(),
            variables: PromptVariables {
                text_input: text.into(),
            },
        }
    }
}

/// Template variables understood by the extraction prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptVariables {
    /// Document content
    pub text_input: String,
}

/// Reply from the inference service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResponse {
    /// Model output
    pub output: InferenceOutput,
}

impl InferenceResponse {
    /// Build an assistant reply from its content items
    pub fn from_content(content: Vec<ContentItem>) -> Self {
        Self {
            output: InferenceOutput {
                message: Message {
                    role: Some("assistant".to_string()),
                    content,
                },
            },
        }
    }

    /// Content items of the reply, in order
    pub fn content(&self) -> &[ContentItem] {
        &self.output.message.content
    }
}

/// Wrapper around the reply message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceOutput {
    /// The reply message
    pub message: Message,
}

/// A chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message role, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content items
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

/// One content item of a message
///
/// Items are either free text or a tool invocation; unknown shapes decode
/// with both fields empty and are skipped by consumers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentItem {
    /// Free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Structured tool invocation
    #[serde(rename = "toolUse", default, skip_serializing_if = "Option::is_none")]
    pub tool_use: Option<ToolUse>,
}

impl ContentItem {
    /// A free-text item
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            tool_use: None,
        }
    }

    /// A tool-invocation item
    pub fn tool_use(name: impl Into<String>, input: serde_json::Value) -> Self {
        Self {
            text: None,
            tool_use: Some(ToolUse {
                tool_use_id: None,
                name: name.into(),
                input,
            }),
        }
    }
}

/// A structured tool invocation emitted by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUse {
    /// Invocation id, if reported
    #[serde(rename = "toolUseId", default, skip_serializing_if = "Option::is_none")]
    pub tool_use_id: Option<String>,

    /// Tool name
    pub name: String,

    /// Structured tool input
    pub input: serde_json::Value,
}

/// Inference endpoint
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Run the registered prompt with the request's variables
    async fn converse(&self, request: &InferenceRequest) -> Result<InferenceResponse, LlmError>;
}

/// HTTP client for the inference endpoint
#[derive(Debug, Clone)]
pub struct HttpInferenceClient {
    http: JsonHttpClient,
}

impl HttpInferenceClient {
    /// Create a client from endpoint settings
    pub fn new(config: HttpClientConfig) -> Result<Self, LlmError> {
        Ok(Self {
            http: JsonHttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl InferenceService for HttpInferenceClient {
    async fn converse(&self, request: &InferenceRequest) -> Result<InferenceResponse, LlmError> {
        self.http.post_json(CONVERSE_PATH, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = InferenceRequest::new("arn:prompt/extraction:1", "Contract dated 2023");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({
                "promptId": "arn:prompt/extraction:1",
                "variables": { "text_input": "Contract dated 2023" }
            })
        );
    }

    #[test]
    fn test_response_decodes_mixed_content() {
        let body = json!({
            "output": {
                "message": {
                    "role": "assistant",
                    "content": [
                        { "text": "Here is the metadata." },
                        { "toolUse": {
                            "toolUseId": "tooluse_1",
                            "name": "print_document_metadata",
                            "input": { "language": "en" }
                        } },
                        { "image": { "format": "png" } }
                    ]
                }
            }
        });

        let response: InferenceResponse = serde_json::from_value(body).unwrap();
        let content = response.content();
        assert_eq!(content.len(), 3);
        assert_eq!(content[0].text.as_deref(), Some("Here is the metadata."));
        let tool_use = content[1].tool_use.as_ref().unwrap();
        assert_eq!(tool_use.name, "print_document_metadata");
        assert_eq!(tool_use.tool_use_id.as_deref(), Some("tooluse_1"));
        assert_eq!(content[2], ContentItem::default());
    }

    #[test]
    fn test_http_client_rejects_empty_endpoint() {
        assert!(HttpInferenceClient::new(HttpClientConfig::new(" ")).is_err());
    }
}

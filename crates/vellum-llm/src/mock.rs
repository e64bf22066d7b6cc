//! Deterministic service doubles
//!
//! Both mocks return a pre-configured reply (or error) without any network
//! calls and record every request they receive. Clones share state, so a
//! test can keep a handle while the pipeline owns another.

use crate::guardrail::{GuardrailRequest, GuardrailResponse, GuardrailService};
use crate::inference::{InferenceRequest, InferenceResponse, InferenceService};
use crate::LlmError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Mock inference service
///
/// # Examples
///
/// ```
/// use vellum_llm::{ContentItem, InferenceResponse, MockInference};
///
/// let provider = MockInference::new(InferenceResponse::from_content(vec![
///     ContentItem::text("no tool call here"),
/// ]));
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockInference {
    reply: Arc<Mutex<Result<InferenceResponse, LlmError>>>,
    requests: Arc<Mutex<Vec<InferenceRequest>>>,
}

impl MockInference {
    /// Always answer with `response`
    pub fn new(response: InferenceResponse) -> Self {
        Self {
            reply: Arc::new(Mutex::new(Ok(response))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always fail with `error`
    pub fn failing(error: LlmError) -> Self {
        Self {
            reply: Arc::new(Mutex::new(Err(error))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Replace the configured reply
    pub fn set_response(&self, response: InferenceResponse) {
        *lock(&self.reply) = Ok(response);
    }

    /// Number of calls received
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Requests received, in order
    pub fn requests(&self) -> Vec<InferenceRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl InferenceService for MockInference {
    async fn converse(&self, request: &InferenceRequest) -> Result<InferenceResponse, LlmError> {
        lock(&self.requests).push(request.clone());
        lock(&self.reply).clone()
    }
}

/// Mock guardrail service
#[derive(Debug, Clone)]
pub struct MockGuardrail {
    reply: Arc<Mutex<Result<GuardrailResponse, LlmError>>>,
    requests: Arc<Mutex<Vec<GuardrailRequest>>>,
}

impl MockGuardrail {
    /// Always answer with `action`
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            reply: Arc::new(Mutex::new(Ok(GuardrailResponse::new(action)))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always fail with `error`
    pub fn failing(error: LlmError) -> Self {
        Self {
            reply: Arc::new(Mutex::new(Err(error))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Replace the configured action
    pub fn set_action(&self, action: impl Into<String>) {
        *lock(&self.reply) = Ok(GuardrailResponse::new(action));
    }

    /// Number of calls received
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Requests received, in order
    pub fn requests(&self) -> Vec<GuardrailRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl GuardrailService for MockGuardrail {
    async fn apply(&self, request: &GuardrailRequest) -> Result<GuardrailResponse, LlmError> {
        lock(&self.requests).push(request.clone());
        lock(&self.reply).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guardrail::{GuardrailSource, ACTION_NONE};
    use crate::inference::ContentItem;

    fn guardrail_request() -> GuardrailRequest {
        GuardrailRequest {
            guardrail_identifier: "gr".to_string(),
            guardrail_version: "1".to_string(),
            source: GuardrailSource::Input,
            content: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_mock_inference_records_requests() {
        let response = InferenceResponse::from_content(vec![ContentItem::text("hi")]);
        let provider = MockInference::new(response.clone());

        let got = provider
            .converse(&InferenceRequest::new("p:1", "doc"))
            .await
            .unwrap();

        assert_eq!(got, response);
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.requests()[0].variables.text_input, "doc");
    }

    #[tokio::test]
    async fn test_mock_inference_error() {
        let provider = MockInference::failing(LlmError::Communication("down".into()));
        let result = provider.converse(&InferenceRequest::new("p:1", "doc")).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    #[tokio::test]
    async fn test_mock_clones_share_state() {
        let guardrail1 = MockGuardrail::new(ACTION_NONE);
        let guardrail2 = guardrail1.clone();

        guardrail1.apply(&guardrail_request()).await.unwrap();
        guardrail2.set_action("GUARDRAIL_INTERVENED");
        let reply = guardrail1.apply(&guardrail_request()).await.unwrap();

        assert_eq!(guardrail2.call_count(), 2);
        assert_eq!(reply.action, "GUARDRAIL_INTERVENED");
    }
}

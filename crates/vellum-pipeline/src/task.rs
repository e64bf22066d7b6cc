//! The extraction task: fetch, extract, evaluate

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info_span, warn, Instrument};
use vellum_domain::traits::ContentFetcher;
use vellum_domain::{DocumentRef, ExtractedMetadata, FetchError, GuardrailDisposition, TaskResult};
use vellum_extractor::{ExtractorError, MetadataExtractor, MALFORMED_RESPONSE_MESSAGE};
use vellum_gatekeeper::{GatekeeperError, SafetyEvaluator};

/// A failed task step
#[derive(Error, Debug)]
pub enum TaskError {
    /// Document could not be read
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Extraction failed
    #[error(transparent)]
    Extract(#[from] ExtractorError),

    /// Guardrail evaluation failed
    #[error(transparent)]
    Evaluate(#[from] GatekeeperError),
}

impl TaskError {
    /// Message recorded on the failed task result
    ///
    /// Fetch and evaluation errors keep their own message and a malformed
    /// model reply reports a fixed one. Anything else is reported as
    /// unexpected.
    pub fn message(&self) -> String {
        match self {
            TaskError::Fetch(e) => e.to_string(),
            TaskError::Evaluate(e) => e.to_string(),
            TaskError::Extract(e) if e.is_malformed() => MALFORMED_RESPONSE_MESSAGE.to_string(),
            TaskError::Extract(e) => format!("An unexpected error occurred: {}", e),
        }
    }
}

/// Runs the three steps for one document and never fails
///
/// Every outcome, including a failure in any step, comes back as a
/// [`TaskResult`] tied to the originating document.
pub struct ExtractionTask {
    fetcher: Arc<dyn ContentFetcher>,
    extractor: MetadataExtractor,
    evaluator: SafetyEvaluator,
}

impl ExtractionTask {
    /// Create a task from its collaborators
    pub fn new(
        fetcher: Arc<dyn ContentFetcher>,
        extractor: MetadataExtractor,
        evaluator: SafetyEvaluator,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            evaluator,
        }
    }

    /// Run the task for `document`
    pub async fn run(&self, document: &DocumentRef) -> TaskResult {
        match self.try_run(document).await {
            Ok((metadata, disposition)) => {
                TaskResult::succeeded(document.clone(), metadata, disposition)
            }
            Err(e) => {
                warn!("Task for {} failed: {}", document, e);
                TaskResult::failed(document.clone(), e.message())
            }
        }
    }

    async fn try_run(
        &self,
        document: &DocumentRef,
    ) -> Result<(ExtractedMetadata, GuardrailDisposition), TaskError> {
        let content = self
            .fetcher
            .fetch(document)
            .instrument(info_span!("fetch", key = %document.key))
            .await?;
        debug!("Fetched {} chars from {}", content.chars().count(), document);

        let metadata = self
            .extractor
            .extract(&content)
            .instrument(info_span!("extract", key = %document.key))
            .await?;

        let disposition = self
            .evaluator
            .evaluate(&content, &metadata)
            .instrument(info_span!("evaluate", key = %document.key))
            .await?;

        Ok((metadata, disposition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_llm::LlmError;

    #[test]
    fn test_message_classification() {
        let fetch = TaskError::from(FetchError::NotFound("inbox/a.txt".into()));
        assert_eq!(fetch.message(), "Document not found: inbox/a.txt");

        let malformed = TaskError::from(ExtractorError::MalformedResponse {
            detail: "no tool call".into(),
        });
        assert_eq!(malformed.message(), "Invalid JSON Generated.");

        let evaluate = TaskError::from(GatekeeperError::Service(LlmError::RateLimitExceeded));
        assert_eq!(evaluate.message(), "Rate limit exceeded");

        let too_long = TaskError::from(ExtractorError::ContentTooLong(12, 10));
        assert_eq!(
            too_long.message(),
            "An unexpected error occurred: Content too long: 12 chars (max: 10)"
        );
    }
}

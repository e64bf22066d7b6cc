//! Core MetadataExtractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_metadata;
use std::sync::Arc;
use tracing::{debug, info, warn};
use vellum_domain::ExtractedMetadata;
use vellum_llm::{InferenceRequest, InferenceService};

/// Extracts structured metadata from document content
pub struct MetadataExtractor {
    service: Arc<dyn InferenceService>,
    config: ExtractorConfig,
}

impl MetadataExtractor {
    /// Create a new extractor over an inference service
    pub fn new(service: Arc<dyn InferenceService>, config: ExtractorConfig) -> Self {
        Self { service, config }
    }

    /// The configuration this extractor was built with
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Build the single inference request for `content`
    pub fn build_request(&self, content: &str) -> InferenceRequest {
        InferenceRequest::new(self.config.prompt_id(), content)
    }

    /// Extract metadata from document content
    pub async fn extract(&self, content: &str) -> Result<ExtractedMetadata, ExtractorError> {
        let chars = content.chars().count();
        if chars > self.config.max_content_chars {
            return Err(ExtractorError::ContentTooLong(
                chars,
                self.config.max_content_chars,
            ));
        }

        let request = self.build_request(content);
        info!(
            "Invoking prompt '{}' with {} chars of content",
            request.prompt_id, chars
        );

        let response = self.service.converse(&request).await?;
        debug!("Inference reply has {} content items", response.content().len());

        match parse_metadata(&response, &self.config.tool_name) {
            Ok(metadata) => {
                info!(
                    "Extracted metadata: type '{}', language '{}'",
                    metadata.document_type, metadata.language
                );
                Ok(metadata)
            }
            Err(e) => {
                if let ExtractorError::MalformedResponse { detail } = &e {
                    warn!("Unusable inference reply: {}", detail);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_llm::{ContentItem, InferenceResponse, MockInference};

    fn create_test_extractor(max_content_chars: usize) -> (MetadataExtractor, MockInference) {
        let llm = MockInference::new(InferenceResponse::from_content(vec![]));
        let mut config = ExtractorConfig::new("arn:prompt/extract", "7");
        config.max_content_chars = max_content_chars;
        (MetadataExtractor::new(Arc::new(llm.clone()), config), llm)
    }

    #[test]
    fn test_build_request_embeds_content() {
        let (extractor, _) = create_test_extractor(100);
        let request = extractor.build_request("hello");
        assert_eq!(request.prompt_id, "arn:prompt/extract:7");
        assert_eq!(request.variables.text_input, "hello");
    }

    #[tokio::test]
    async fn test_extract_content_too_long_skips_service() {
        let (extractor, llm) = create_test_extractor(10);

        let result = extractor.extract(&"a".repeat(11)).await;
        assert!(matches!(result, Err(ExtractorError::ContentTooLong(11, 10))));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_extract_counts_chars_not_bytes() {
        let (extractor, llm) = create_test_extractor(4);
        llm.set_response(InferenceResponse::from_content(vec![ContentItem::text("none")]));

        // 4 chars, 8 bytes: within the limit, so the service is called
        let result = extractor.extract("äöüß").await;
        assert!(matches!(result, Err(ExtractorError::MalformedResponse { .. })));
        assert_eq!(llm.call_count(), 1);
    }
}

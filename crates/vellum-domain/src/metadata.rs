//! Structured metadata extracted from a document by the LLM

use serde::{Deserialize, Serialize};

/// Metadata emitted by the extraction tool call
///
/// All three fields must be populated; an incomplete payload is treated as
/// a malformed model response by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMetadata {
    /// Kind of document (e.g. "contract", "invoice")
    pub document_type: String,

    /// Language the document is written in (e.g. "en")
    pub language: String,

    /// Short free-text summary
    pub summary: String,
}

impl ExtractedMetadata {
    /// Create metadata from its three fields
    pub fn new(
        document_type: impl Into<String>,
        language: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            document_type: document_type.into(),
            language: language.into(),
            summary: summary.into(),
        }
    }

    /// Names of fields that are empty or whitespace only
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("document_type", &self.document_type),
            ("language", &self.language),
            ("summary", &self.summary),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Whether every field is populated
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_metadata() {
        let metadata = ExtractedMetadata::new("contract", "en", "A supply contract.");
        assert!(metadata.is_complete());
        assert!(metadata.missing_fields().is_empty());
    }

    #[test]
    fn test_missing_fields_reports_blank_values() {
        let metadata = ExtractedMetadata::new("  ", "en", "");
        assert_eq!(metadata.missing_fields(), vec!["document_type", "summary"]);
        assert!(!metadata.is_complete());
    }

    #[test]
    fn test_serializes_with_field_names() {
        let metadata = ExtractedMetadata::new("invoice", "de", "Rechnung");
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["document_type"], "invoice");
        assert_eq!(json["language"], "de");
        assert_eq!(json["summary"], "Rechnung");
    }
}

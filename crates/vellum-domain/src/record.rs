//! Stored record - the final persisted state of a run

use crate::task::{STATUS_GUARDRAIL_INTERVENED, STATUS_SUCCEEDED};
use crate::{DocumentRef, ExtractedMetadata};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status persisted with a record
///
/// Failed runs never produce a record, so there is no failed variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordStatus {
    /// Guardrail passed
    #[serde(rename = "SUCCEEDED")]
    Succeeded,

    /// Guardrail intervened and a human was notified
    #[serde(rename = "GUARDRAIL_INTERVENED")]
    GuardrailIntervened,
}

impl RecordStatus {
    /// Get the status as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Succeeded => STATUS_SUCCEEDED,
            RecordStatus::GuardrailIntervened => STATUS_GUARDRAIL_INTERVENED,
        }
    }

    /// Parse a stored status string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            STATUS_SUCCEEDED => Some(RecordStatus::Succeeded),
            STATUS_GUARDRAIL_INTERVENED => Some(RecordStatus::GuardrailIntervened),
            _ => None,
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite key of a stored record: `(id, language)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    /// Partition key (document key)
    pub id: String,

    /// Sort key (document language)
    pub language: String,
}

impl RecordKey {
    /// Create a record key
    pub fn new(id: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            language: language.into(),
        }
    }
}

/// Record written to the result store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Document key (partition key)
    pub id: String,

    /// Document language (sort key)
    pub language: String,

    /// Run status
    pub status: RecordStatus,

    /// Full metadata as returned by the model
    pub llm_response: ExtractedMetadata,

    /// Document type, denormalized from the metadata
    pub document_type: String,

    /// Summary, denormalized from the metadata
    pub summary: String,
}

impl StoredRecord {
    /// Compose the record for a document from its metadata
    pub fn new(document: &DocumentRef, metadata: ExtractedMetadata, status: RecordStatus) -> Self {
        Self {
            id: document.key.clone(),
            language: metadata.language.clone(),
            status,
            document_type: metadata.document_type.clone(),
            summary: metadata.summary.clone(),
            llm_response: metadata,
        }
    }

    /// Composite key of this record
    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.id.clone(), self.language.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_fields_come_from_metadata() {
        let doc = DocumentRef::new("inbox", "acme.txt");
        let metadata = ExtractedMetadata::new("contract", "en", "Supply agreement");
        let record = StoredRecord::new(&doc, metadata.clone(), RecordStatus::Succeeded);

        assert_eq!(record.id, "acme.txt");
        assert_eq!(record.language, "en");
        assert_eq!(record.document_type, "contract");
        assert_eq!(record.summary, "Supply agreement");
        assert_eq!(record.llm_response, metadata);
        assert_eq!(record.key(), RecordKey::new("acme.txt", "en"));
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(RecordStatus::Succeeded.as_str(), "SUCCEEDED");
        assert_eq!(
            RecordStatus::GuardrailIntervened.to_string(),
            "GUARDRAIL_INTERVENED"
        );
        assert_eq!(RecordStatus::parse("SUCCEEDED"), Some(RecordStatus::Succeeded));
        assert_eq!(RecordStatus::parse("FAILED"), None);
    }

    #[test]
    fn test_status_serializes_as_wire_string() {
        let json = serde_json::to_string(&RecordStatus::GuardrailIntervened).unwrap();
        assert_eq!(json, "\"GUARDRAIL_INTERVENED\"");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the record key always mirrors the document key and metadata language
        #[test]
        fn test_record_key_mirrors_inputs(
            key in "[a-z0-9/._-]{1,40}",
            language in "[a-z]{2}",
            summary in ".{0,80}",
        ) {
            let doc = DocumentRef::new("bucket", key.clone());
            let metadata = ExtractedMetadata::new("memo", language.clone(), summary.clone());
            let record = StoredRecord::new(&doc, metadata, RecordStatus::Succeeded);

            prop_assert_eq!(record.key(), RecordKey::new(key, language));
            prop_assert_eq!(record.summary, summary);
        }
    }
}

//! Document references delivered by the storage event source

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a document that triggered a pipeline run
///
/// Created once per trigger event and dropped when the run finishes.
/// Never persisted on its own; the `key` becomes the record id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Storage bucket (container) name
    pub bucket: String,

    /// Object key inside the bucket
    pub key: String,
}

impl DocumentRef {
    /// Create a new document reference
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let doc = DocumentRef::new("inbox", "contracts/2023/acme.txt");
        assert_eq!(doc.to_string(), "inbox/contracts/2023/acme.txt");
    }

    #[test]
    fn test_equality_is_by_bucket_and_key() {
        let a = DocumentRef::new("inbox", "a.txt");
        let b = DocumentRef::new("inbox", "a.txt");
        let c = DocumentRef::new("archive", "a.txt");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

//! Trigger envelope parsing
//!
//! A run is triggered by a storage "object created" event. The event may
//! arrive bare (`{"detail": {...}}`) or wrapped under `body` by the caller.

use crate::error::RunError;
use serde::Deserialize;
use serde_json::Value;
use vellum_domain::DocumentRef;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    body: Option<StorageEvent>,
    #[serde(default)]
    detail: Option<EventDetail>,
}

#[derive(Debug, Deserialize)]
struct StorageEvent {
    #[serde(default)]
    detail: Option<EventDetail>,
}

#[derive(Debug, Deserialize)]
struct EventDetail {
    #[serde(default)]
    bucket: Option<Named>,
    #[serde(default)]
    object: Option<Keyed>,
}

#[derive(Debug, Deserialize)]
struct Named {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Keyed {
    #[serde(default)]
    key: Option<String>,
}

/// Extract the document reference from a trigger envelope
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vellum_pipeline::parse_trigger;
///
/// let event = json!({"detail": {"bucket": {"name": "inbox"}, "object": {"key": "a.txt"}}});
/// let document = parse_trigger(&event).unwrap();
/// assert_eq!(document.to_string(), "inbox/a.txt");
/// ```
pub fn parse_trigger(envelope: &Value) -> Result<DocumentRef, RunError> {
    let envelope: Envelope = serde_json::from_value(envelope.clone())
        .map_err(|e| RunError::InvalidEvent(format!("unrecognized envelope: {}", e)))?;

    let detail = envelope
        .body
        .and_then(|body| body.detail)
        .or(envelope.detail)
        .ok_or_else(|| RunError::InvalidEvent("missing event detail".to_string()))?;

    let bucket = detail
        .bucket
        .and_then(|b| b.name)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| RunError::InvalidEvent("missing bucket name".to_string()))?;
    let key = detail
        .object
        .and_then(|o| o.key)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| RunError::InvalidEvent("missing object key".to_string()))?;

    Ok(DocumentRef::new(bucket, key))
}

/// Parse a JSON string, then extract the document reference
pub fn parse_trigger_str(raw: &str) -> Result<DocumentRef, RunError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| RunError::InvalidEvent(format!("not valid JSON: {}", e)))?;
    parse_trigger(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrapped_envelope() {
        let event = json!({
            "body": {
                "detail-type": "Object Created",
                "detail": {
                    "bucket": {"name": "inbox"},
                    "object": {"key": "reports/q3.txt", "size": 1024}
                }
            }
        });
        assert_eq!(
            parse_trigger(&event).unwrap(),
            DocumentRef::new("inbox", "reports/q3.txt")
        );
    }

    #[test]
    fn test_missing_key() {
        let event = json!({"detail": {"bucket": {"name": "inbox"}, "object": {}}});
        assert_eq!(
            parse_trigger(&event),
            Err(RunError::InvalidEvent("missing object key".into()))
        );
    }

    #[test]
    fn test_missing_detail_and_wrong_shape() {
        assert!(matches!(
            parse_trigger(&json!({"body": {}})),
            Err(RunError::InvalidEvent(_))
        ));
        assert!(matches!(
            parse_trigger(&json!(["not", "an", "object"])),
            Err(RunError::InvalidEvent(_))
        ));
        assert!(matches!(
            parse_trigger_str("{not json"),
            Err(RunError::InvalidEvent(_))
        ));
    }
}

//! Parse the inference reply into metadata

use crate::error::ExtractorError;
use vellum_domain::ExtractedMetadata;
use vellum_llm::{InferenceResponse, ToolUse};

/// First content item invoking `tool_name`, if any
///
/// Items without a tool invocation, or invoking a different tool, are
/// skipped. `None` is the explicit "no usable tool call" case.
pub fn find_tool_use<'a>(response: &'a InferenceResponse, tool_name: &str) -> Option<&'a ToolUse> {
    response
        .content()
        .iter()
        .filter_map(|item| item.tool_use.as_ref())
        .find(|tool_use| tool_use.name == tool_name)
}

/// Decode the metadata carried by the reply's `tool_name` invocation
pub fn parse_metadata(
    response: &InferenceResponse,
    tool_name: &str,
) -> Result<ExtractedMetadata, ExtractorError> {
    let tool_use = find_tool_use(response, tool_name).ok_or_else(|| {
        ExtractorError::malformed(format!(
            "no '{}' tool invocation among {} content items",
            tool_name,
            response.content().len()
        ))
    })?;

    let metadata: ExtractedMetadata = serde_json::from_value(tool_use.input.clone())
        .map_err(|e| ExtractorError::malformed(format!("tool input is not metadata: {}", e)))?;

    let missing = metadata.missing_fields();
    if !missing.is_empty() {
        return Err(ExtractorError::malformed(format!(
            "tool input has empty fields: {}",
            missing.join(", ")
        )));
    }

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vellum_llm::ContentItem;

    const TOOL: &str = "print_document_metadata";

    fn metadata_input() -> serde_json::Value {
        json!({ "document_type": "contract", "language": "en", "summary": "Supply deal" })
    }

    #[test]
    fn test_find_skips_text_and_other_tools() {
        let response = InferenceResponse::from_content(vec![
            ContentItem::text("Thinking..."),
            ContentItem::tool_use("lookup_registry", json!({})),
            ContentItem::tool_use(TOOL, metadata_input()),
        ]);

        let found = find_tool_use(&response, TOOL).unwrap();
        assert_eq!(found.input, metadata_input());
    }

    #[test]
    fn test_find_takes_first_match() {
        let response = InferenceResponse::from_content(vec![
            ContentItem::tool_use(TOOL, json!({ "language": "fr" })),
            ContentItem::tool_use(TOOL, json!({ "language": "de" })),
        ]);

        let found = find_tool_use(&response, TOOL).unwrap();
        assert_eq!(found.input["language"], "fr");
    }

    #[test]
    fn test_find_none_when_absent() {
        let response = InferenceResponse::from_content(vec![ContentItem::text("{\"a\": 1}")]);
        assert!(find_tool_use(&response, TOOL).is_none());

        let empty = InferenceResponse::from_content(Vec::new());
        assert!(find_tool_use(&empty, TOOL).is_none());
    }

    #[test]
    fn test_parse_metadata() {
        let response =
            InferenceResponse::from_content(vec![ContentItem::tool_use(TOOL, metadata_input())]);
        let metadata = parse_metadata(&response, TOOL).unwrap();
        assert_eq!(metadata, ExtractedMetadata::new("contract", "en", "Supply deal"));
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let response = InferenceResponse::from_content(vec![ContentItem::tool_use(
            TOOL,
            json!({ "document_type": "memo", "language": "en", "summary": "s", "pages": 3 }),
        )]);
        assert!(parse_metadata(&response, TOOL).is_ok());
    }

    #[test]
    fn test_parse_missing_tool_is_malformed() {
        let response = InferenceResponse::from_content(vec![ContentItem::text("plain text")]);
        let err = parse_metadata(&response, TOOL).unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(err.to_string(), "Invalid JSON Generated.");
    }

    #[test]
    fn test_parse_wrong_shape_is_malformed() {
        let response = InferenceResponse::from_content(vec![ContentItem::tool_use(
            TOOL,
            json!({ "document_type": "memo" }),
        )]);
        assert!(parse_metadata(&response, TOOL).unwrap_err().is_malformed());
    }

    #[test]
    fn test_parse_blank_field_is_malformed() {
        let response = InferenceResponse::from_content(vec![ContentItem::tool_use(
            TOOL,
            json!({ "document_type": "memo", "language": "", "summary": "s" }),
        )]);
        match parse_metadata(&response, TOOL) {
            Err(ExtractorError::MalformedResponse { detail }) => {
                assert!(detail.contains("language"));
            }
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }
}

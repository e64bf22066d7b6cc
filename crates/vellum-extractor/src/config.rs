//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Tool the extraction prompt is registered to call
pub const DEFAULT_TOOL_NAME: &str = "print_document_metadata";

/// Configuration for the Extractor
///
/// Immutable once the extractor is built; nothing here is read from the
/// environment by the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Identifier (ARN) of the registered extraction prompt
    pub prompt_arn: String,

    /// Pinned prompt version
    pub prompt_version: String,

    /// Tool name the reply must invoke
    #[serde(default = "default_tool_name")]
    pub tool_name: String,

    /// Maximum document length (characters) sent to the model
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
}

fn default_tool_name() -> String {
    DEFAULT_TOOL_NAME.to_string()
}

fn default_max_content_chars() -> usize {
    100_000
}

impl ExtractorConfig {
    /// Config for a prompt ARN and version with default tool and limits
    pub fn new(prompt_arn: impl Into<String>, prompt_version: impl Into<String>) -> Self {
        Self {
            prompt_arn: prompt_arn.into(),
            prompt_version: prompt_version.into(),
            ..Self::default()
        }
    }

    /// Prompt identifier sent to the service: `{arn}:{version}`
    pub fn prompt_id(&self) -> String {
        format!("{}:{}", self.prompt_arn, self.prompt_version)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt_arn.trim().is_empty() {
            return Err("prompt_arn must not be empty".to_string());
        }
        if self.prompt_version.trim().is_empty() {
            return Err("prompt_version must not be empty".to_string());
        }
        if self.tool_name.trim().is_empty() {
            return Err("tool_name must not be empty".to_string());
        }
        if self.max_content_chars == 0 {
            return Err("max_content_chars must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            prompt_arn: "extraction-prompt".to_string(),
            prompt_version: "1".to_string(),
            tool_name: default_tool_name(),
            max_content_chars: default_max_content_chars(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExtractorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_prompt_id_pins_version() {
        let config = ExtractorConfig::new("arn:aws:bedrock:prompt/ABC123", "3");
        assert_eq!(config.prompt_id(), "arn:aws:bedrock:prompt/ABC123:3");
    }

    #[test]
    fn test_invalid_empty_version() {
        let config = ExtractorConfig::new("arn:prompt", " ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_max_content_chars() {
        let mut config = ExtractorConfig::default();
        config.max_content_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_defaults_and_round_trip() {
        let config = ExtractorConfig::from_toml(
            r#"
            prompt_arn = "arn:prompt/xyz"
            prompt_version = "2"
            "#,
        )
        .unwrap();
        assert_eq!(config.tool_name, DEFAULT_TOOL_NAME);
        assert_eq!(config.max_content_chars, 100_000);

        let parsed = ExtractorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}

//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Instruction submitted to the guardrail as the evaluation query
pub const EVALUATION_INSTRUCTION: &str =
    "Generate a JSON object indicating the language used, the document type, and a summary.";

/// Configuration for the guardrail evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailConfig {
    /// Guardrail identifier
    pub guardrail_id: String,

    /// Pinned guardrail version
    pub guardrail_version: String,

    /// Query segment submitted alongside the content
    #[serde(default = "default_instruction")]
    pub instruction: String,
}

fn default_instruction() -> String {
    EVALUATION_INSTRUCTION.to_string()
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            guardrail_id: "extraction_guardrail".to_string(),
            guardrail_version: "1".to_string(),
            instruction: default_instruction(),
        }
    }
}

impl GuardrailConfig {
    /// Config for a guardrail id and version with the default instruction
    pub fn new(guardrail_id: impl Into<String>, guardrail_version: impl Into<String>) -> Self {
        Self {
            guardrail_id: guardrail_id.into(),
            guardrail_version: guardrail_version.into(),
            instruction: default_instruction(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.guardrail_id.trim().is_empty() {
            return Err("guardrail_id must not be empty".to_string());
        }
        if self.guardrail_version.trim().is_empty() {
            return Err("guardrail_version must not be empty".to_string());
        }
        if self.instruction.trim().is_empty() {
            return Err("instruction must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

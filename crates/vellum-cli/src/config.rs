//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use vellum_extractor::ExtractorConfig;
use vellum_gatekeeper::GuardrailConfig;
use vellum_llm::HttpClientConfig;
use vellum_pipeline::{NotifyConfig, PipelineConfig};
use vellum_store::StoreConfig;

/// Environment variable overriding `extractor.prompt_arn`
pub const ENV_PROMPT_ARN: &str = "VELLUM_PROMPT_ARN";
/// Environment variable overriding `extractor.prompt_version`
pub const ENV_PROMPT_VERSION: &str = "VELLUM_PROMPT_VERSION";
/// Environment variable overriding `guardrail.guardrail_id`
pub const ENV_GUARDRAIL_ID: &str = "VELLUM_GUARDRAIL_ID";
/// Environment variable overriding `guardrail.guardrail_version`
pub const ENV_GUARDRAIL_VERSION: &str = "VELLUM_GUARDRAIL_VERSION";

/// Full application configuration, one section per component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Inference service endpoint
    #[serde(default = "default_inference")]
    pub inference: HttpClientConfig,

    /// Guardrail service endpoint
    #[serde(default = "default_guardrail_service")]
    pub guardrail_service: HttpClientConfig,

    /// Extraction prompt settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Guardrail identifier settings
    #[serde(default)]
    pub guardrail: GuardrailConfig,

    /// Run timeout, concurrency and notification text
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Document root and record database
    #[serde(default)]
    pub store: StoreConfig,

    /// Escalation channel
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Output settings
    #[serde(default)]
    pub output: Settings,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// JSON objects
    Json,
}

impl Config {
    /// Default configuration file path (`~/.vellum/config.toml`).
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".vellum").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let path = Self::default_path()?;
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply the identifier overrides found by `lookup`.
    ///
    /// `lookup` is `std::env::var` in the binary.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_PROMPT_ARN) {
            self.extractor.prompt_arn = value;
        }
        if let Some(value) = lookup(ENV_PROMPT_VERSION) {
            self.extractor.prompt_version = value;
        }
        if let Some(value) = lookup(ENV_GUARDRAIL_ID) {
            self.guardrail.guardrail_id = value;
        }
        if let Some(value) = lookup(ENV_GUARDRAIL_VERSION) {
            self.guardrail.guardrail_version = value;
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        let sections: [(&str, std::result::Result<(), String>); 7] = [
            ("inference", self.inference.validate()),
            ("guardrail_service", self.guardrail_service.validate()),
            ("extractor", self.extractor.validate()),
            ("guardrail", self.guardrail.validate()),
            ("pipeline", self.pipeline.validate()),
            ("store", self.store.validate()),
            ("notify", self.notify.validate()),
        ];

        for (section, result) in sections {
            result.map_err(|e| CliError::Config(format!("[{}] {}", section, e)))?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inference: default_inference(),
            guardrail_service: default_guardrail_service(),
            extractor: ExtractorConfig::default(),
            guardrail: GuardrailConfig::default(),
            pipeline: PipelineConfig::default(),
            store: StoreConfig::default(),
            notify: NotifyConfig::default(),
            output: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Text,
        }
    }
}

fn default_inference() -> HttpClientConfig {
    HttpClientConfig::new("http://localhost:8400")
}

fn default_guardrail_service() -> HttpClientConfig {
    HttpClientConfig::new("http://localhost:8401")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}

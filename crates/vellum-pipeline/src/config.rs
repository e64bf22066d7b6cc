//! Configuration for pipeline runs and escalation
//!
//! Defines the per-run timeout, worker concurrency and where human
//! escalations are delivered.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vellum_llm::HttpClientConfig;

/// Default subject line of escalation notifications
pub const DEFAULT_NOTIFICATION_SUBJECT: &str = "Guardrail Intervened";

/// Configuration for the orchestrator and worker
///
/// # Examples
///
/// ```
/// use vellum_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.run_timeout_secs, 600);
/// assert_eq!(config.max_concurrent_runs, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// End-to-end budget for one run (seconds)
    #[serde(default = "default_run_timeout_secs")]
    pub run_timeout_secs: u64,

    /// Runs the worker keeps in flight at once
    #[serde(default = "default_max_concurrent_runs")]
    pub max_concurrent_runs: usize,

    /// Topic escalation notifications are addressed to
    #[serde(default = "default_notification_topic")]
    pub notification_topic: String,

    /// Subject line of escalation notifications
    #[serde(default = "default_notification_subject")]
    pub notification_subject: String,
}

fn default_run_timeout_secs() -> u64 {
    600
}

fn default_max_concurrent_runs() -> usize {
    8
}

fn default_notification_topic() -> String {
    "human-review".to_string()
}

fn default_notification_subject() -> String {
    DEFAULT_NOTIFICATION_SUBJECT.to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            run_timeout_secs: default_run_timeout_secs(),
            max_concurrent_runs: default_max_concurrent_runs(),
            notification_topic: default_notification_topic(),
            notification_subject: default_notification_subject(),
        }
    }
}

impl PipelineConfig {
    /// Run timeout as Duration
    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.run_timeout_secs == 0 {
            return Err("run_timeout_secs must be greater than 0".to_string());
        }
        if self.max_concurrent_runs == 0 {
            return Err("max_concurrent_runs must be greater than 0".to_string());
        }
        if self.notification_subject.trim().is_empty() {
            return Err("notification_subject must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

/// Which channel delivers escalations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// Write notifications to the log
    #[default]
    Log,
    /// POST notifications to a webhook
    Webhook,
}

/// Escalation channel settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Channel kind
    #[serde(default)]
    pub channel: ChannelKind,

    /// Webhook endpoint and retry policy (required for `webhook`)
    #[serde(default)]
    pub webhook: Option<HttpClientConfig>,
}

impl NotifyConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        match (&self.channel, &self.webhook) {
            (ChannelKind::Webhook, None) => {
                Err("notify.webhook must be set when channel = \"webhook\"".to_string())
            }
            (ChannelKind::Webhook, Some(webhook)) => webhook
                .validate()
                .map_err(|e| format!("notify.webhook: {}", e)),
            (ChannelKind::Log, _) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.run_timeout(), Duration::from_secs(600));
        assert_eq!(config.notification_subject, "Guardrail Intervened");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PipelineConfig::from_toml("max_concurrent_runs = 2").unwrap();
        assert_eq!(config.max_concurrent_runs, 2);
        assert_eq!(config.run_timeout_secs, 600);
    }

    #[test]
    fn test_zero_concurrency_is_invalid() {
        let config = PipelineConfig {
            max_concurrent_runs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_webhook_channel_requires_endpoint() {
        let config: NotifyConfig = toml::from_str("channel = \"webhook\"").unwrap();
        assert!(config.validate().is_err());

        let config: NotifyConfig = toml::from_str(
            r#"
            channel = "webhook"
            [webhook]
            endpoint = "http://localhost:9000/hooks/review"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(NotifyConfig::default().channel, ChannelKind::Log);
    }
}

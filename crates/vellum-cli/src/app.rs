//! Builds the pipeline from configuration.

use crate::config::Config;
use crate::error::{CliError, Result};
use std::sync::Arc;
use vellum_domain::traits::NotificationChannel;
use vellum_extractor::MetadataExtractor;
use vellum_gatekeeper::SafetyEvaluator;
use vellum_llm::{HttpGuardrailClient, HttpInferenceClient};
use vellum_pipeline::{
    ChannelKind, EscalationNotifier, ExtractionTask, LogChannel, Orchestrator, WebhookChannel,
};
use vellum_store::{FsContentFetcher, SqliteRecordStore};

/// Open the record store named in the configuration.
pub fn open_store(config: &Config) -> Result<SqliteRecordStore> {
    Ok(SqliteRecordStore::new(&config.store.database_path)?)
}

/// Build the configured notification channel.
pub fn build_channel(config: &Config) -> Result<Arc<dyn NotificationChannel>> {
    match (&config.notify.channel, &config.notify.webhook) {
        (ChannelKind::Log, _) => Ok(Arc::new(LogChannel)),
        (ChannelKind::Webhook, Some(webhook)) => {
            let channel =
                WebhookChannel::new(webhook.clone()).map_err(|e| CliError::Setup(e.to_string()))?;
            Ok(Arc::new(channel))
        }
        (ChannelKind::Webhook, None) => Err(CliError::Config(
            "notify.webhook must be set when channel = \"webhook\"".to_string(),
        )),
    }
}

/// Wire every adapter into an orchestrator.
pub fn build_orchestrator(config: &Config) -> Result<Orchestrator> {
    let inference = HttpInferenceClient::new(config.inference.clone())
        .map_err(|e| CliError::Setup(format!("inference client: {}", e)))?;
    let guardrail = HttpGuardrailClient::new(config.guardrail_service.clone())
        .map_err(|e| CliError::Setup(format!("guardrail client: {}", e)))?;

    let task = ExtractionTask::new(
        Arc::new(FsContentFetcher::from_config(&config.store)),
        MetadataExtractor::new(Arc::new(inference), config.extractor.clone()),
        SafetyEvaluator::new(Arc::new(guardrail), config.guardrail.clone()),
    );
    let notifier = EscalationNotifier::from_config(build_channel(config)?, &config.pipeline);
    let store = open_store(config)?;

    tracing::debug!(
        "Pipeline wired: prompt {}, guardrail {} v{}, documents under {}",
        config.extractor.prompt_id(),
        config.guardrail.guardrail_id,
        config.guardrail.guardrail_version,
        config.store.documents_root.display()
    );

    Ok(Orchestrator::new(task, notifier, Arc::new(store))
        .with_run_timeout(config.pipeline.run_timeout()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_llm::HttpClientConfig;

    fn in_memory() -> Config {
        let mut config = Config::default();
        config.store.database_path = ":memory:".to_string();
        config
    }

    #[test]
    fn test_build_orchestrator_with_defaults() {
        let orchestrator = build_orchestrator(&in_memory()).unwrap();
        assert_eq!(orchestrator.run_timeout().as_secs(), 600);
    }

    #[test]
    fn test_webhook_channel_requires_settings() {
        let mut config = in_memory();
        config.notify.channel = ChannelKind::Webhook;
        assert!(matches!(build_channel(&config), Err(CliError::Config(_))));

        config.notify.webhook = Some(HttpClientConfig::new("http://localhost:9000/hook"));
        assert!(build_channel(&config).is_ok());
    }
}

//! Human escalation for guardrail interventions

use crate::config::PipelineConfig;
use std::sync::Arc;
use tracing::info;
use vellum_domain::traits::NotificationChannel;
use vellum_domain::{DocumentRef, Notification, NotificationError};

/// Body of the escalation message for the document stored under `key`
pub fn escalation_message(key: &str) -> String {
    format!(
        "Hello Human,\n\n\
         This notification is to inform you that LLM metadata generation for the file {} has triggered one of our guardrails.\n\n\
         Please validate and take the appropriate action.",
        key
    )
}

/// Tells a human reviewer that a document needs attention
pub struct EscalationNotifier {
    channel: Arc<dyn NotificationChannel>,
    topic: String,
    subject: String,
}

impl EscalationNotifier {
    /// Create a notifier delivering to `topic` with a fixed `subject`
    pub fn new(
        channel: Arc<dyn NotificationChannel>,
        topic: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            channel,
            topic: topic.into(),
            subject: subject.into(),
        }
    }

    /// Create a notifier using the configured topic and subject
    pub fn from_config(channel: Arc<dyn NotificationChannel>, config: &PipelineConfig) -> Self {
        Self::new(
            channel,
            config.notification_topic.clone(),
            config.notification_subject.clone(),
        )
    }

    /// Notification that would be sent for `document`
    pub fn compose(&self, document: &DocumentRef) -> Notification {
        Notification {
            topic: self.topic.clone(),
            subject: self.subject.clone(),
            message: escalation_message(&document.key),
        }
    }

    /// Deliver the escalation for `document`
    pub async fn notify(&self, document: &DocumentRef) -> Result<(), NotificationError> {
        let notification = self.compose(document);
        self.channel.deliver(&notification).await?;
        info!("Escalated {} to '{}'", document, self.topic);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::MemoryChannel;

    #[test]
    fn test_message_embeds_key() {
        let message = escalation_message("contracts/nda.txt");
        assert!(message.starts_with("Hello Human,\n\n"));
        assert!(message.contains("for the file contracts/nda.txt has triggered one of our guardrails."));
        assert!(message.ends_with("Please validate and take the appropriate action."));
    }

    #[tokio::test]
    async fn test_notify_delivers_once() {
        let channel = MemoryChannel::new();
        let notifier = EscalationNotifier::from_config(
            Arc::new(channel.clone()),
            &PipelineConfig::default(),
        );

        notifier
            .notify(&DocumentRef::new("inbox", "nda.txt"))
            .await
            .unwrap();

        let sent = channel.notifications();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Guardrail Intervened");
        assert_eq!(sent[0].topic, "human-review");
        assert!(sent[0].message.contains("nda.txt"));
    }

    #[tokio::test]
    async fn test_channel_failure_propagates() {
        let channel = MemoryChannel::new();
        channel.fail_with("topic does not exist");
        let notifier = EscalationNotifier::new(Arc::new(channel.clone()), "review", "Check this");

        let err = notifier
            .notify(&DocumentRef::new("inbox", "nda.txt"))
            .await
            .unwrap_err();
        assert_eq!(err, NotificationError("topic does not exist".into()));
        assert!(channel.notifications().is_empty());
    }
}

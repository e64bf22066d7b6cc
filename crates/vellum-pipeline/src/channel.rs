//! Notification channel adapters

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;
use vellum_domain::traits::NotificationChannel;
use vellum_domain::{Notification, NotificationError};
use vellum_llm::{HttpClientConfig, JsonHttpClient};

/// Writes notifications to the log instead of a reviewer inbox
#[derive(Debug, Clone, Copy, Default)]
pub struct LogChannel;

#[async_trait]
impl NotificationChannel for LogChannel {
    async fn deliver(&self, notification: &Notification) -> Result<(), NotificationError> {
        info!(
            topic = %notification.topic,
            subject = %notification.subject,
            "{}",
            notification.message
        );
        Ok(())
    }
}

/// POSTs each notification as JSON to a webhook
///
/// Transport errors, 5xx and 429 replies are retried with exponential
/// backoff up to the configured attempt count.
#[derive(Debug, Clone)]
pub struct WebhookChannel {
    client: JsonHttpClient,
}

impl WebhookChannel {
    /// Build a channel for the configured webhook URL
    pub fn new(config: HttpClientConfig) -> Result<Self, NotificationError> {
        let client = JsonHttpClient::new(config).map_err(|e| NotificationError(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl NotificationChannel for WebhookChannel {
    async fn deliver(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.client
            .post("", notification)
            .await
            .map_err(|e| NotificationError(format!("Webhook {}: {}", self.client.endpoint(), e)))
    }
}

#[derive(Debug, Default)]
struct Outbox {
    sent: Vec<Notification>,
    failure: Option<String>,
}

/// Keeps delivered notifications in memory, for tests
///
/// Clones share the same outbox.
#[derive(Debug, Clone, Default)]
pub struct MemoryChannel {
    outbox: Arc<Mutex<Outbox>>,
}

impl MemoryChannel {
    /// Create an empty channel
    pub fn new() -> Self {
        Self::default()
    }

    fn outbox(&self) -> MutexGuard<'_, Outbox> {
        self.outbox.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make every subsequent delivery fail with `message`
    pub fn fail_with(&self, message: impl Into<String>) {
        self.outbox().failure = Some(message.into());
    }

    /// Notifications delivered so far, oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.outbox().sent.clone()
    }
}

#[async_trait]
impl NotificationChannel for MemoryChannel {
    async fn deliver(&self, notification: &Notification) -> Result<(), NotificationError> {
        let mut outbox = self.outbox();
        if let Some(message) = &outbox.failure {
            return Err(NotificationError(message.clone()));
        }
        outbox.sent.push(notification.clone());
        Ok(())
    }
}

//! Shared JSON-over-HTTP transport
//!
//! Both service clients POST a JSON body and decode a JSON reply. Retries
//! are bounded by a fixed attempt count with exponential backoff capped at
//! [`MAX_BACKOFF_MS`], so a run can never block indefinitely here.

use crate::LlmError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for a single request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per call
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the first retry
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 500;

/// Upper bound on any single backoff delay
pub const MAX_BACKOFF_MS: u64 = 8_000;

/// Connection settings for one service endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Base URL of the service (e.g. "http://localhost:8400")
    pub endpoint: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per call, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry (milliseconds); doubles per attempt
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_initial_backoff_ms() -> u64 {
    DEFAULT_INITIAL_BACKOFF_MS
}

impl HttpClientConfig {
    /// Config for an endpoint with default timeout and retry settings
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff_ms: DEFAULT_INITIAL_BACKOFF_MS,
        }
    }

    /// Set the number of attempts per call
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Delay to wait after the given failed attempt (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        let delay = self.initial_backoff_ms.saturating_mul(factor).min(MAX_BACKOFF_MS);
        Duration::from_millis(delay)
    }
}

/// JSON POST client with bounded retries
#[derive(Debug, Clone)]
pub struct JsonHttpClient {
    client: reqwest::Client,
    config: HttpClientConfig,
}

impl JsonHttpClient {
    /// Build a client for the configured endpoint
    pub fn new(config: HttpClientConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Other)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Configured attempts per call
    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    /// POST `body` to `path` and decode the JSON reply
    ///
    /// Transport failures, 5xx and 429 replies are retried up to
    /// `max_attempts`; other 4xx replies and undecodable bodies fail at once.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, LlmError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let target = self.url(path);
        let url = target.as_str();
        self.with_retries(url, || async move {
            self.send(url, body)
                .await?
                .json::<R>()
                .await
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))
        })
        .await
    }

    /// POST `body` to `path`, ignoring the reply body
    ///
    /// Same retry rules as [`JsonHttpClient::post_json`].
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<(), LlmError>
    where
        B: Serialize + ?Sized,
    {
        let target = self.url(path);
        let url = target.as_str();
        self.with_retries(url, || async move { self.send(url, body).await.map(|_| ()) })
            .await
    }

    async fn with_retries<T, F, Fut>(&self, url: &str, mut call: F) -> Result<T, LlmError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LlmError>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match call().await {
                Ok(reply) => return Ok(reply),
                Err(e) if e.is_retryable() && attempt < self.config.max_attempts => {
                    let delay = self.config.backoff(attempt);
                    warn!(
                        "POST {} failed (attempt {}/{}): {}; retrying in {:?}",
                        url, attempt, self.config.max_attempts, e, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Send once and classify non-success statuses
    async fn send<B>(&self, url: &str, body: &B) -> Result<reqwest::Response, LlmError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        debug!("POST {} -> {}", url, status);

        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            Err(LlmError::RateLimitExceeded)
        } else if status.is_server_error() {
            Err(LlmError::Communication(format!("HTTP {}: {}", status, error_text)))
        } else {
            Err(LlmError::Rejected {
                status: status.as_u16(),
                body: error_text,
            })
        }
    }
}

//! Vellum Pipeline
//!
//! Orchestrates one guarded metadata-extraction run per stored document.
//!
//! # Overview
//!
//! Each run:
//! - **Extracts**: fetches the document, asks the model for its metadata and
//!   has the guardrail evaluate content and metadata ([`ExtractionTask`])
//! - **Decides**: maps the task result to a [`Decision`]
//! - **Escalates**: notifies a human when the guardrail intervened
//!   ([`EscalationNotifier`])
//! - **Stores**: upserts the final record keyed by `(id, language)`
//!
//! A failed run never writes a record. Every run ends in a [`RunReport`]
//! naming the states it passed through.
//!
//! # Usage
//!
//! ## One event
//!
//! ```no_run
//! use std::sync::Arc;
//! use vellum_extractor::{ExtractorConfig, MetadataExtractor};
//! use vellum_gatekeeper::{GuardrailConfig, SafetyEvaluator};
//! use vellum_llm::{HttpClientConfig, HttpGuardrailClient, HttpInferenceClient};
//! use vellum_pipeline::{
//!     EscalationNotifier, ExtractionTask, LogChannel, Orchestrator, PipelineConfig,
//! };
//! # use vellum_domain::traits::{ContentFetcher, RecordStore};
//!
//! # async fn example(
//! #     fetcher: Arc<dyn ContentFetcher>,
//! #     store: Arc<dyn RecordStore>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let inference = HttpInferenceClient::new(HttpClientConfig::new("http://localhost:8400"))?;
//! let guardrail = HttpGuardrailClient::new(HttpClientConfig::new("http://localhost:8401"))?;
//!
//! let task = ExtractionTask::new(
//!     fetcher,
//!     MetadataExtractor::new(Arc::new(inference), ExtractorConfig::default()),
//!     SafetyEvaluator::new(Arc::new(guardrail), GuardrailConfig::default()),
//! );
//! let config = PipelineConfig::default();
//! let notifier = EscalationNotifier::from_config(Arc::new(LogChannel), &config);
//! let orchestrator =
//!     Orchestrator::new(task, notifier, store).with_run_timeout(config.run_timeout());
//!
//! let event = serde_json::json!({
//!     "detail": {"bucket": {"name": "inbox"}, "object": {"key": "contract.txt"}}
//! });
//! let report = orchestrator.handle_event(&event).await;
//! println!("{:?}", report.outcome);
//! # Ok(())
//! # }
//! ```
//!
//! ## Event stream
//!
//! [`PipelineWorker`] consumes envelopes from an mpsc channel and keeps at
//! most `max_concurrent_runs` runs in flight.
//!
//! # Configuration
//!
//! ```toml
//! [pipeline]
//! run_timeout_secs = 600
//! max_concurrent_runs = 8
//! notification_topic = "human-review"
//! notification_subject = "Guardrail Intervened"
//!
//! [notify]
//! channel = "webhook"
//!
//! [notify.webhook]
//! endpoint = "http://localhost:9000/hooks/review"
//! max_attempts = 3
//! ```

#![warn(missing_docs)]

mod channel;
mod config;
mod error;
mod event;
mod metrics;
mod notifier;
mod orchestrator;
mod task;
mod worker;

pub use channel::{LogChannel, MemoryChannel, WebhookChannel};
pub use config::{ChannelKind, NotifyConfig, PipelineConfig, DEFAULT_NOTIFICATION_SUBJECT};
pub use error::{PipelineError, RunError};
pub use event::{parse_trigger, parse_trigger_str};
pub use metrics::PipelineMetrics;
pub use notifier::{escalation_message, EscalationNotifier};
pub use orchestrator::{
    Decision, Orchestrator, RunOutcome, RunReport, StateName, DEFAULT_RUN_TIMEOUT,
};
pub use task::{ExtractionTask, TaskError};
pub use worker::{PipelineWorker, WorkerStop};

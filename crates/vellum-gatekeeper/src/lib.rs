//! Vellum Gatekeeper
//!
//! Content-safety evaluation of extracted metadata.
//!
//! The Gatekeeper submits the original document, a fixed evaluation
//! instruction and the extracted metadata to a guardrail service and maps
//! the returned action onto a [`GuardrailDisposition`]:
//!
//! - `NONE` → `Pass`
//! - anything else → `Intervened` (unrecognized actions are logged)
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use vellum_domain::ExtractedMetadata;
//! use vellum_gatekeeper::{GuardrailConfig, SafetyEvaluator};
//! use vellum_llm::MockGuardrail;
//!
//! # async fn example() -> Result<(), vellum_gatekeeper::GatekeeperError> {
//! let evaluator = SafetyEvaluator::new(Arc::new(MockGuardrail::new("NONE")), GuardrailConfig::default());
//! let metadata = ExtractedMetadata::new("contract", "en", "Supply deal");
//!
//! let disposition = evaluator.evaluate("Contract dated 2023 ...", &metadata).await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`GuardrailDisposition`]: vellum_domain::GuardrailDisposition

#![warn(missing_docs)]

mod config;
mod error;
mod evaluator;

pub use config::{GuardrailConfig, EVALUATION_INSTRUCTION};
pub use error::GatekeeperError;
pub use evaluator::{disposition_for_action, SafetyEvaluator};

//! Guardrail evaluation logic

use crate::{GatekeeperError, GuardrailConfig};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use vellum_domain::{ExtractedMetadata, GuardrailDisposition};
use vellum_llm::{
    GuardrailContent, GuardrailRequest, GuardrailService, GuardrailSource, Qualifier,
    ACTION_INTERVENED, ACTION_NONE,
};

/// Map a guardrail action onto a disposition
///
/// Only the pass sentinel (`NONE`) passes; every other value, documented or
/// not, is treated as an intervention.
pub fn disposition_for_action(action: &str) -> GuardrailDisposition {
    if action == ACTION_NONE {
        GuardrailDisposition::Pass
    } else {
        GuardrailDisposition::Intervened
    }
}

/// The Gatekeeper evaluates extracted metadata against the guardrail
pub struct SafetyEvaluator {
    service: Arc<dyn GuardrailService>,
    config: GuardrailConfig,
}

impl SafetyEvaluator {
    /// Create a new evaluator over a guardrail service
    pub fn new(service: Arc<dyn GuardrailService>, config: GuardrailConfig) -> Self {
        Self { service, config }
    }

    /// The configuration this evaluator was built with
    pub fn config(&self) -> &GuardrailConfig {
        &self.config
    }

    /// Build the three-segment guardrail request
    ///
    /// Segment order: content (grounding source + guard content), the
    /// evaluation instruction (query), then the metadata as pretty JSON
    /// (guard content).
    pub fn build_request(
        &self,
        content: &str,
        metadata: &ExtractedMetadata,
    ) -> Result<GuardrailRequest, GatekeeperError> {
        Ok(GuardrailRequest {
            guardrail_identifier: self.config.guardrail_id.clone(),
            guardrail_version: self.config.guardrail_version.clone(),
            source: GuardrailSource::Input,
            content: vec![
                GuardrailContent::new(
                    content,
                    vec![Qualifier::GroundingSource, Qualifier::GuardContent],
                ),
                GuardrailContent::new(self.config.instruction.clone(), vec![Qualifier::Query]),
                GuardrailContent::new(to_pretty_json(metadata)?, vec![Qualifier::GuardContent]),
            ],
        })
    }

    /// Evaluate content and its extracted metadata
    pub async fn evaluate(
        &self,
        content: &str,
        metadata: &ExtractedMetadata,
    ) -> Result<GuardrailDisposition, GatekeeperError> {
        let request = self.build_request(content, metadata)?;
        let response = self.service.apply(&request).await?;

        if response.action != ACTION_NONE && response.action != ACTION_INTERVENED {
            warn!(
                "Unrecognized guardrail action '{}', routing to human review",
                response.action
            );
        }

        let disposition = disposition_for_action(&response.action);
        info!(
            guardrail_action = %response.action,
            "Guardrail '{}' v{} returned {}",
            self.config.guardrail_id,
            self.config.guardrail_version,
            disposition.as_str()
        );
        Ok(disposition)
    }
}

/// Serialize with a four-space indent
fn to_pretty_json(metadata: &ExtractedMetadata) -> Result<String, GatekeeperError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    metadata
        .serialize(&mut serializer)
        .map_err(|e| GatekeeperError::Serialization(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| GatekeeperError::Serialization(e.to_string()))
}

//! Guardrail disposition - the content-safety verdict

use serde::{Deserialize, Serialize};

/// Outcome of a successful guardrail evaluation
///
/// A successful evaluation call only ever produces one of these two values.
/// Transport failures are reported as errors, not as a disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardrailDisposition {
    /// Content passed the guardrail
    Pass,

    /// Guardrail blocked or flagged the content
    Intervened,
}

impl GuardrailDisposition {
    /// Get the disposition name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardrailDisposition::Pass => "PASS",
            GuardrailDisposition::Intervened => "INTERVENED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(GuardrailDisposition::Pass.as_str(), "PASS");
        assert_eq!(GuardrailDisposition::Intervened.as_str(), "INTERVENED");
    }
}

//! Human escalation messages

use serde::{Deserialize, Serialize};

/// A message delivered to the human review channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Fixed topic/audience the message is addressed to
    pub topic: String,

    /// Subject line
    pub subject: String,

    /// Formatted body
    pub message: String,
}

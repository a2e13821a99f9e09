use serde::{Deserialize, Serialize};
use crate::message::Message;

/// One user message paired with the assistant's reply to it.
/// Created once, after a successful completion, and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    user_text: String,
    assistant_text: String,
    timestamp: String,
}

impl Exchange {
    /// Stamp a new exchange with the current UTC time (RFC 3339).
    pub fn new(user_text: impl Into<String>, assistant_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            assistant_text: assistant_text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn assistant_text(&self) -> &str {
        &self.assistant_text
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The exchange as a `[user, assistant]` message pair.
    pub fn to_messages(&self) -> [Message; 2] {
        [
            Message::user(&self.user_text),
            Message::assistant(&self.assistant_text),
        ]
    }
}

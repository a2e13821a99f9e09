use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Network(String),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("API error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Malformed reply: {0}")]
    UpstreamFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Agent not initialized. Please set your API key first.")]
    NotReady,

    #[error("Please enter a message to continue our conversation.")]
    EmptyInput,
}

impl ChatError {
    /// Timeout, connection failure, or non-2xx status
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ChatError::Network(_) | ChatError::Timeout(_) | ChatError::Http { .. }
        )
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}

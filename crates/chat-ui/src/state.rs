//! UI-level state that drives rendering.
//! This is a read-only projection of the chat runtime,
//! updated each frame by draining the EventBus.

use chat_types::completion::TokenUsage;
use chat_types::config::ChatConfig;
use chat_types::event::{ChatEvent, ProviderState};

/// Prefix that marks a failure in the transcript and status line
pub const FAILURE_MARKER: &str = "❌ ";
const SUCCESS_MARKER: &str = "✅ ";

/// State visible to UI panels
pub struct UiState {
    /// Displayed transcript
    pub messages: Vec<ChatEntry>,
    /// Provider initialization state as last reported
    pub provider_state: ProviderState,
    /// A turn is waiting on the endpoint
    pub turn_in_flight: bool,
    /// Streamed reply text being assembled
    pub streaming_text: String,
    /// Chat input field content
    pub input_text: String,
    /// Credential field content
    pub credential_input: String,
    /// Settings edited in the side panel; applied on the next Initialize
    pub config: ChatConfig,
    /// Use progressive rendering for replies
    pub stream_replies: bool,
    pub show_settings: bool,
    /// Status line text
    pub status_text: String,
    /// Retained-history summary shown in the top bar
    pub history_summary: String,
    /// Token counters of the last successful reply
    pub last_usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRole {
    User,
    Assistant,
    Error,
}

/// A transcript entry for display
#[derive(Debug, Clone)]
pub struct ChatEntry {
    pub role: EntryRole,
    pub content: String,
}

impl UiState {
    pub fn new() -> Self {
        Self::with_config(ChatConfig::default())
    }

    pub fn with_config(config: ChatConfig) -> Self {
        Self {
            messages: Vec::new(),
            provider_state: ProviderState::Uninitialized,
            turn_in_flight: false,
            streaming_text: String::new(),
            input_text: String::new(),
            credential_input: String::new(),
            config,
            stream_replies: false,
            show_settings: false,
            status_text: "Enter your API key and press Initialize".to_string(),
            history_summary: String::new(),
            last_usage: None,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::ProviderStateChanged { state, message } => {
                    self.provider_state = state;
                    self.status_text = match state {
                        ProviderState::Ready => format!("{}{}", SUCCESS_MARKER, message),
                        ProviderState::Verifying => message,
                        ProviderState::Uninitialized => format!("{}{}", FAILURE_MARKER, message),
                    };
                }
                ChatEvent::TurnStart { .. } => {
                    self.turn_in_flight = true;
                    self.streaming_text.clear();
                    self.status_text = "Thinking...".to_string();
                }
                ChatEvent::ReplyDelta { token } => {
                    self.streaming_text.push_str(&token);
                }
                ChatEvent::ReplyComplete { text, usage } => {
                    self.messages.push(ChatEntry {
                        role: EntryRole::Assistant,
                        content: text,
                    });
                    self.streaming_text.clear();
                    self.last_usage = Some(usage);
                }
                ChatEvent::TurnFailed { message } => {
                    self.messages.push(ChatEntry {
                        role: EntryRole::Error,
                        content: format!("{}{}", FAILURE_MARKER, message),
                    });
                    self.streaming_text.clear();
                    self.turn_in_flight = false;
                    self.status_text = format!("{}{}", FAILURE_MARKER, message);
                }
                ChatEvent::MessageRejected { message } => {
                    self.reject_message(&message);
                }
                ChatEvent::TurnEnd { .. } => {
                    self.turn_in_flight = false;
                    if !self.status_text.starts_with(FAILURE_MARKER) {
                        self.status_text = self.ready_status();
                    }
                }
                ChatEvent::HistoryCleared { message } => {
                    self.messages.clear();
                    self.streaming_text.clear();
                    self.last_usage = None;
                    self.status_text = message;
                }
            }
        }
    }

    /// Add a user message to the display
    pub fn push_user_message(&mut self, text: &str) {
        self.messages.push(ChatEntry {
            role: EntryRole::User,
            content: text.to_string(),
        });
    }

    /// Record that the last user message was never sent.
    /// The busy state is left alone: another turn may still be running.
    pub fn reject_message(&mut self, reason: &str) {
        self.messages.push(ChatEntry {
            role: EntryRole::Error,
            content: format!("{}{}", FAILURE_MARKER, reason),
        });
        self.status_text = format!("{}{}", FAILURE_MARKER, reason);
    }

    /// Show a local notice (e.g. a click rejected while a turn is running)
    pub fn set_notice(&mut self, text: impl Into<String>) {
        self.status_text = text.into();
    }

    pub fn is_busy(&self) -> bool {
        self.turn_in_flight || self.provider_state == ProviderState::Verifying
    }

    pub fn can_send(&self) -> bool {
        !self.is_busy() && !self.input_text.trim().is_empty()
    }

    fn ready_status(&self) -> String {
        match self.last_usage {
            Some(usage) if usage.total_tokens > 0 => format!(
                "Ready · last reply {} tokens ({} prompt + {} completion)",
                usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
            ),
            _ => "Ready".to_string(),
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

//! Conversation session: the retained window of prior exchanges.
//!
//! Every outbound message list is
//! `[system, (user, assistant) × retained, user]`.
//! Only successful turns are recorded; the oldest exchange is evicted
//! once the window is full.

use std::collections::VecDeque;
use std::fmt;

use futures::StreamExt;
use chat_types::{
    ChatError, Result,
    config::ChatConfig,
    exchange::Exchange,
    message::Message,
};
use crate::completion::StreamAssembler;
use crate::ports::{CompletionPort, LlmStreamEvent, NormalizedCompletion};

pub const CLEARED_MESSAGE: &str = "🧹 Conversation memory cleared.";

pub struct ConversationSession {
    id: String,
    system_prompt: String,
    history: VecDeque<Exchange>,
    max_exchanges: usize,
}

/// Count of retained exchanges, for display only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistorySummary {
    pub exchanges: usize,
}

impl fmt::Display for HistorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exchanges == 0 {
            write!(f, "No conversation history available.")
        } else {
            write!(f, "💭 Conversation history: {} exchanges", self.exchanges)
        }
    }
}

impl ConversationSession {
    pub fn new(system_prompt: impl Into<String>, max_exchanges: usize) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            system_prompt: system_prompt.into(),
            history: VecDeque::new(),
            max_exchanges: max_exchanges.max(1),
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(config.system_prompt.clone(), config.memory_window)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Retained exchanges, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Exchange> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn max_exchanges(&self) -> usize {
        self.max_exchanges
    }

    /// Resize the window; shrinking evicts the oldest exchanges.
    pub fn set_max_exchanges(&mut self, max_exchanges: usize) {
        self.max_exchanges = max_exchanges.max(1);
        self.evict_overflow();
    }

    /// Assemble the outbound message list for a new user turn.
    pub fn build_messages(&self, user_text: &str) -> Vec<Message> {
        let skip = self.history.len().saturating_sub(self.max_exchanges);
        let mut messages = Vec::with_capacity(2 + 2 * (self.history.len() - skip));
        messages.push(Message::system(&self.system_prompt));
        for exchange in self.history.iter().skip(skip) {
            messages.extend(exchange.to_messages());
        }
        messages.push(Message::user(user_text));
        messages
    }

    /// Send one turn and return the reply text.
    pub async fn submit(&mut self, user_text: &str, llm: &dyn CompletionPort) -> Result<String> {
        self.submit_completion(user_text, llm)
            .await
            .map(|completion| completion.content)
    }

    /// Like `submit`, keeping the full normalized result (usage, finish reason).
    pub async fn submit_completion(
        &mut self,
        user_text: &str,
        llm: &dyn CompletionPort,
    ) -> Result<NormalizedCompletion> {
        check_input(user_text)?;

        let messages = self.build_messages(user_text);
        log::debug!(
            "Session {}: sending {} messages",
            self.id,
            messages.len()
        );

        let completion = llm.complete(&messages, false).await?;
        self.record(user_text, &completion.content);
        Ok(completion)
    }

    /// Send one turn in streaming mode, handing each non-empty fragment
    /// to `on_delta` as it arrives. Recorded only if the stream ends cleanly.
    pub async fn submit_streaming(
        &mut self,
        user_text: &str,
        llm: &dyn CompletionPort,
        mut on_delta: impl FnMut(&str),
    ) -> Result<NormalizedCompletion> {
        check_input(user_text)?;

        let messages = self.build_messages(user_text);
        log::debug!(
            "Session {}: streaming {} messages",
            self.id,
            messages.len()
        );

        let mut events = llm.stream_chat(messages);
        let mut assembler = StreamAssembler::new();
        while let Some(event) = events.next().await {
            if let LlmStreamEvent::Delta(ref text) = event {
                if !text.is_empty() {
                    on_delta(text);
                }
            }
            if !assembler.apply(event)? {
                break;
            }
        }

        let completion = assembler.finish();
        self.record(user_text, &completion.content);
        Ok(completion)
    }

    /// Discard all retained exchanges.
    pub fn clear(&mut self) -> &'static str {
        self.history.clear();
        log::info!("Session {}: history cleared", self.id);
        CLEARED_MESSAGE
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            exchanges: self.history.len(),
        }
    }

    fn record(&mut self, user_text: &str, assistant_text: &str) {
        self.history.push_back(Exchange::new(user_text, assistant_text));
        self.evict_overflow();
    }

    fn evict_overflow(&mut self) {
        while self.history.len() > self.max_exchanges {
            self.history.pop_front();
        }
    }
}

fn check_input(user_text: &str) -> Result<()> {
    if user_text.trim().is_empty() {
        return Err(ChatError::EmptyInput);
    }
    Ok(())
}

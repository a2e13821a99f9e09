//! Port traits: the hexagonal architecture boundary.
//!
//! `CompletionPort` is defined here in `chat-core` (pure Rust).
//! The browser implementation lives in `chat-platform`.

use std::pin::Pin;
use async_trait::async_trait;
use futures::Stream;
use chat_types::{ChatError, Result, message::Message};

pub use chat_types::completion::{FinishReason, NormalizedCompletion, TokenUsage};

use crate::completion::{assemble_stream, text_fragments};

/// Message sent by the connectivity check
const PING_MESSAGE: &str = "Hello";

/// Streaming event from a completion endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum LlmStreamEvent {
    /// An incremental text fragment
    Delta(String),
    /// Usage summary, usually only on the final increment
    Usage(TokenUsage),
    /// Stream finished
    Done,
    /// Transport or upstream failure; nothing follows
    Error(ChatError),
}

pub type LlmEventStream = Pin<Box<dyn Stream<Item = LlmStreamEvent>>>;
pub type TextStream = Pin<Box<dyn Stream<Item = String>>>;

#[async_trait(?Send)]
pub trait CompletionPort {
    /// Non-streaming chat completion
    async fn chat_completion(&self, messages: &[Message]) -> Result<NormalizedCompletion>;

    /// Streaming chat completion, as the raw event sequence
    fn stream_chat(&self, messages: Vec<Message>) -> LlmEventStream;

    /// Normalized completion in either mode. In streaming mode the whole
    /// sequence is drained before returning.
    async fn complete(&self, messages: &[Message], stream: bool) -> Result<NormalizedCompletion> {
        if stream {
            assemble_stream(self.stream_chat(messages.to_vec())).await
        } else {
            self.chat_completion(messages).await
        }
    }

    /// Incremental delivery: non-empty text fragments as they arrive.
    /// A failure ends the sequence with an `"Error: …"` fragment.
    fn stream_text(&self, messages: Vec<Message>) -> TextStream {
        Box::pin(text_fragments(self.stream_chat(messages)))
    }

    /// One minimal completion call. All error detail is swallowed.
    async fn check_connection(&self) -> bool {
        match self.chat_completion(&[Message::user(PING_MESSAGE)]).await {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Connectivity check failed: {}", e);
                false
            }
        }
    }
}

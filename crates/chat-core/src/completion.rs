//! Stream normalization.
//!
//! `assemble_stream` drains a whole event sequence into one
//! `NormalizedCompletion`; `text_fragments` relays it piece by piece.

use futures::stream::{self, Stream, StreamExt};
use chat_types::Result;
use crate::ports::{LlmEventStream, LlmStreamEvent, NormalizedCompletion, TokenUsage};

/// Accumulates streamed fragments in arrival order.
#[derive(Debug, Default)]
pub struct StreamAssembler {
    content: String,
    usage: Option<TokenUsage>,
}

impl StreamAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Returns `false` once the stream is finished.
    pub fn apply(&mut self, event: LlmStreamEvent) -> Result<bool> {
        match event {
            LlmStreamEvent::Delta(text) => {
                self.content.push_str(&text);
                Ok(true)
            }
            LlmStreamEvent::Usage(usage) => {
                self.usage = Some(usage);
                Ok(true)
            }
            LlmStreamEvent::Done => Ok(false),
            LlmStreamEvent::Error(e) => Err(e),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn finish(self) -> NormalizedCompletion {
        if self.usage.is_none() {
            log::debug!("Stream ended without a usage summary");
        }
        NormalizedCompletion::from_stream(self.content, self.usage)
    }
}

/// Drain the whole stream and return the assembled completion.
pub async fn assemble_stream(mut events: LlmEventStream) -> Result<NormalizedCompletion> {
    let mut assembler = StreamAssembler::new();
    while let Some(event) = events.next().await {
        if !assembler.apply(event)? {
            break;
        }
    }
    Ok(assembler.finish())
}

/// Non-empty text fragments, in order. Usage events are dropped; an error
/// becomes a final `"Error: …"` fragment.
pub fn text_fragments(events: LlmEventStream) -> impl Stream<Item = String> {
    stream::unfold(Some(events), |state| async move {
        let mut events = state?;
        loop {
            match events.next().await? {
                LlmStreamEvent::Delta(text) if !text.is_empty() => {
                    return Some((text, Some(events)));
                }
                LlmStreamEvent::Delta(_) | LlmStreamEvent::Usage(_) => continue,
                LlmStreamEvent::Done => return None,
                LlmStreamEvent::Error(e) => return Some((format!("Error: {}", e), None)),
            }
        }
    })
}

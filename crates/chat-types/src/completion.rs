//! Normalized completion results.
//!
//! Every upstream reply, streamed or not, is reduced to one
//! `NormalizedCompletion`. Missing counters are zero.

use serde::{Deserialize, Serialize};
use crate::message::Role;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    /// A reason this client does not know about
    Other(String),
    /// The upstream did not report one
    Unspecified,
}

impl FinishReason {
    pub fn from_wire(reason: Option<&str>) -> Self {
        match reason {
            None => FinishReason::Unspecified,
            Some("stop") => FinishReason::Stop,
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            Some("tool_calls") | Some("function_call") => FinishReason::ToolCalls,
            Some(other) => FinishReason::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCompletion {
    pub content: String,
    pub role: Role,
    pub finish_reason: FinishReason,
    pub usage: TokenUsage,
}

impl NormalizedCompletion {
    /// Result shape for an assembled stream: finish reason is always `Stop`.
    pub fn from_stream(content: String, usage: Option<TokenUsage>) -> Self {
        Self {
            content,
            role: Role::Assistant,
            finish_reason: FinishReason::Stop,
            usage: usage.unwrap_or_default(),
        }
    }
}

//! OpenAI-compatible chat completions wire format.
//!
//! Reply shapes are declared with every field optional; defaulting happens
//! once here, at the parse boundary. A reply is only rejected when it is not
//! JSON at all, carries an `error` object, or carries no choices.

use serde::Deserialize;
use serde_json::{json, Value};

use chat_types::{
    ChatError, Result,
    config::ProviderConfig,
    message::{Message, Role},
};
use crate::ports::{FinishReason, LlmStreamEvent, NormalizedCompletion, TokenUsage};

/// SSE payload that terminates an OpenAI-style stream
pub const STREAM_DONE_SENTINEL: &str = "[DONE]";

pub fn build_request_body(config: &ProviderConfig, messages: &[Message], stream: bool) -> Value {
    let mut body = json!({
        "model": config.model,
        "messages": messages,
        "max_tokens": config.max_tokens,
        "temperature": config.temperature,
        "stream": stream,
    });

    if stream {
        body["stream_options"] = json!({ "include_usage": true });
    }

    body
}

// ─── Reply schema ────────────────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Deserialize)]
struct ApiChoice {
    #[serde(default)]
    message: Option<ApiMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
struct ApiMessage {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Default)]
struct ApiUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl From<ApiUsage> for TokenUsage {
    fn from(u: ApiUsage) -> Self {
        TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }
    }
}

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Option<StreamDelta>,
}

#[derive(Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

// ─── Normalization ───────────────────────────────────────────

/// Error reported in-band by the provider, as `{"error": {"message": ...}}`
/// or `{"error": "..."}`.
fn upstream_error(error: &Value) -> ChatError {
    let message = match error {
        Value::String(text) => text.clone(),
        Value::Object(fields) => fields
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    };
    ChatError::UpstreamFormat(format!("Provider error: {}", message))
}

/// Normalize a non-streaming reply body.
pub fn parse_completion(body: &str) -> Result<NormalizedCompletion> {
    let data: ApiResponse = serde_json::from_str(body)
        .map_err(|e| ChatError::UpstreamFormat(e.to_string()))?;

    if let Some(error) = data.error.as_ref().filter(|e| !e.is_null()) {
        return Err(upstream_error(error));
    }

    let choice = data
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ChatError::UpstreamFormat("No choices in response".to_string()))?;

    let message = choice.message.unwrap_or_default();
    let role = message
        .role
        .as_deref()
        .and_then(Role::parse)
        .unwrap_or(Role::Assistant);

    if data.usage.is_none() {
        log::warn!("Reply carried no usage counters; reporting zero");
    }

    Ok(NormalizedCompletion {
        content: message.content.unwrap_or_default(),
        role,
        finish_reason: FinishReason::from_wire(choice.finish_reason.as_deref()),
        usage: data.usage.map(TokenUsage::from).unwrap_or_default(),
    })
}

/// Turn one SSE `data:` payload into stream events.
/// Malformed payloads are skipped; an in-band `error` ends the stream.
pub fn parse_stream_payload(data: &str) -> Vec<LlmStreamEvent> {
    let data = data.trim();
    if data == STREAM_DONE_SENTINEL {
        return vec![LlmStreamEvent::Done];
    }

    let chunk: StreamChunk = match serde_json::from_str(data) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Skipping malformed stream chunk: {}", e);
            return Vec::new();
        }
    };

    if let Some(error) = chunk.error.as_ref().filter(|e| !e.is_null()) {
        log::warn!("Stream carried a provider error: {}", error);
        return vec![LlmStreamEvent::Error(upstream_error(error))];
    }

    let mut events = Vec::new();
    let text = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta)
        .and_then(|d| d.content)
        .filter(|t| !t.is_empty());
    if let Some(text) = text {
        events.push(LlmStreamEvent::Delta(text));
    }
    if let Some(usage) = chunk.usage {
        events.push(LlmStreamEvent::Usage(usage.into()));
    }
    events
}

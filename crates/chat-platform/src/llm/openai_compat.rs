//! OpenAI-compatible completion adapter.
//!
//! Works with Cerebras, OpenAI, DeepSeek, and any provider using the
//! OpenAI chat completions API format.
//! Uses browser `fetch()` via gloo-net; streamed bodies are read through
//! the response's `ReadableStream` and decoded as Server-Sent Events.

use std::collections::VecDeque;
use std::future::Future;

use async_trait::async_trait;
use futures::future::{self, Either};
use futures::stream::{self, Stream, StreamExt};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, ReadableStreamDefaultReader};

use chat_core::ports::{CompletionPort, LlmEventStream, LlmStreamEvent, NormalizedCompletion};
use chat_core::sse::SseDecoder;
use chat_core::wire::{build_request_body, parse_completion, parse_stream_payload};
use chat_types::{ChatError, Result, config::ProviderConfig, message::Message};

/// Provider that speaks the OpenAI chat completions protocol.
pub struct OpenAiCompatProvider {
    config: ProviderConfig,
    endpoint: String,
}

impl OpenAiCompatProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let endpoint = config.completions_url();
        Self { config, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn prepare(&self, messages: &[Message], stream: bool) -> PreparedRequest {
        PreparedRequest {
            url: self.endpoint.clone(),
            api_key: self.config.api_key.clone(),
            body: build_request_body(&self.config, messages, stream),
            timeout_ms: self.config.timeout_ms,
        }
    }
}

#[async_trait(?Send)]
impl CompletionPort for OpenAiCompatProvider {
    async fn chat_completion(&self, messages: &[Message]) -> Result<NormalizedCompletion> {
        let request = self.prepare(messages, false);
        log::debug!("POST {} ({} messages)", request.url, messages.len());

        let response = request.send().await?;
        let body = response.text(request.timeout_ms).await?;

        parse_completion(&body)
    }

    fn stream_chat(&self, messages: Vec<Message>) -> LlmEventStream {
        let request = self.prepare(&messages, true);
        log::debug!("POST {} ({} messages, streaming)", request.url, messages.len());

        Box::pin(
            stream::once(async move { SseBody::open(request).await }).flat_map(|opened| {
                match opened {
                    Ok(body) => body.into_events().left_stream(),
                    Err(e) => stream::iter([LlmStreamEvent::Error(e)]).right_stream(),
                }
            }),
        )
    }
}

// ─── Transport ───────────────────────────────────────────────

/// Everything needed to issue one request, owned so a stream can outlive
/// the provider borrow.
struct PreparedRequest {
    url: String,
    api_key: String,
    body: Value,
    timeout_ms: u64,
}

impl PreparedRequest {
    /// Send the request; non-2xx statuses become `ChatError::Http`.
    async fn send(&self) -> Result<SentResponse> {
        let controller = AbortController::new().ok();
        let signal = controller.as_ref().map(|c| c.signal());

        let request = Request::post(&self.url)
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .abort_signal(signal.as_ref())
            .json(&self.body)
            .map_err(|e| ChatError::Serialization(e.to_string()))?;

        let inner = match with_timeout(self.timeout_ms, request.send()).await {
            Ok(sent) => sent.map_err(|e| ChatError::Network(e.to_string()))?,
            Err(timeout) => {
                abort(controller.as_ref());
                return Err(timeout);
            }
        };
        let response = SentResponse { inner, controller };

        if !response.inner.ok() {
            let status = response.inner.status();
            let body = match response.text(self.timeout_ms).await {
                Ok(text) => text,
                Err(ChatError::Timeout(ms)) => return Err(ChatError::Timeout(ms)),
                Err(_) => "unknown error".to_string(),
            };
            return Err(ChatError::Http { status, body });
        }

        Ok(response)
    }
}

/// A response whose fetch can still be aborted while its body is read.
struct SentResponse {
    inner: Response,
    controller: Option<AbortController>,
}

impl SentResponse {
    /// Read the whole body, aborting the fetch if it stalls.
    async fn text(&self, timeout_ms: u64) -> Result<String> {
        match with_timeout(timeout_ms, self.inner.text()).await {
            Ok(read) => read.map_err(|e| ChatError::Network(e.to_string())),
            Err(timeout) => {
                self.abort();
                Err(timeout)
            }
        }
    }

    fn abort(&self) {
        abort(self.controller.as_ref());
    }
}

fn abort(controller: Option<&AbortController>) {
    if let Some(controller) = controller {
        controller.abort();
    }
}

/// Race `fut` against the request timeout.
async fn with_timeout<F: Future>(timeout_ms: u64, fut: F) -> Result<F::Output> {
    let millis = u32::try_from(timeout_ms).unwrap_or(u32::MAX);
    let timer = TimeoutFuture::new(millis);
    futures::pin_mut!(fut);
    futures::pin_mut!(timer);

    match future::select(fut, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(ChatError::Timeout(timeout_ms)),
    }
}

// ─── Streaming body ──────────────────────────────────────────

/// A streamed reply body being decoded chunk by chunk.
struct SseBody {
    response: SentResponse,
    reader: ReadableStreamDefaultReader,
    decoder: SseDecoder,
    pending: VecDeque<LlmStreamEvent>,
    timeout_ms: u64,
    eof: bool,
    finished: bool,
}

impl SseBody {
    async fn open(request: PreparedRequest) -> Result<Self> {
        let response = request.send().await?;
        let body = response
            .inner
            .body()
            .ok_or_else(|| ChatError::UpstreamFormat("Streaming reply has no body".to_string()))?;
        let reader: ReadableStreamDefaultReader = body.get_reader().unchecked_into();

        Ok(Self {
            response,
            reader,
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
            timeout_ms: request.timeout_ms,
            eof: false,
            finished: false,
        })
    }

    fn into_events(self) -> impl Stream<Item = LlmStreamEvent> {
        stream::unfold(self, |mut body| async move {
            let event = body.next_event().await?;
            Some((event, body))
        })
    }

    async fn next_event(&mut self) -> Option<LlmStreamEvent> {
        loop {
            if self.finished {
                return None;
            }

            if let Some(event) = self.pending.pop_front() {
                if matches!(event, LlmStreamEvent::Done | LlmStreamEvent::Error(_)) {
                    self.close();
                }
                return Some(event);
            }

            if self.eof {
                self.close();
                return Some(LlmStreamEvent::Done);
            }

            match self.read_chunk().await {
                Ok(Some(bytes)) => {
                    let payloads = self.decoder.feed(&bytes);
                    self.queue(payloads);
                }
                Ok(None) => {
                    let payloads = self.decoder.finish();
                    self.queue(payloads);
                    self.eof = true;
                }
                Err(e) => self.pending.push_back(LlmStreamEvent::Error(e)),
            }
        }
    }

    fn queue(&mut self, payloads: Vec<String>) {
        for payload in payloads {
            self.pending.extend(parse_stream_payload(&payload));
        }
    }

    async fn read_chunk(&self) -> Result<Option<Vec<u8>>> {
        let result = match with_timeout(self.timeout_ms, JsFuture::from(self.reader.read())).await {
            Ok(read) => read,
            Err(timeout) => {
                self.response.abort();
                return Err(timeout);
            }
        }
        .map_err(|e| ChatError::Network(format!("{:?}", e)))?;

        let done = js_sys::Reflect::get(&result, &JsValue::from_str("done"))
            .map(|v| v.is_truthy())
            .unwrap_or(true);
        if done {
            return Ok(None);
        }

        let value = js_sys::Reflect::get(&result, &JsValue::from_str("value"))
            .map_err(|e| ChatError::Network(format!("{:?}", e)))?;
        Ok(Some(js_sys::Uint8Array::new(&value).to_vec()))
    }

    /// Stop reading; anything still queued or unread is discarded.
    fn close(&mut self) {
        self.finished = true;
        self.pending.clear();
        if !self.eof {
            let _ = self.reader.cancel();
        }
    }
}

//! WASM-target tests for chat-platform (Node.js runtime).
//!
//! Network-free checks of the OpenAI-compatible adapter under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use chat_platform::llm::OpenAiCompatProvider;
use chat_types::config::{LlmProvider, ProviderConfig};

#[wasm_bindgen_test]
fn endpoint_uses_provider_default() {
    let provider = OpenAiCompatProvider::new(ProviderConfig::default());
    assert_eq!(provider.endpoint(), "https://api.cerebras.ai/v1/chat/completions");
}

#[wasm_bindgen_test]
fn endpoint_uses_override() {
    let config = ProviderConfig {
        provider: LlmProvider::Custom,
        api_base: Some("http://localhost:11434/v1/".to_string()),
        ..ProviderConfig::default()
    };
    let provider = OpenAiCompatProvider::new(config);
    assert_eq!(provider.endpoint(), "http://localhost:11434/v1/chat/completions");
}

#[wasm_bindgen_test]
fn endpoint_switches_with_provider() {
    let config = ProviderConfig {
        provider: LlmProvider::DeepSeek,
        ..ProviderConfig::default()
    };
    let provider = OpenAiCompatProvider::new(config);
    assert_eq!(provider.endpoint(), "https://api.deepseek.com/v1/chat/completions");
}

//! WASM-target tests for chat-types.
//!
//! Mirrors a subset of the native unit tests under wasm32-unknown-unknown
//! via `wasm-pack test --node`. The exchange timestamp goes through
//! chrono's `wasmbind` clock here.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use chat_types::config::*;
use chat_types::error::*;
use chat_types::exchange::*;
use chat_types::message::*;

#[wasm_bindgen_test]
fn message_roles() {
    assert_eq!(Message::system("sys").role(), Role::System);
    assert_eq!(Message::user("hi").content(), "hi");
    assert_eq!(Role::parse("assistant"), Some(Role::Assistant));
}

#[wasm_bindgen_test]
fn exchange_timestamp_from_browser_clock() {
    let exchange = Exchange::new("q", "a");
    assert!(chrono::DateTime::parse_from_rfc3339(exchange.timestamp()).is_ok());
    let [user, assistant] = exchange.to_messages();
    assert_eq!(user.role(), Role::User);
    assert_eq!(assistant.content(), "a");
}

#[wasm_bindgen_test]
fn config_defaults_and_credential() {
    let config = ChatConfig::default();
    assert_eq!(config.memory_window, 10);
    assert_eq!(
        config.provider.completions_url(),
        "https://api.cerebras.ai/v1/chat/completions"
    );
    assert!(config.provider.with_credential("  ").is_err());
    assert_eq!(config.provider.with_credential(" csk-1 ").unwrap().api_key, "csk-1");
}

#[wasm_bindgen_test]
fn custom_provider_needs_base_url() {
    let custom = ProviderConfig {
        provider: LlmProvider::Custom,
        ..ProviderConfig::default()
    };
    assert!(matches!(custom.with_credential("csk-1"), Err(ChatError::Config(_))));
}

#[wasm_bindgen_test]
fn error_messages() {
    assert_eq!(
        ChatError::NotReady.to_string(),
        "Agent not initialized. Please set your API key first."
    );
    assert!(ChatError::Timeout(10).is_transport());
}

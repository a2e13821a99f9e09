use serde::{Deserialize, Serialize};
use crate::{ChatError, Result};

/// Top-level chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub provider: ProviderConfig,
    /// Number of most recent exchanges kept as context
    pub memory_window: usize,
    pub system_prompt: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            memory_window: DEFAULT_MEMORY_WINDOW,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

pub const DEFAULT_MEMORY_WINDOW: usize = 10;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub api_key: String,
    pub api_base: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Cerebras,
            model: "llama-4-scout-17b-16e-instruct".to_string(),
            api_key: String::new(),
            api_base: None,
            max_tokens: 1000,
            temperature: 0.7,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ProviderConfig {
    /// Endpoint base URL: the explicit override if set, else the provider default.
    pub fn base_url(&self) -> String {
        let base = match self.api_base.as_deref().map(str::trim) {
            Some(custom) if !custom.is_empty() => custom,
            _ => self.provider.default_base_url(),
        };
        base.trim_end_matches('/').to_string()
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url())
    }

    /// Trim and check a user-supplied credential.
    pub fn validate_credential(raw: &str) -> Result<String> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(ChatError::Config("API key is required".to_string()));
        }
        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ChatError::Config(
                "API key must not contain whitespace or control characters".to_string(),
            ));
        }
        Ok(key.to_string())
    }

    /// Check that the endpoint resolves to an absolute http(s) URL.
    pub fn validate_endpoint(&self) -> Result<()> {
        let base = self.base_url();
        if base.is_empty() {
            return Err(ChatError::Config(format!(
                "API base URL is required for the {} provider",
                self.provider.label()
            )));
        }
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(ChatError::Config(format!(
                "API base URL must start with http:// or https://, got {}",
                base
            )));
        }
        Ok(())
    }

    /// Copy of this config carrying a validated credential.
    /// Fails before any request when the endpoint cannot be resolved.
    pub fn with_credential(&self, raw: &str) -> Result<Self> {
        self.validate_endpoint()?;
        let api_key = Self::validate_credential(raw)?;
        Ok(Self {
            api_key,
            ..self.clone()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlmProvider {
    Cerebras,
    OpenAI,
    DeepSeek,
    Custom,
}

impl LlmProvider {
    pub fn default_base_url(&self) -> &str {
        match self {
            LlmProvider::Cerebras => "https://api.cerebras.ai/v1",
            LlmProvider::OpenAI => "https://api.openai.com/v1",
            LlmProvider::DeepSeek => "https://api.deepseek.com/v1",
            LlmProvider::Custom => "",
        }
    }

    pub fn all() -> &'static [LlmProvider] {
        &[
            LlmProvider::Cerebras,
            LlmProvider::OpenAI,
            LlmProvider::DeepSeek,
            LlmProvider::Custom,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            LlmProvider::Cerebras => "Cerebras",
            LlmProvider::OpenAI => "OpenAI",
            LlmProvider::DeepSeek => "DeepSeek",
            LlmProvider::Custom => "Custom",
        }
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = r#"You are Agent Zero, an advanced AI assistant. You are:

**Capabilities:**
- Helpful, knowledgeable, and friendly
- Able to assist with coding, writing, analysis, and general questions
- Equipped with reasoning and problem-solving abilities
- Capable of maintaining context throughout our conversation

**Your Goals:**
- Provide accurate and helpful responses
- Be clear and concise in your explanations
- Ask clarifying questions when needed
- Maintain a professional yet approachable tone

**Special Instructions:**
- Always strive to be helpful and constructive
- If you're unsure about something, say so
- Provide examples when helpful
- Break down complex topics into understandable parts
"#;

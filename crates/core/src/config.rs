//! Session configuration loaded from TOML.

use crate::ChatError;
use krill_llm::{ChatConfig, ModelKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level session configuration.
///
/// Loaded once at session start and immutable for the session's lifetime.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Completion endpoint configuration.
    pub llm: LlmConfig,
    /// Prompt configuration.
    pub chat: PromptConfig,
}

impl SessionConfig {
    /// Parse a TOML string into a `SessionConfig`.
    pub fn from_toml(toml_str: &str) -> Result<Self, ChatError> {
        let config = toml::from_str(toml_str)?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ChatError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

/// Completion endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier.
    pub model: ModelKind,
    /// API key (supports `${ENV_VAR}` expansion, resolved when read).
    pub api_key: String,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens per completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Optional override for the provider endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::default(),
            api_key: "${GROQ_API_KEY}".to_owned(),
            temperature: Some(0.7),
            max_tokens: None,
            endpoint: None,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key, expanding `${VAR}` patterns from the
    /// environment. An unset variable resolves to the empty string.
    pub fn key(&self) -> String {
        expand_env_vars(&self.api_key)
    }

    /// The chat parameters for completion requests.
    pub fn chat_config(&self) -> ChatConfig {
        ChatConfig {
            model: self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// Prompt configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// System prompt sent with every request. Empty disables it.
    pub system_prompt: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_prompt: "You are a helpful assistant powered by Groq. \
                            Answer questions clearly and concisely."
                .to_owned(),
        }
    }
}

/// Expand `${VAR}` patterns in a string with environment variable values.
///
/// Unknown variables expand to the empty string; an unterminated `${` is
/// kept literally.
pub fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                if let Ok(value) = std::env::var(&after[..end]) {
                    out.push_str(&value);
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

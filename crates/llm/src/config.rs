//! Configuration for a chat completion

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Chat completion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// The model to use
    pub model: ModelKind,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatConfig {
    /// Create a new configuration for the given model
    pub fn new(model: ModelKind) -> Self {
        Self {
            model,
            ..Default::default()
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::default(),
            temperature: Some(0.7),
            max_tokens: None,
        }
    }
}

/// Supported model identifiers on the Groq endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelKind {
    /// Llama 3 8B with an 8192-token context (default).
    #[default]
    #[serde(rename = "llama3-8b-8192")]
    Llama3,
    /// Gemma 2 9B instruction-tuned.
    #[serde(rename = "gemma2-9b-it")]
    Gemma2,
}

impl ModelKind {
    /// The identifier the endpoint expects.
    pub fn id(self) -> &'static str {
        match self {
            Self::Llama3 => "llama3-8b-8192",
            Self::Gemma2 => "gemma2-9b-it",
        }
    }
}

impl Display for ModelKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

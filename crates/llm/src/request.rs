//! OpenAI-compatible chat completions request body.
//!
//! Optional fields use `Option` + `skip_serializing_if` so they are simply
//! absent from the wire when unset.

use crate::{ChatConfig, Message};
use serde::Serialize;

/// Chat completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The messages to send.
    pub messages: Vec<Message>,

    /// The model identifier.
    pub model: String,

    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Whether to stream the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl Request {
    /// Build a request body from a chat configuration and messages.
    pub fn new(config: &ChatConfig, messages: &[Message]) -> Self {
        Self {
            messages: messages.to_vec(),
            model: config.model.id().to_owned(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            stream: None,
        }
    }

    /// Enable streaming for the request.
    pub fn stream(mut self) -> Self {
        self.stream = Some(true);
        self
    }
}

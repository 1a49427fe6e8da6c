//! Chat messages exchanged with the completion endpoint.

use crate::StreamChunk;
use serde::{Deserialize, Serialize};

/// A message in the chat
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Message {
    /// The role of the message
    pub role: Role,

    /// The content of the message
    #[serde(default)]
    pub content: String,
}

impl Message {
    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Create a new message builder
    pub fn builder(role: Role) -> MessageBuilder {
        MessageBuilder::new(role)
    }
}

/// Accumulates stream chunks into a complete message.
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    /// Create a new message builder
    pub fn new(role: Role) -> Self {
        Self {
            message: Message {
                role,
                content: String::new(),
            },
        }
    }

    /// Accept a chunk from the stream.
    ///
    /// Returns `true` when the chunk carried content; role-only deltas
    /// and the terminal chunk return `false`.
    pub fn accept(&mut self, chunk: &StreamChunk) -> bool {
        let Some(content) = chunk.content() else {
            return false;
        };
        self.message.content.push_str(content);
        true
    }

    /// Whether no content has been accumulated yet
    pub fn is_empty(&self) -> bool {
        self.message.content.is_empty()
    }

    /// Build the message
    pub fn build(self) -> Message {
        self.message
    }
}

/// The role of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
pub enum Role {
    /// The user role
    #[serde(rename = "user")]
    #[default]
    User,
    /// The assistant role
    #[serde(rename = "assistant")]
    Assistant,
    /// The system role
    #[serde(rename = "system")]
    System,
}

//! Completion gateway for Groq-hosted chat models.
//!
//! This crate provides the wire types shared with the OpenAI-compatible
//! chat-completions endpoint: `Message`, `Request`, `Response`, `StreamChunk`,
//! the [`Llm`] provider trait, and [`HttpProvider`] for the HTTP/SSE
//! transport.

pub use config::{ChatConfig, ModelKind};
pub use error::Error;
pub use http::{GROQ_ENDPOINT, HttpProvider};
pub use message::{Message, MessageBuilder, Role};
pub use noop::NoopProvider;
pub use provider::Llm;
pub use request::Request;
pub use response::{Choice, CompletionMeta, Delta, FinishReason, Response, Usage};
pub use reqwest::{self, Client};
pub use stream::{StreamChoice, StreamChunk};

mod config;
mod error;
mod http;
mod message;
mod noop;
mod provider;
mod request;
mod response;
mod stream;

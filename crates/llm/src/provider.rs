//! Provider abstraction for the completion endpoint

use crate::{ChatConfig, Error, Message, Response, StreamChunk};
use futures_core::Stream;
use reqwest::Client;

/// A chat completion provider
pub trait Llm: Sized + Clone {
    /// Create a new provider
    fn new(client: Client, key: &str) -> Result<Self, Error>
    where
        Self: Sized;

    /// Request a full completion
    fn send(
        &self,
        config: &ChatConfig,
        messages: &[Message],
    ) -> impl Future<Output = Result<Response, Error>> + Send;

    /// Request a streamed completion.
    ///
    /// The returned stream is finite and single-pass: it terminates when
    /// the endpoint signals completion and cannot be restarted.
    fn stream(
        &self,
        config: &ChatConfig,
        messages: &[Message],
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send;
}

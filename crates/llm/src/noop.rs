//! No-op completion provider for testing.
//!
//! Implements [`Llm`] but panics on `send` and `stream`. Intended for
//! unit tests that exercise transcript and session logic without making
//! real completion calls.

use crate::{ChatConfig, Error, Llm, Message, Response, StreamChunk};
use futures_core::Stream;
use reqwest::Client;

/// A no-op provider that panics on any actual completion call.
///
/// # Panics
///
/// Both `send` and `stream` panic if called. Only use this provider
/// in tests that never invoke completion methods.
#[derive(Clone, Copy)]
pub struct NoopProvider;

impl Llm for NoopProvider {
    fn new(_client: Client, _key: &str) -> Result<Self, Error> {
        Ok(Self)
    }

    async fn send(&self, _config: &ChatConfig, _messages: &[Message]) -> Result<Response, Error> {
        panic!("NoopProvider::send called; not intended for real completion calls");
    }

    fn stream(
        &self,
        _config: &ChatConfig,
        _messages: &[Message],
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send {
        async_stream::stream! {
            panic!("NoopProvider::stream called; not intended for real completion calls");
            #[allow(unreachable_code)]
            {
                yield Ok(StreamChunk::default());
            }
        }
    }
}

//! HTTP transport for the OpenAI-compatible completion endpoint.
//!
//! `HttpProvider` wraps a `reqwest::Client` with pre-configured headers and
//! endpoint URL. Provides `send()` for non-streaming and Server-Sent Events
//! parsing for streaming completions.

use crate::{ChatConfig, Error, Llm, Message, Request, Response, StreamChunk};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{
    Client, StatusCode,
    header::{self, HeaderMap, HeaderValue},
};

/// The Groq chat-completions endpoint.
pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// HTTP transport for OpenAI-compatible completion endpoints.
///
/// Holds a `reqwest::Client`, pre-built headers (auth + content-type),
/// and the target endpoint URL.
#[derive(Clone, Debug)]
pub struct HttpProvider {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
}

impl HttpProvider {
    /// Create a provider with Bearer token authentication.
    pub fn bearer(client: Client, key: &str, endpoint: &str) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {key}")
                .parse()
                .map_err(|_| Error::Auth("key is not a valid header value".into()))?,
        );
        Ok(Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        })
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl Llm for HttpProvider {
    fn new(client: Client, key: &str) -> Result<Self, Error> {
        Self::bearer(client, key, GROQ_ENDPOINT)
    }

    async fn send(&self, config: &ChatConfig, messages: &[Message]) -> Result<Response, Error> {
        let body = Request::new(config, messages);
        tracing::trace!("request: {}", serde_json::to_string(&body)?);
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?;
        let text = ensure_success(response).await?.text().await?;
        serde_json::from_str(&text).map_err(Into::into)
    }

    fn stream(
        &self,
        config: &ChatConfig,
        messages: &[Message],
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send {
        let body = Request::new(config, messages).stream();
        if let Ok(body) = serde_json::to_string(&body) {
            tracing::trace!("request: {}", body);
        }
        let request = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&body);

        try_stream! {
            let response = request.send().await?;
            let response = ensure_success(response).await?;
            let mut stream = response.bytes_stream();
            while let Some(next) = stream.next().await {
                let bytes = next?;
                let text = String::from_utf8_lossy(&bytes);
                tracing::trace!("chunk: {}", text);
                for data in text.split("data: ").skip(1).filter(|s| !s.starts_with("[DONE]")) {
                    let trimmed = data.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<StreamChunk>(trimmed) {
                        Ok(chunk) => yield chunk,
                        Err(e) => tracing::warn!("failed to parse chunk: {e}, data: {trimmed}"),
                    }
                }
            }
        }
    }
}

/// Map a non-success response to the gateway error taxonomy.
///
/// 401 and 403 are credential rejections; any other non-success status is
/// a service error.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        Err(Error::Auth(format!("{status}: {message}")))
    } else {
        Err(Error::Service { status, message })
    }
}

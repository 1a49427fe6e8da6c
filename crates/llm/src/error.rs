//! Gateway error taxonomy.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by the completion gateway.
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint rejected the credential.
    #[error("credential rejected: {0}")]
    Auth(String),

    /// The endpoint answered with a non-success status.
    #[error("service error ({status}): {message}")]
    Service {
        /// The HTTP status returned by the endpoint.
        status: StatusCode,
        /// The response body, as far as it could be read.
        message: String,
    },

    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error is an authentication failure.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

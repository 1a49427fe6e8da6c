//! Session error taxonomy.

use compact_str::CompactString;
use thiserror::Error;

/// Errors surfaced to the chat UI.
///
/// None of these are fatal to the session: after reporting one, the
/// session accepts the next submission as usual.
#[derive(Debug, Error)]
pub enum ChatError {
    /// No API key could be resolved.
    #[error("no API key configured; set GROQ_API_KEY or [llm] api_key")]
    MissingCredential,

    /// The completion gateway failed during a submission.
    #[error("completion failed: {0}")]
    Gateway(#[from] krill_llm::Error),

    /// A completion is already being streamed.
    #[error("a completion is already in progress")]
    Busy,

    /// No conversation is saved under the given name.
    #[error("no saved conversation named {0:?}")]
    UnknownConversation(CompactString),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

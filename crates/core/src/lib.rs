//! Chat session layer.
//!
//! Owns the in-memory transcript of a conversation and drives completion
//! requests against a [`krill_llm::Llm`] provider: `Transcript` (the
//! append-only turn store), `Archive` (named in-memory snapshots),
//! `Session` (the submission state machine), and `SessionConfig`.

pub use archive::Archive;
pub use config::{LlmConfig, PromptConfig, SessionConfig, expand_env_vars};
pub use error::ChatError;
pub use session::{Phase, Session};
pub use transcript::{Transcript, TranscriptStats};

mod archive;
mod config;
mod error;
mod session;
mod transcript;

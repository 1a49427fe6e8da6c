//! Chat session: transcript ownership and the submission cycle.

use crate::{Archive, ChatError, SessionConfig, Transcript};
use futures_util::{StreamExt, pin_mut};
use krill_llm::{
    Client, FinishReason, GROQ_ENDPOINT, HttpProvider, Llm, Message, MessageBuilder, Role,
};

/// Where the session is in its submission cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Ready for the next submission.
    #[default]
    Idle,
    /// A completion stream is being consumed.
    Streaming,
}

/// A chat session: one transcript, one configuration, one provider.
///
/// The session is the sole owner of its transcript; the UI layer calls
/// into it and never mutates the transcript directly. One submission is
/// processed at a time: a submission arriving while a stream is still
/// being consumed is rejected with [`ChatError::Busy`].
pub struct Session<P> {
    config: SessionConfig,
    credential: String,
    provider: P,
    transcript: Transcript,
    archive: Archive,
    phase: Phase,
}

impl Session<HttpProvider> {
    /// Build a session over the HTTP provider described by `config`.
    ///
    /// Fails with [`ChatError::MissingCredential`] when the resolved API
    /// key is empty.
    pub fn connect(config: SessionConfig) -> Result<Self, ChatError> {
        let key = config.llm.key();
        if key.is_empty() {
            return Err(ChatError::MissingCredential);
        }

        let endpoint = config
            .llm
            .endpoint
            .clone()
            .unwrap_or_else(|| GROQ_ENDPOINT.to_owned());
        let provider = HttpProvider::bearer(Client::new(), &key, &endpoint)?;
        Ok(Self::new(config, provider))
    }
}

impl<P: Llm> Session<P> {
    /// Create a session with an explicit provider.
    ///
    /// The credential is resolved from the configuration once, here;
    /// later environment changes do not affect the session.
    pub fn new(config: SessionConfig, provider: P) -> Self {
        Self {
            credential: config.llm.key(),
            config,
            provider,
            transcript: Transcript::new(),
            archive: Archive::new(),
            phase: Phase::Idle,
        }
    }

    /// The session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The conversation so far
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Where the session is in its submission cycle
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Submit user text and stream the reply.
    ///
    /// Appends the user turn, pulls the completion stream to exhaustion
    /// invoking `on_fragment` for every content delta, then appends the
    /// concatenated reply as the assistant turn and returns it. When the
    /// stream fails after producing content, the partial reply is still
    /// appended before the error is returned; no turn is rolled back.
    pub async fn submit<F>(
        &mut self,
        text: impl Into<String>,
        mut on_fragment: F,
    ) -> Result<Message, ChatError>
    where
        F: FnMut(&str),
    {
        let text = text.into();
        self.begin()?;

        let messages = self.prompt(&text);
        self.transcript.append(Message::user(text));

        let config = self.config.llm.chat_config();
        let mut builder = MessageBuilder::new(Role::Assistant);
        let outcome = {
            let stream = self.provider.stream(&config, &messages);
            pin_mut!(stream);
            loop {
                match stream.next().await {
                    Some(Ok(chunk)) => {
                        builder.accept(&chunk);
                        if let Some(fragment) = chunk.content() {
                            on_fragment(fragment);
                        }
                        if let Some(reason) = chunk.reason() {
                            if *reason != FinishReason::Stop {
                                tracing::debug!("completion ended early: {reason:?}");
                            }
                            break Ok(());
                        }
                    }
                    Some(Err(e)) => break Err(e),
                    None => break Ok(()),
                }
            }
        };
        self.phase = Phase::Idle;

        match outcome {
            Ok(()) => {
                let reply = builder.build();
                self.transcript.append(reply.clone());
                Ok(reply)
            }
            Err(e) => {
                // Best-effort retention: whatever already streamed in
                // becomes the assistant turn.
                if !builder.is_empty() {
                    self.transcript.append(builder.build());
                }
                Err(e.into())
            }
        }
    }

    /// Submit user text and wait for the complete reply.
    pub async fn complete(&mut self, text: impl Into<String>) -> Result<Message, ChatError> {
        let text = text.into();
        self.begin()?;

        let messages = self.prompt(&text);
        self.transcript.append(Message::user(text));

        let config = self.config.llm.chat_config();
        let result = self.provider.send(&config, &messages).await;
        self.phase = Phase::Idle;

        let response = result?;
        let reply = response
            .message()
            .unwrap_or_else(|| Message::assistant(""));
        self.transcript.append(reply.clone());
        Ok(reply)
    }

    /// Explicit transition back to idle after an interrupted stream.
    ///
    /// A submission whose future was dropped mid-stream leaves the
    /// session in [`Phase::Streaming`]; this is the recovery path.
    pub fn abort(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Reset the transcript. Saved conversations are untouched.
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    /// Save a copy of the current transcript under `name`.
    pub fn save_as(&mut self, name: impl Into<compact_str::CompactString>) {
        self.archive
            .save(name, self.transcript.messages().to_vec());
    }

    /// Replace the transcript with the conversation saved under `name`.
    pub fn restore(&mut self, name: &str) -> Result<(), ChatError> {
        let messages = self
            .archive
            .get(name)
            .ok_or_else(|| ChatError::UnknownConversation(name.into()))?;
        self.transcript = Transcript::from(messages.to_vec());
        Ok(())
    }

    /// Remove the conversation saved under `name`.
    pub fn discard(&mut self, name: &str) -> Result<(), ChatError> {
        self.archive
            .remove(name)
            .map(drop)
            .ok_or_else(|| ChatError::UnknownConversation(name.into()))
    }

    /// Names of the saved conversations, in sorted order.
    pub fn saved(&self) -> impl Iterator<Item = &str> {
        self.archive.names()
    }

    /// Check the submission preconditions and enter the streaming phase.
    fn begin(&mut self) -> Result<(), ChatError> {
        if self.phase == Phase::Streaming {
            return Err(ChatError::Busy);
        }
        if self.credential.is_empty() {
            return Err(ChatError::MissingCredential);
        }
        self.phase = Phase::Streaming;
        Ok(())
    }

    /// The messages sent to the gateway for one submission: the
    /// configured system prompt plus the submitted text.
    fn prompt(&self, text: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2);
        if !self.config.chat.system_prompt.is_empty() {
            messages.push(Message::system(self.config.chat.system_prompt.as_str()));
        }
        messages.push(Message::user(text));
        messages
    }
}

//! Session behavior tests with scripted providers.

use futures_core::Stream;
use futures_util::{pin_mut, poll};
use krill_core::{ChatError, Phase, Session, SessionConfig};
use krill_llm::{
    ChatConfig, Choice, Client, CompletionMeta, Delta, Error, FinishReason, Llm, Message,
    NoopProvider, Response, Role, StreamChoice, StreamChunk, reqwest::StatusCode,
};
use std::sync::{Arc, Mutex};

/// Replays a fixed fragment script, optionally failing afterwards.
///
/// Records the messages it was last invoked with, so tests can assert
/// what actually went over the wire.
#[derive(Clone, Default)]
struct ScriptedLlm {
    fragments: Vec<&'static str>,
    fail_after: bool,
    seen: Arc<Mutex<Vec<Message>>>,
}

impl ScriptedLlm {
    fn replay(fragments: &[&'static str]) -> Self {
        Self {
            fragments: fragments.to_vec(),
            ..Self::default()
        }
    }

    fn failing(fragments: &[&'static str]) -> Self {
        Self {
            fail_after: true,
            ..Self::replay(fragments)
        }
    }

    fn seen(&self) -> Vec<Message> {
        self.seen.lock().unwrap().clone()
    }
}

impl Llm for ScriptedLlm {
    fn new(_client: Client, _key: &str) -> Result<Self, Error> {
        Ok(Self::default())
    }

    async fn send(&self, _config: &ChatConfig, messages: &[Message]) -> Result<Response, Error> {
        *self.seen.lock().unwrap() = messages.to_vec();
        if self.fail_after {
            return Err(service_error());
        }
        Ok(Response {
            meta: CompletionMeta::default(),
            choices: vec![Choice {
                index: 0,
                message: Delta {
                    role: Some(Role::Assistant),
                    content: Some(self.fragments.concat()),
                },
                finish_reason: Some(FinishReason::Stop),
            }],
            usage: None,
        })
    }

    fn stream(
        &self,
        _config: &ChatConfig,
        messages: &[Message],
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send {
        *self.seen.lock().unwrap() = messages.to_vec();
        let fragments = self.fragments.clone();
        let fail_after = self.fail_after;
        async_stream::stream! {
            for fragment in fragments {
                yield Ok(chunk(fragment));
            }
            if fail_after {
                yield Err(service_error());
            }
        }
    }
}

/// Never yields; used to park a submission in the streaming phase.
#[derive(Clone, Copy)]
struct StalledLlm;

impl Llm for StalledLlm {
    fn new(_client: Client, _key: &str) -> Result<Self, Error> {
        Ok(Self)
    }

    async fn send(&self, _config: &ChatConfig, _messages: &[Message]) -> Result<Response, Error> {
        std::future::pending().await
    }

    fn stream(
        &self,
        _config: &ChatConfig,
        _messages: &[Message],
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send {
        async_stream::stream! {
            std::future::pending::<()>().await;
            yield Ok(StreamChunk::default());
        }
    }
}

fn chunk(content: &str) -> StreamChunk {
    StreamChunk {
        meta: CompletionMeta::default(),
        choices: vec![StreamChoice {
            index: 0,
            delta: Delta {
                role: None,
                content: Some(content.to_owned()),
            },
            finish_reason: None,
        }],
        usage: None,
    }
}

fn service_error() -> Error {
    Error::Service {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: "boom".to_owned(),
    }
}

fn config_with_key() -> SessionConfig {
    let mut config = SessionConfig::default();
    config.llm.api_key = "gsk-test".to_owned();
    config
}

#[tokio::test]
async fn streamed_fragments_concatenate_into_the_reply() {
    let mut session = Session::new(config_with_key(), ScriptedLlm::replay(&["Hel", "lo"]));

    let mut collected = String::new();
    let reply = session
        .submit("hi", |fragment| collected.push_str(fragment))
        .await
        .unwrap();

    assert_eq!(reply.content, "Hello");
    assert_eq!(collected, "Hello");

    let messages = session.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], Message::user("hi"));
    assert_eq!(messages[1], Message::assistant("Hello"));
    assert_eq!(session.phase(), Phase::Idle);
}

#[tokio::test]
async fn partial_reply_is_retained_on_stream_failure() {
    let mut session = Session::new(config_with_key(), ScriptedLlm::failing(&["Hel"]));

    let err = session.submit("hi", |_| {}).await.unwrap_err();
    assert!(matches!(err, ChatError::Gateway(_)));

    let messages = session.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1], Message::assistant("Hel"));
    assert_eq!(session.phase(), Phase::Idle);
}

#[tokio::test]
async fn failure_before_any_fragment_appends_no_assistant_turn() {
    let mut session = Session::new(config_with_key(), ScriptedLlm::failing(&[]));

    let err = session.submit("hi", |_| {}).await.unwrap_err();
    assert!(matches!(err, ChatError::Gateway(_)));

    let messages = session.transcript().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::User);
}

#[tokio::test]
async fn missing_credential_leaves_the_transcript_untouched() {
    let mut config = SessionConfig::default();
    config.llm.api_key = String::new();
    // NoopProvider panics on any completion call, so this also proves
    // the gateway is never reached.
    let mut session = Session::new(config, NoopProvider);

    let err = session.submit("hi", |_| {}).await.unwrap_err();
    assert!(matches!(err, ChatError::MissingCredential));
    assert!(session.transcript().is_empty());
    assert_eq!(session.phase(), Phase::Idle);
}

#[test]
fn connect_without_credential_fails() {
    let mut config = SessionConfig::default();
    config.llm.api_key = String::new();
    assert!(matches!(
        Session::connect(config).map(drop).unwrap_err(),
        ChatError::MissingCredential
    ));
}

#[tokio::test]
async fn turns_alternate_across_submissions() {
    let mut session = Session::new(config_with_key(), ScriptedLlm::replay(&["ok"]));

    for question in ["one", "two", "three"] {
        session.submit(question, |_| {}).await.unwrap();
    }

    let stats = session.transcript().stats();
    assert_eq!(stats.user, 3);
    assert_eq!(stats.assistant, 3);
    for pair in session.transcript().messages().chunks(2) {
        assert_eq!(pair[0].role, Role::User);
        assert_eq!(pair[1].role, Role::Assistant);
    }

    // Reading twice without an append yields the same sequence.
    assert_eq!(
        session.transcript().messages(),
        session.transcript().messages()
    );
}

#[tokio::test]
async fn session_stays_usable_after_a_failure() {
    let mut session = Session::new(config_with_key(), ScriptedLlm::failing(&[]));
    assert!(session.submit("hi", |_| {}).await.is_err());

    // The next submission goes through the same cycle again.
    let err = session.submit("again", |_| {}).await.unwrap_err();
    assert!(matches!(err, ChatError::Gateway(_)));
    assert_eq!(session.transcript().stats().user, 2);
}

#[tokio::test]
async fn concurrent_submission_is_rejected_until_abort() {
    let mut session = Session::new(config_with_key(), StalledLlm);

    {
        let pending = session.submit("first", |_| {});
        pin_mut!(pending);
        assert!(poll!(pending.as_mut()).is_pending());
        // Dropped mid-stream: the session stays in the streaming phase.
    }
    assert_eq!(session.phase(), Phase::Streaming);

    let err = session.submit("second", |_| {}).await.unwrap_err();
    assert!(matches!(err, ChatError::Busy));

    session.abort();
    assert_eq!(session.phase(), Phase::Idle);
}

#[tokio::test]
async fn gateway_receives_system_prompt_and_question_only() {
    let provider = ScriptedLlm::replay(&["ok"]);
    let mut session = Session::new(config_with_key(), provider.clone());

    session.submit("first", |_| {}).await.unwrap();
    session.submit("second", |_| {}).await.unwrap();

    let seen = provider.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].role, Role::System);
    assert_eq!(seen[1], Message::user("second"));
}

#[tokio::test]
async fn empty_system_prompt_is_omitted_from_the_request() {
    let provider = ScriptedLlm::replay(&["ok"]);
    let mut config = config_with_key();
    config.chat.system_prompt = String::new();
    let mut session = Session::new(config, provider.clone());

    session.submit("hi", |_| {}).await.unwrap();
    assert_eq!(provider.seen(), vec![Message::user("hi")]);
}

#[tokio::test]
async fn complete_appends_the_full_reply() {
    let mut session = Session::new(config_with_key(), ScriptedLlm::replay(&["Hello there"]));

    let reply = session.complete("hi").await.unwrap();
    assert_eq!(reply.content, "Hello there");
    assert_eq!(session.transcript().len(), 2);
}

#[tokio::test]
async fn complete_failure_appends_no_assistant_turn() {
    let mut session = Session::new(config_with_key(), ScriptedLlm::failing(&[]));

    assert!(session.complete("hi").await.is_err());
    assert_eq!(session.transcript().len(), 1);
    assert_eq!(session.phase(), Phase::Idle);
}

#[tokio::test]
async fn save_restore_and_discard_conversations() {
    let mut session = Session::new(config_with_key(), ScriptedLlm::replay(&["ok"]));
    session.submit("hi", |_| {}).await.unwrap();

    session.save_as("morning");
    let saved: Vec<_> = session.saved().map(str::to_owned).collect();
    assert_eq!(saved, ["morning"]);

    session.clear();
    assert!(session.transcript().is_empty());

    session.restore("morning").unwrap();
    assert_eq!(session.transcript().len(), 2);

    assert!(matches!(
        session.restore("evening").unwrap_err(),
        ChatError::UnknownConversation(_)
    ));

    session.discard("morning").unwrap();
    assert!(matches!(
        session.restore("morning").unwrap_err(),
        ChatError::UnknownConversation(_)
    ));
}

#[tokio::test]
async fn clear_keeps_saved_conversations() {
    let mut session = Session::new(config_with_key(), ScriptedLlm::replay(&["ok"]));
    session.submit("hi", |_| {}).await.unwrap();
    session.save_as("kept");

    session.clear();
    session.restore("kept").unwrap();
    assert_eq!(session.transcript().stats().user, 1);
}

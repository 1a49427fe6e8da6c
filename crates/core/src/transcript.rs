//! Append-only transcript of chat turns.

use krill_llm::{Message, Role};

/// The ordered history of turns for one session.
///
/// Turns are append-only: a message is never edited or removed once it
/// lands, only the whole transcript can be cleared. Insertion order is
/// conversation order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn to the end
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The full ordered sequence of turns
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Reset to empty
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// The number of turns
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript holds no turns
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate over the turns in order
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Case-insensitive substring search over turn content.
    ///
    /// Display helper for the history panel; matching turns keep their
    /// conversation order.
    pub fn search(&self, term: &str) -> Vec<&Message> {
        let needle = term.to_lowercase();
        self.messages
            .iter()
            .filter(|message| message.content.to_lowercase().contains(&needle))
            .collect()
    }

    /// Aggregate counters over the transcript.
    pub fn stats(&self) -> TranscriptStats {
        let mut stats = TranscriptStats {
            total: self.messages.len(),
            ..Default::default()
        };
        let mut assistant_chars = 0;
        for message in &self.messages {
            match message.role {
                Role::User => stats.user += 1,
                Role::Assistant => {
                    stats.assistant += 1;
                    assistant_chars += message.content.chars().count();
                }
                Role::System => {}
            }
        }
        if stats.assistant > 0 {
            stats.avg_assistant_chars = assistant_chars / stats.assistant;
        }
        stats
    }
}

impl From<Vec<Message>> for Transcript {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Counters for the statistics panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranscriptStats {
    /// Total number of turns.
    pub total: usize,
    /// Number of user turns.
    pub user: usize,
    /// Number of assistant turns.
    pub assistant: usize,
    /// Average assistant reply length in chars (0 without assistant turns).
    pub avg_assistant_chars: usize,
}

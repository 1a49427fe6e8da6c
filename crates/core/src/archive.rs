//! Named in-memory snapshots of past conversations.

use compact_str::CompactString;
use krill_llm::Message;
use std::collections::BTreeMap;

/// Saved conversations, keyed by name.
///
/// Snapshots live for the process lifetime only; nothing is persisted.
/// Saving under an existing name replaces the previous snapshot.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    saved: BTreeMap<CompactString, Vec<Message>>,
}

impl Archive {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a snapshot under `name`
    pub fn save(&mut self, name: impl Into<CompactString>, messages: Vec<Message>) {
        self.saved.insert(name.into(), messages);
    }

    /// Get the snapshot saved under `name`
    pub fn get(&self, name: &str) -> Option<&[Message]> {
        self.saved.get(name).map(Vec::as_slice)
    }

    /// Remove the snapshot saved under `name`
    pub fn remove(&mut self, name: &str) -> Option<Vec<Message>> {
        self.saved.remove(name)
    }

    /// The saved conversation names, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.saved.keys().map(CompactString::as_str)
    }

    /// The number of saved conversations
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    /// Whether no conversations are saved
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}

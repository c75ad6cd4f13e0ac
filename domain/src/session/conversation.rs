//! Conversation history and snapshots.

use super::entities::Message;
use serde::{Serialize, Serializer};
use std::ops::Deref;
use std::sync::Arc;

/// The canonical, append-only message log of one chat.
///
/// [`append`](Conversation::append) is the only mutator. Messages are never
/// reordered, edited or removed.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the tail.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Copy the current log into an immutable [`Snapshot`].
    ///
    /// Later appends are not visible through the returned snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(Arc::from(self.messages.as_slice()))
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// An immutable copy of a [`Conversation`] taken at the start of a turn.
///
/// Cloning a snapshot is cheap; all clones share the same frozen messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(Arc<[Message]>);

impl Snapshot {
    pub fn messages(&self) -> &[Message] {
        &self.0
    }
}

impl Deref for Snapshot {
    type Target = [Message];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Message>> for Snapshot {
    fn from(messages: Vec<Message>) -> Self {
        Snapshot(Arc::from(messages))
    }
}

impl Serialize for Snapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

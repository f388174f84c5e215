//! Read-only conversation history and the "last N" window over it.

use helpdesk_proto::fixture::{FixtureError, ensure_monotonic};
use helpdesk_proto::message::{ConversationId, Message, MessageId};

/// The most recent `n` items of `items` (all of them if `n` exceeds the length).
#[must_use]
pub fn last_n<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// A conversation's full history, oldest first. Never mutated.
#[derive(Debug, Clone)]
pub struct ConversationSource {
    id: ConversationId,
    messages: Vec<Message>,
}

impl ConversationSource {
    /// Wrap a history after checking its ids are strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NonMonotonicIds`] if two ids are out of order
    /// or repeated.
    pub fn new(id: ConversationId, messages: Vec<Message>) -> Result<Self, FixtureError> {
        ensure_monotonic(&messages)?;
        Ok(Self { id, messages })
    }

    /// A conversation with no history.
    #[must_use]
    pub const fn empty(id: ConversationId) -> Self {
        Self {
            id,
            messages: Vec::new(),
        }
    }

    /// Conversation id.
    #[must_use]
    pub const fn id(&self) -> ConversationId {
        self.id
    }

    /// Number of messages in the history.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// All messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent `n` messages.
    #[must_use]
    pub fn window(&self, n: usize) -> &[Message] {
        last_n(&self.messages, n)
    }

    /// The messages that become visible when the window grows from `from`
    /// to `to` items, oldest first.
    #[must_use]
    pub fn older_slice(&self, from: usize, to: usize) -> &[Message] {
        let len = self.messages.len();
        let start = len.saturating_sub(to);
        let end = len.saturating_sub(from);
        &self.messages[start..end.max(start)]
    }

    /// Id of the newest message, if any.
    #[must_use]
    pub fn last_id(&self) -> Option<MessageId> {
        self.messages.last().map(|m| m.id)
    }
}

//! Chat message types shared by the feed, the assistant and the fixtures.
//!
//! Messages are immutable once created. Ids are plain integers that only
//! have to be monotonic within one conversation; they carry no global
//! meaning.

use serde::{Deserialize, Serialize};

/// Identifier of a message within one conversation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    /// Creates a `MessageId` from a raw integer.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id immediately after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a conversation (one customer thread or the assistant).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ConversationId(u64);

impl ConversationId {
    /// Creates a `ConversationId` from a raw integer.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Monotonic id within the conversation.
    pub id: MessageId,
    /// Display name of the author.
    pub sender: String,
    /// Short avatar label (usually one letter).
    pub avatar: String,
    /// Message body.
    pub content: String,
    /// Pre-formatted display timestamp (e.g. "1min", "14:23", "now").
    pub timestamp: String,
    /// `true` when authored by the local agent persona.
    #[serde(default)]
    pub is_user: bool,
    /// Read receipt, only meaningful for counterpart messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seen: Option<bool>,
}

impl Message {
    /// Whether a read receipt should be shown for this message.
    #[must_use]
    pub fn shows_seen(&self) -> bool {
        !self.is_user && self.seen == Some(true)
    }
}

/// Who a new local message is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// Display name.
    pub name: String,
    /// Avatar label.
    pub avatar: String,
}

impl Persona {
    /// Creates a persona from a name and avatar label.
    #[must_use]
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

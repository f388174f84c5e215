//! Inbox list types.

use serde::{Deserialize, Serialize};

use crate::message::ConversationId;

/// Priority flag of an inbox item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Regular item.
    #[default]
    Normal,
    /// Flagged item, shown with a marker.
    High,
}

/// One row of the inbox list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxItem {
    /// Stable item id.
    pub id: u64,
    /// Conversation opened when the item is selected, if any.
    #[serde(default)]
    pub conversation: Option<ConversationId>,
    /// Customer name.
    pub sender: String,
    /// Avatar label.
    pub avatar: String,
    /// Customer's company.
    #[serde(default)]
    pub company: Option<String>,
    /// Display age of the last message (e.g. "45m").
    pub time: String,
    /// How long the customer has been waiting, used for sorting.
    #[serde(default)]
    pub waiting_minutes: u32,
    /// Preview of the last message.
    pub message: String,
    /// Secondary line (e.g. the thread subject).
    #[serde(default)]
    pub subtext: Option<String>,
    /// Priority flag.
    #[serde(default)]
    pub priority: Priority,
    /// Whether the agent has read the thread.
    #[serde(default)]
    pub is_read: bool,
    /// Whether the customer is currently online.
    #[serde(default)]
    pub is_active: bool,
    /// Whether the thread carries an attachment.
    #[serde(default)]
    pub has_attachment: bool,
    /// Unread message count shown as a badge.
    #[serde(default)]
    pub unread: u32,
}

impl InboxItem {
    /// Whether the item is flagged.
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.priority == Priority::High
    }

    /// Whether the item still needs attention: unread or customer online.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !self.is_read || self.is_active
    }
}

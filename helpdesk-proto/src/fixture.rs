//! Fixture data: the inbox list and the conversations behind it.
//!
//! A built-in set ships with the binary. A TOML file with the same shape can
//! replace it:
//!
//! ```toml
//! [[inbox]]
//! id = 1
//! conversation = 1
//! sender = "Luis Easton"
//! avatar = "L"
//! time = "45m"
//! message = "I bought a product from your store..."
//!
//! [[conversations]]
//! id = 1
//! title = "Luis Easton"
//!
//! [[conversations.messages]]
//! id = 1
//! sender = "Luis Easton"
//! avatar = "L"
//! content = "Hi, I need help with an order."
//! timestamp = "45min"
//! is_user = true
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::inbox::{InboxItem, Priority};
use crate::message::{ConversationId, Message, MessageId};

/// Errors produced while loading or validating fixtures.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The fixture file could not be read.
    #[error("failed to read fixture file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The fixture file is not valid TOML for the fixture schema.
    #[error("failed to parse fixtures: {0}")]
    Parse(#[from] toml::de::Error),

    /// Message ids in a conversation are not strictly increasing.
    #[error("message ids must be strictly increasing (id {found} follows {previous})")]
    NonMonotonicIds {
        /// The id preceding the offending one.
        previous: MessageId,
        /// The offending id.
        found: MessageId,
    },

    /// An inbox item points at a conversation that does not exist.
    #[error("inbox item {item} refers to unknown conversation {conversation}")]
    UnknownConversation {
        /// The inbox item id.
        item: u64,
        /// The missing conversation.
        conversation: ConversationId,
    },

    /// Two conversations share an id.
    #[error("duplicate conversation id {0}")]
    DuplicateConversation(ConversationId),
}

/// A conversation and its full, read-only history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationFixture {
    /// Conversation id referenced by inbox items.
    pub id: ConversationId,
    /// Panel title, usually the customer's name.
    pub title: String,
    /// History, oldest first.
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// All fixture data used by the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureSet {
    /// Inbox rows, in display order before sorting.
    pub inbox: Vec<InboxItem>,
    /// Conversations referenced by the inbox.
    pub conversations: Vec<ConversationFixture>,
}

impl FixtureSet {
    /// Parse and validate a fixture set from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Parse`] for malformed input and the
    /// validation variants for inconsistent data.
    pub fn from_toml_str(text: &str) -> Result<Self, FixtureError> {
        let set: Self = toml::from_str(text)?;
        set.validate()?;
        Ok(set)
    }

    /// Read, parse and validate a fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Read`] if the file cannot be read, otherwise
    /// the same errors as [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check cross-references and id ordering.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), FixtureError> {
        let mut seen = HashSet::new();
        for conv in &self.conversations {
            if !seen.insert(conv.id) {
                return Err(FixtureError::DuplicateConversation(conv.id));
            }
            ensure_monotonic(&conv.messages)?;
        }
        for item in &self.inbox {
            if let Some(conversation) = item.conversation
                && !seen.contains(&conversation)
            {
                return Err(FixtureError::UnknownConversation {
                    item: item.id,
                    conversation,
                });
            }
        }
        Ok(())
    }

    /// Look up a conversation by id.
    #[must_use]
    pub fn conversation(&self, id: ConversationId) -> Option<&ConversationFixture> {
        self.conversations.iter().find(|c| c.id == id)
    }

    /// The fixture set compiled into the binary.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            inbox: builtin_inbox(),
            conversations: vec![
                ConversationFixture {
                    id: ConversationId::new(1),
                    title: "Luis Easton".into(),
                    messages: refund_thread(),
                },
                ConversationFixture {
                    id: ConversationId::new(2),
                    title: "Ivan Ramos".into(),
                    messages: shipping_thread(),
                },
                ConversationFixture {
                    id: ConversationId::new(3),
                    title: "Lead from New York".into(),
                    messages: Vec::new(),
                },
            ],
        }
    }
}

/// Reject any sequence whose ids are not strictly increasing.
///
/// # Errors
///
/// Returns [`FixtureError::NonMonotonicIds`] at the first violation.
pub fn ensure_monotonic(messages: &[Message]) -> Result<(), FixtureError> {
    for pair in messages.windows(2) {
        if pair[1].id <= pair[0].id {
            return Err(FixtureError::NonMonotonicIds {
                previous: pair[0].id,
                found: pair[1].id,
            });
        }
    }
    Ok(())
}

fn builtin_inbox() -> Vec<InboxItem> {
    let row = |id: u64, sender: &str, time: &str, waiting: u32, message: &str| InboxItem {
        id,
        conversation: None,
        sender: sender.into(),
        avatar: sender.chars().next().map(String::from).unwrap_or_default(),
        company: None,
        time: time.into(),
        waiting_minutes: waiting,
        message: message.into(),
        subtext: None,
        priority: Priority::Normal,
        is_read: true,
        is_active: false,
        has_attachment: false,
        unread: 0,
    };

    vec![
        InboxItem {
            conversation: Some(ConversationId::new(1)),
            company: Some("Github".into()),
            is_read: false,
            is_active: true,
            unread: 3,
            ..row(
                1,
                "Luis Easton",
                "45m",
                45,
                "Hi there, I have a question about my order refund...",
            )
        },
        InboxItem {
            conversation: Some(ConversationId::new(2)),
            subtext: Some("Shipping delay".into()),
            priority: Priority::High,
            is_read: false,
            ..row(
                2,
                "Ivan Ramos",
                "30m",
                30,
                "Hey! I still haven't received my package.",
            )
        },
        InboxItem {
            conversation: Some(ConversationId::new(3)),
            company: Some("Acme".into()),
            has_attachment: true,
            ..row(
                3,
                "Lead from New York",
                "40m",
                40,
                "Good morning, let me know about your pricing tiers.",
            )
        },
        InboxItem {
            subtext: Some("Booking API problems".into()),
            priority: Priority::High,
            ..row(
                4,
                "Miracle",
                "45m",
                45,
                "Bug report: the booking endpoint returns 500.",
            )
        },
        row(
            5,
            "Priya",
            "1h",
            60,
            "Thanks, that solved it! Have a great day.",
        ),
    ]
}

fn thread(lines: &[(bool, &str, &str)], customer: (&str, &str)) -> Vec<Message> {
    lines
        .iter()
        .zip(1u64..)
        .map(|(&(is_user, content, timestamp), id)| {
            let (sender, avatar) = if is_user {
                customer
            } else {
                ("Support Agent", "S")
            };
            Message {
                id: MessageId::new(id),
                sender: sender.into(),
                avatar: avatar.into(),
                content: content.into(),
                timestamp: timestamp.into(),
                is_user,
                seen: (!is_user).then_some(true),
            }
        })
        .collect()
}

fn refund_thread() -> Vec<Message> {
    thread(
        &[
            (true, "Hi, I bought a sound system from your store last month.", "2h"),
            (false, "Hello Luis! Thanks for reaching out. How can I help?", "2h"),
            (true, "It stopped working after two weeks.", "2h"),
            (false, "Sorry to hear that. Did you try resetting it to factory settings?", "1h"),
            (true, "Yes, twice. No luck.", "1h"),
            (false, "Understood. Is the power light on when you plug it in?", "1h"),
            (true, "It blinks red a few times and then turns off.", "58min"),
            (false, "That points to a hardware fault, not something you did.", "55min"),
            (true, "So what are my options?", "52min"),
            (false, "We can replace the unit or refund the purchase.", "50min"),
            (true, "I would prefer a refund, I already bought another one.", "48min"),
            (false, "No problem. Was it purchased online or in one of our stores?", "47min"),
            (true, "Online. I still have the confirmation email.", "46min"),
            (true, "I would like to request a refund for the full amount.", "45min"),
        ],
        ("Luis Easton", "L"),
    )
}

fn shipping_thread() -> Vec<Message> {
    thread(
        &[
            (true, "Hey! I still haven't received my package.", "35min"),
            (false, "Let me check the tracking number for you.", "33min"),
            (true, "The tracker hasn't moved in four days.", "31min"),
            (false, "It is held at the regional depot. I've escalated it.", "30min"),
        ],
        ("Ivan Ramos", "I"),
    )
}

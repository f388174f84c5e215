//! The copilot panel: a question/answer feed backed by [`classify`].
//!
//! An [`AssistantSession`] lives for the whole run of the application and is
//! never recreated when the layout changes; only the panel around it moves.

pub mod classify;

use std::time::Duration;

use helpdesk_proto::message::{ConversationId, MessageId, Persona};
use tokio::time::Instant;

use crate::compose::ComposeInput;
use crate::feed::{ConversationSource, FeedChange, FeedController, FeedSettings, ReplyPolicy};

pub use classify::{ReplyCategory, classify};

/// Conversation id reserved for the assistant feed.
pub const ASSISTANT_CONVERSATION: ConversationId = ConversationId::new(0);

/// Panel title.
pub const TITLE: &str = "Fin AI Copilot";

/// Line shown before the first question.
pub const INTRO: &str = "Ask me anything about this conversation.";

/// Questions offered until the user asks something.
pub const SUGGESTED_QUESTIONS: [&str; 3] = [
    "How do I get a refund?",
    "What's my account balance?",
    "How to contact support?",
];

/// State of the assistant panel.
#[derive(Debug)]
pub struct AssistantSession {
    feed: FeedController,
    /// Question being typed.
    pub input: ComposeInput,
    show_suggestions: bool,
    show_intro: bool,
}

impl AssistantSession {
    /// A fresh session whose answers land after `reply_delay`.
    #[must_use]
    pub fn new(reply_delay: Duration, base: &FeedSettings) -> Self {
        let settings = FeedSettings {
            reply_delay,
            ..base.clone()
        };
        let feed = FeedController::new(ConversationSource::empty(ASSISTANT_CONVERSATION), settings)
            .with_personas(Persona::new("You", "Y"), Persona::new("Fin", "F"))
            .with_reply_policy(ReplyPolicy::Classify);
        Self {
            feed,
            input: ComposeInput::new(),
            show_suggestions: true,
            show_intro: true,
        }
    }

    /// Send the composed question. Blank input is ignored.
    pub fn submit(&mut self, now: Instant) -> Option<MessageId> {
        let id = self.feed.send_message(self.input.text(), now)?;
        self.input.clear();
        self.show_suggestions = false;
        self.show_intro = false;
        Some(id)
    }

    /// Copy suggestion `index` into the input. Does not send.
    ///
    /// Returns `false` if suggestions are hidden or the index is out of range.
    pub fn pick_suggestion(&mut self, index: usize) -> bool {
        if !self.suggestions_visible() {
            return false;
        }
        let Some(question) = SUGGESTED_QUESTIONS.get(index) else {
            return false;
        };
        self.input.set(question);
        true
    }

    /// Whether the suggested questions should be shown.
    #[must_use]
    pub fn suggestions_visible(&self) -> bool {
        self.show_suggestions && self.feed.messages().len() <= 1
    }

    /// Whether the intro line should be shown.
    #[must_use]
    pub fn intro_visible(&self) -> bool {
        self.show_intro && self.feed.messages().is_empty()
    }

    /// Drive pending replies.
    pub fn tick(&mut self, now: Instant) -> Vec<FeedChange> {
        self.feed.tick(now)
    }

    /// The question/answer feed.
    #[must_use]
    pub const fn feed(&self) -> &FeedController {
        &self.feed
    }

    /// Mutable access to the feed, for scrolling.
    pub const fn feed_mut(&mut self) -> &mut FeedController {
        &mut self.feed
    }
}

//! An open customer conversation: its feed plus the compose box.

use helpdesk_proto::fixture::{ConversationFixture, FixtureError};
use helpdesk_proto::message::{ConversationId, MessageId};
use tokio::time::Instant;

use crate::compose::ComposeInput;
use crate::feed::{ConversationSource, FeedChange, FeedController, FeedSettings};

/// State of the chat panel while a conversation is open.
///
/// Dropping the session drops its feed and with it every pending timer.
#[derive(Debug)]
pub struct ChatSession {
    title: String,
    feed: FeedController,
    /// Message being composed.
    pub input: ComposeInput,
}

impl ChatSession {
    /// Open `fixture` with the newest page of its history visible.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NonMonotonicIds`] if the history is out of order.
    pub fn open(fixture: &ConversationFixture, settings: FeedSettings) -> Result<Self, FixtureError> {
        let source = ConversationSource::new(fixture.id, fixture.messages.clone())?;
        tracing::info!(
            conversation = %fixture.id,
            history = source.len(),
            "chat opened"
        );
        Ok(Self {
            title: fixture.title.clone(),
            feed: FeedController::new(source, settings),
            input: ComposeInput::new(),
        })
    }

    /// Send the composed message. Blank input is ignored and kept.
    pub fn submit(&mut self, now: Instant) -> Option<MessageId> {
        let id = self.feed.send_message(self.input.text(), now)?;
        self.input.clear();
        Some(id)
    }

    /// Drive pending pagination and replies.
    pub fn tick(&mut self, now: Instant) -> Vec<FeedChange> {
        self.feed.tick(now)
    }

    /// Cancel pending work and consume the session.
    pub fn close(mut self) {
        self.feed.cancel_all();
        tracing::info!(
            conversation = %self.feed.conversation(),
            sent = self.feed.local_tail().len(),
            "chat closed"
        );
    }

    /// Panel title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Conversation id.
    #[must_use]
    pub const fn conversation(&self) -> ConversationId {
        self.feed.conversation()
    }

    /// The message feed.
    #[must_use]
    pub const fn feed(&self) -> &FeedController {
        &self.feed
    }

    /// Mutable access to the feed, for scrolling.
    pub const fn feed_mut(&mut self) -> &mut FeedController {
        &mut self.feed
    }
}

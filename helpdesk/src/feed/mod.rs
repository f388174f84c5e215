//! Message feed controller for one conversation.
//!
//! A [`FeedController`] owns the visible part of a conversation: the newest
//! `visible_count` messages of its [`ConversationSource`] followed by the
//! messages authored during this session (the local tail). It supports:
//!
//! - backward pagination ([`load_older`](FeedController::load_older)), which
//!   waits a simulated latency and then prepends the next older page;
//! - optimistic send ([`send_message`](FeedController::send_message)), which
//!   appends immediately and queues exactly one synthetic reply;
//! - scroll anchoring through a [`Viewport`].
//!
//! All waiting is expressed as deadlines in [`Timers`]; the owner drives them
//! with [`tick`](FeedController::tick). Replies are delivered strictly in
//! send order: only one reply deadline is armed per conversation, and the
//! next one is armed when the previous reply lands.

pub mod timers;
pub mod viewport;
pub mod window;

use std::collections::VecDeque;
use std::time::Duration;

use helpdesk_proto::message::{ConversationId, Message, MessageId, Persona};
use tokio::time::Instant;

use crate::assistant::classify;

pub use timers::{TimerKey, TimerKind, Timers};
pub use viewport::Viewport;
pub use window::{ConversationSource, last_n};

/// Reply sent by the simulated customer-side agent in a chat.
pub const CANNED_REPLY: &str = "Thank you for providing that information. I can help process your refund request. Could you please provide your order number?";

/// Tunables for a feed.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    /// Messages materialized per page.
    pub page_size: usize,
    /// Simulated latency of loading an older page.
    pub load_latency: Duration,
    /// Delay before a synthetic reply lands.
    pub reply_delay: Duration,
    /// Rows from the bottom that still count as "following" new messages.
    pub follow_threshold: usize,
    /// Initial number of visible rows, until the UI reports the real height.
    pub viewport_height: usize,
    /// chrono format for timestamps of locally authored messages.
    pub timestamp_format: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            load_latency: Duration::from_millis(500),
            reply_delay: Duration::from_millis(2000),
            follow_threshold: 1,
            viewport_height: 20,
            timestamp_format: "%H:%M".to_string(),
        }
    }
}

/// How synthetic replies are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyPolicy {
    /// Always the same text.
    Canned(String),
    /// Keyword classification of the sent text.
    Classify,
}

impl ReplyPolicy {
    /// Reply text for a sent message.
    #[must_use]
    pub fn reply_to(&self, prompt: &str) -> String {
        match self {
            Self::Canned(text) => text.clone(),
            Self::Classify => classify(prompt).to_string(),
        }
    }
}

impl Default for ReplyPolicy {
    fn default() -> Self {
        Self::Canned(CANNED_REPLY.to_string())
    }
}

/// Result of a pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOlder {
    /// A load was started and will land after the simulated latency.
    Scheduled,
    /// A load is already pending; the request was ignored.
    InFlight,
    /// The whole history is visible; the request was ignored.
    Exhausted,
    /// The viewport has not reached its top edge; nothing was requested.
    NotAtTop,
}

/// Something a timer changed in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedChange {
    /// An older page was prepended.
    OlderLoaded {
        /// Number of messages prepended.
        added: usize,
    },
    /// A synthetic reply was appended.
    ReplyAppended {
        /// Id of the reply.
        id: MessageId,
    },
}

/// Controller for the visible message feed of one conversation.
#[derive(Debug)]
pub struct FeedController {
    source: ConversationSource,
    settings: FeedSettings,
    local: Persona,
    counterpart: Persona,
    policy: ReplyPolicy,
    visible_count: usize,
    /// Number of leading entries of `messages` that come from `source`.
    window_len: usize,
    messages: Vec<Message>,
    is_typing: bool,
    is_loading_older: bool,
    /// Sent texts still waiting for their reply, oldest first.
    pending_replies: VecDeque<String>,
    timers: Timers,
    viewport: Viewport,
}

impl FeedController {
    /// Create a feed over `source` and materialize the first page.
    #[must_use]
    pub fn new(source: ConversationSource, settings: FeedSettings) -> Self {
        let viewport = Viewport::new(settings.viewport_height, settings.follow_threshold);
        let page_size = settings.page_size;
        let mut feed = Self {
            source,
            settings,
            local: Persona::new("Luis Easton", "L"),
            counterpart: Persona::new("Support Agent", "S"),
            policy: ReplyPolicy::default(),
            visible_count: 0,
            window_len: 0,
            messages: Vec::new(),
            is_typing: false,
            is_loading_older: false,
            pending_replies: VecDeque::new(),
            timers: Timers::new(),
            viewport,
        };
        feed.initialize(page_size);
        feed
    }

    /// Set who local messages and replies are attributed to.
    #[must_use]
    pub fn with_personas(mut self, local: Persona, counterpart: Persona) -> Self {
        self.local = local;
        self.counterpart = counterpart;
        self
    }

    /// Set how synthetic replies are produced.
    #[must_use]
    pub fn with_reply_policy(mut self, policy: ReplyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reset the feed to the newest `page_size` messages of the source.
    ///
    /// Drops the local tail and any pending timers. A page size of zero
    /// shows an empty window; older pages then load one message at a time.
    pub fn initialize(&mut self, page_size: usize) {
        self.timers.cancel_all();
        self.pending_replies.clear();
        self.is_typing = false;
        self.is_loading_older = false;
        self.settings.page_size = page_size;
        self.visible_count = page_size;
        self.messages = self.source.window(page_size).to_vec();
        self.window_len = self.messages.len();
        self.viewport.reset(self.messages.len());
        tracing::debug!(
            conversation = %self.source.id(),
            page_size,
            visible = self.window_len,
            total = self.source.len(),
            "feed initialized"
        );
    }

    /// Request the next page of older history.
    ///
    /// The caller is expected to call this when the viewport reaches its top
    /// edge (see [`scroll_up`](Self::scroll_up)). Requests while a load is
    /// pending or after the whole history is visible are ignored.
    pub fn load_older(&mut self, now: Instant) -> LoadOlder {
        if !self.has_older() {
            return LoadOlder::Exhausted;
        }
        if self.is_loading_older {
            return LoadOlder::InFlight;
        }
        self.is_loading_older = true;
        let key = self.key(TimerKind::LoadOlder);
        self.timers.schedule(key, now + self.settings.load_latency);
        LoadOlder::Scheduled
    }

    /// Append a message authored locally and queue its synthetic reply.
    ///
    /// Returns the new message's id, or `None` if `text` is empty after
    /// trimming (nothing changes in that case).
    pub fn send_message(&mut self, text: &str, now: Instant) -> Option<MessageId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.next_id();
        self.messages.push(Message {
            id,
            sender: self.local.name.clone(),
            avatar: self.local.avatar.clone(),
            content: text.to_string(),
            timestamp: chrono::Local::now()
                .format(&self.settings.timestamp_format)
                .to_string(),
            is_user: true,
            seen: None,
        });
        // The user's own send always brings the newest message into view.
        self.viewport.on_append(1, true);

        self.pending_replies.push_back(text.to_string());
        self.is_typing = true;
        let key = self.key(TimerKind::Reply);
        self.timers.schedule(key, now + self.settings.reply_delay);

        tracing::debug!(
            conversation = %self.source.id(),
            message_id = %id,
            queued_replies = self.pending_replies.len(),
            "message sent"
        );
        Some(id)
    }

    /// Fire every deadline that is due at `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<FeedChange> {
        self.timers
            .take_due(now)
            .into_iter()
            .filter_map(|key| match key.kind {
                TimerKind::LoadOlder => self.finish_load_older(),
                TimerKind::Reply => self.deliver_reply(now),
            })
            .collect()
    }

    /// Scroll towards older messages.
    ///
    /// When this brings the top edge into view a page load is requested and
    /// its outcome returned; otherwise [`LoadOlder::NotAtTop`].
    pub fn scroll_up(&mut self, rows: usize, now: Instant) -> LoadOlder {
        if self.viewport.scroll_up(rows) {
            self.load_older(now)
        } else {
            LoadOlder::NotAtTop
        }
    }

    /// Scroll towards newer messages.
    pub fn scroll_down(&mut self, rows: usize) {
        self.viewport.scroll_down(rows);
    }

    /// Jump to the newest message. Returns `false` if already there.
    pub const fn scroll_to_bottom(&mut self) -> bool {
        self.viewport.scroll_to_bottom()
    }

    /// Tell the feed how many rows the UI can show.
    pub fn set_viewport_height(&mut self, rows: usize) {
        self.viewport.set_height(rows);
    }

    /// Cancel every pending timer and forget queued replies.
    pub fn cancel_all(&mut self) {
        let cancelled = self.timers.cancel_all();
        let dropped_replies = self.pending_replies.len();
        self.pending_replies.clear();
        self.is_typing = false;
        self.is_loading_older = false;
        tracing::debug!(
            conversation = %self.source.id(),
            cancelled,
            dropped_replies,
            "feed timers cancelled"
        );
    }

    /// Conversation this feed shows.
    #[must_use]
    pub const fn conversation(&self) -> ConversationId {
        self.source.id()
    }

    /// All visible messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The part of the feed sliced from the source.
    #[must_use]
    pub fn window(&self) -> &[Message] {
        &self.messages[..self.window_len]
    }

    /// Messages authored during this session, including synthetic replies.
    #[must_use]
    pub fn local_tail(&self) -> &[Message] {
        &self.messages[self.window_len..]
    }

    /// Messages inside the viewport.
    #[must_use]
    pub fn visible_messages(&self) -> &[Message] {
        &self.messages[self.viewport.visible_range()]
    }

    /// How many source messages have been requested so far.
    #[must_use]
    pub const fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Whether older history remains to be loaded.
    #[must_use]
    pub const fn has_older(&self) -> bool {
        self.window_len < self.source.len()
    }

    /// Whether a synthetic reply is pending.
    #[must_use]
    pub const fn is_typing(&self) -> bool {
        self.is_typing
    }

    /// Whether an older page is being loaded.
    #[must_use]
    pub const fn is_loading_older(&self) -> bool {
        self.is_loading_older
    }

    /// Number of replies still queued.
    #[must_use]
    pub fn pending_replies(&self) -> usize {
        self.pending_replies.len()
    }

    /// Earliest pending deadline, for sizing the event loop's poll timeout.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Scroll state.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Who replies in this feed.
    #[must_use]
    pub const fn counterpart(&self) -> &Persona {
        &self.counterpart
    }

    const fn key(&self, kind: TimerKind) -> TimerKey {
        TimerKey::new(self.source.id(), kind)
    }

    /// Above every visible id and every id still hidden in the source.
    fn next_id(&self) -> MessageId {
        self.messages
            .iter()
            .map(|m| m.id)
            .chain(self.source.last_id())
            .max()
            .map_or(MessageId::new(1), MessageId::next)
    }

    fn finish_load_older(&mut self) -> Option<FeedChange> {
        if !self.is_loading_older {
            return None;
        }
        self.is_loading_older = false;

        let old_len = self.window_len;
        self.visible_count += self.settings.page_size.max(1);
        let new_len = self.visible_count.min(self.source.len());
        let older = self.source.older_slice(old_len, new_len);
        let added = older.len();
        self.messages.splice(0..0, older.iter().cloned());
        self.window_len = new_len;
        self.viewport.on_prepend(added);

        tracing::debug!(
            conversation = %self.source.id(),
            added,
            visible = self.window_len,
            total = self.source.len(),
            "older messages loaded"
        );
        Some(FeedChange::OlderLoaded { added })
    }

    fn deliver_reply(&mut self, now: Instant) -> Option<FeedChange> {
        let prompt = self.pending_replies.pop_front()?;
        let follow = self.viewport.is_near_bottom();

        let id = self.next_id();
        self.messages.push(Message {
            id,
            sender: self.counterpart.name.clone(),
            avatar: self.counterpart.avatar.clone(),
            content: self.policy.reply_to(&prompt),
            timestamp: chrono::Local::now()
                .format(&self.settings.timestamp_format)
                .to_string(),
            is_user: false,
            seen: None,
        });
        self.viewport.on_append(1, follow);

        if self.pending_replies.is_empty() {
            self.is_typing = false;
        } else {
            let key = self.key(TimerKind::Reply);
            self.timers.schedule(key, now + self.settings.reply_delay);
        }

        tracing::debug!(
            conversation = %self.source.id(),
            message_id = %id,
            followed = follow,
            "synthetic reply delivered"
        );
        Some(FeedChange::ReplyAppended { id })
    }
}

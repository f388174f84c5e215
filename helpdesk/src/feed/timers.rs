//! Cancellable deadlines owned by a feed.
//!
//! Every scheduled task is keyed by `(conversation, kind)`, and at most one
//! task per key can be pending. Nothing runs in the background: the event
//! loop calls [`Timers::take_due`] with the current instant and the owner
//! acts on the keys that come back. Dropping the owner drops its deadlines,
//! so a torn-down feed can never be mutated by a late timer.

use std::collections::HashMap;

use helpdesk_proto::message::ConversationId;
use tokio::time::Instant;

/// What a scheduled task does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    /// Materialize the next page of older history.
    LoadOlder,
    /// Deliver the next queued synthetic reply.
    Reply,
}

/// Identifies one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerKey {
    /// Conversation the task belongs to.
    pub conversation: ConversationId,
    /// Kind of task.
    pub kind: TimerKind,
}

impl TimerKey {
    /// Key for `kind` in `conversation`.
    #[must_use]
    pub const fn new(conversation: ConversationId, kind: TimerKind) -> Self {
        Self { conversation, kind }
    }
}

/// A set of pending deadlines.
#[derive(Debug, Default)]
pub struct Timers {
    pending: HashMap<TimerKey, Instant>,
}

impl Timers {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` to fire at `at`.
    ///
    /// Returns `false` and leaves the existing deadline untouched if `key`
    /// is already pending.
    pub fn schedule(&mut self, key: TimerKey, at: Instant) -> bool {
        if self.pending.contains_key(&key) {
            return false;
        }
        tracing::debug!(conversation = %key.conversation, kind = ?key.kind, "timer scheduled");
        self.pending.insert(key, at);
        true
    }

    /// Cancel everything. Returns how many tasks were pending.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    /// Remove and return every key whose deadline is at or before `now`,
    /// earliest deadline first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerKey> {
        let mut due: Vec<(Instant, TimerKey)> = self
            .pending
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(key, at)| (*at, *key))
            .collect();
        due.sort();
        for (_, key) in &due {
            self.pending.remove(key);
        }
        due.into_iter().map(|(_, key)| key).collect()
    }
}

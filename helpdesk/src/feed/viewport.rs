//! Scroll position of a message list, measured in messages.
//!
//! `top` is the index of the first visible message. The list is at the
//! bottom when the last message is visible and at the top when `top == 0`.
//! Appends only move `top` when the caller asks to follow the bottom;
//! prepends shift `top` by the number of inserted messages so whatever the
//! user was reading stays in place.

use std::ops::Range;

/// Scroll state of one feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    top: usize,
    height: usize,
    len: usize,
    follow_threshold: usize,
}

impl Viewport {
    /// A viewport showing `height` rows, pinned to the bottom of an empty list.
    #[must_use]
    pub fn new(height: usize, follow_threshold: usize) -> Self {
        Self {
            top: 0,
            height: height.max(1),
            len: 0,
            follow_threshold,
        }
    }

    /// Index of the first visible message.
    #[must_use]
    pub const fn top(&self) -> usize {
        self.top
    }

    /// Number of visible rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of messages in the list.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    const fn max_top(&self) -> usize {
        self.len.saturating_sub(self.height)
    }

    /// Whether the first message is visible.
    #[must_use]
    pub const fn is_at_top(&self) -> bool {
        self.top == 0
    }

    /// Whether the last message is visible.
    #[must_use]
    pub const fn is_at_bottom(&self) -> bool {
        self.top >= self.max_top()
    }

    /// Whether the viewport is within `follow_threshold` rows of the bottom.
    #[must_use]
    pub const fn is_near_bottom(&self) -> bool {
        self.max_top().saturating_sub(self.top) <= self.follow_threshold
    }

    /// Indices of the visible messages.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        self.top..(self.top + self.height).min(self.len)
    }

    /// Replace the list length and pin to the bottom.
    pub const fn reset(&mut self, len: usize) {
        self.len = len;
        self.top = self.max_top();
    }

    /// Change the number of visible rows. A viewport at the bottom stays there.
    pub fn set_height(&mut self, height: usize) {
        let was_at_bottom = self.is_at_bottom();
        self.height = height.max(1);
        if was_at_bottom {
            self.top = self.max_top();
        } else {
            self.top = self.top.min(self.max_top());
        }
    }

    /// `added` messages were appended. With `follow`, jump to the new bottom.
    pub const fn on_append(&mut self, added: usize, follow: bool) {
        self.len += added;
        if follow {
            self.top = self.max_top();
        }
    }

    /// `added` messages were inserted before index 0.
    pub const fn on_prepend(&mut self, added: usize) {
        self.len += added;
        self.top += added;
    }

    /// Scroll towards older messages. Returns whether the top edge is visible.
    pub const fn scroll_up(&mut self, rows: usize) -> bool {
        self.top = self.top.saturating_sub(rows);
        self.is_at_top()
    }

    /// Scroll towards newer messages.
    pub fn scroll_down(&mut self, rows: usize) {
        self.top = (self.top + rows).min(self.max_top());
    }

    /// Jump to the bottom. Returns `false` (and does nothing) if already there.
    pub const fn scroll_to_bottom(&mut self) -> bool {
        if self.is_at_bottom() {
            return false;
        }
        self.top = self.max_top();
        true
    }
}

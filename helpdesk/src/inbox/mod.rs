//! Inbox list state: loading phase, filtering, sorting and selection.

use std::time::Duration;

use helpdesk_proto::inbox::InboxItem;
use helpdesk_proto::message::ConversationId;
use tokio::time::Instant;

/// Which items the inbox shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InboxFilter {
    /// Unread items and items whose customer is online.
    #[default]
    Open,
    /// Everything.
    All,
    /// Items not yet read.
    Unread,
    /// High-priority items.
    Flagged,
}

impl InboxFilter {
    /// Next filter in the cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Open => Self::All,
            Self::All => Self::Unread,
            Self::Unread => Self::Flagged,
            Self::Flagged => Self::Open,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::All => "All messages",
            Self::Unread => "Unread",
            Self::Flagged => "Flagged",
        }
    }

    /// Whether `item` passes this filter.
    #[must_use]
    pub fn matches(self, item: &InboxItem) -> bool {
        match self {
            Self::Open => item.is_open(),
            Self::All => true,
            Self::Unread => !item.is_read,
            Self::Flagged => item.is_flagged(),
        }
    }
}

/// Order of the inbox list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InboxSort {
    /// Longest waiting first.
    #[default]
    WaitingLongest,
    /// Most recent first.
    MostRecent,
    /// Flagged first, then longest waiting.
    Priority,
}

impl InboxSort {
    /// Next order in the cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::WaitingLongest => Self::MostRecent,
            Self::MostRecent => Self::Priority,
            Self::Priority => Self::WaitingLongest,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WaitingLongest => "Waiting longest",
            Self::MostRecent => "Most recent",
            Self::Priority => "Priority",
        }
    }
}

/// State of the inbox panel.
#[derive(Debug)]
pub struct InboxState {
    items: Vec<InboxItem>,
    filter: InboxFilter,
    sort: InboxSort,
    /// Index into the filtered, sorted view.
    selected: usize,
    loading_until: Option<Instant>,
}

impl InboxState {
    /// An inbox that shows a loading placeholder for `loading` after `now`.
    #[must_use]
    pub fn new(items: Vec<InboxItem>, loading: Duration, now: Instant) -> Self {
        Self {
            items,
            filter: InboxFilter::default(),
            sort: InboxSort::default(),
            selected: 0,
            loading_until: (!loading.is_zero()).then(|| now + loading),
        }
    }

    /// End the loading phase once its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.loading_until.is_some_and(|until| now >= until) {
            self.loading_until = None;
            tracing::debug!(items = self.items.len(), "inbox loaded");
        }
    }

    /// Whether the loading placeholder is shown.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading_until.is_some()
    }

    /// Pending loading deadline.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.loading_until
    }

    /// Active filter.
    #[must_use]
    pub const fn filter(&self) -> InboxFilter {
        self.filter
    }

    /// Active sort order.
    #[must_use]
    pub const fn sort(&self) -> InboxSort {
        self.sort
    }

    /// Index of the selected row in [`visible_items`](Self::visible_items).
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Items that pass the filter, in sort order.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&InboxItem> {
        let mut items: Vec<&InboxItem> = self
            .items
            .iter()
            .filter(|item| self.filter.matches(item))
            .collect();
        match self.sort {
            InboxSort::WaitingLongest => {
                items.sort_by(|a, b| b.waiting_minutes.cmp(&a.waiting_minutes));
            }
            InboxSort::MostRecent => items.sort_by_key(|item| item.waiting_minutes),
            InboxSort::Priority => items.sort_by(|a, b| {
                b.priority
                    .cmp(&a.priority)
                    .then(b.waiting_minutes.cmp(&a.waiting_minutes))
            }),
        }
        items
    }

    /// Number of open items, shown next to the filter label.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.items.iter().filter(|i| InboxFilter::Open.matches(i)).count()
    }

    /// The selected item, if any.
    #[must_use]
    pub fn selected_item(&self) -> Option<&InboxItem> {
        self.visible_items().get(self.selected).copied()
    }

    /// Select the previous row.
    pub const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Select the next row.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible_items().len() {
            self.selected += 1;
        }
    }

    /// Switch to the next filter and reset the selection.
    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.selected = 0;
    }

    /// Switch to the next sort order and reset the selection.
    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        self.selected = 0;
    }

    /// Conversation behind the selected item. Marks the item read.
    ///
    /// Returns `None` while loading, with nothing selected, or when the item
    /// has no conversation.
    pub fn open_selected(&mut self) -> Option<ConversationId> {
        if self.is_loading() {
            return None;
        }
        let id = self.selected_item()?.id;
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.is_read = true;
        item.unread = 0;
        let conversation = item.conversation;
        // A read item can leave the active filter; keep the cursor on a row.
        self.selected = self
            .selected
            .min(self.visible_items().len().saturating_sub(1));
        conversation
    }
}

//! Application state and event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use helpdesk_proto::fixture::FixtureSet;
use helpdesk_proto::message::ConversationId;
use tokio::time::Instant;

use crate::assistant::AssistantSession;
use crate::chat::ChatSession;
use crate::compose::ComposeInput;
use crate::config::ClientConfig;
use crate::feed::{FeedChange, FeedController, FeedSettings, LoadOlder};
use crate::inbox::InboxState;
use crate::theme::{ThemeContext, ThemeMode};

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Inbox list.
    Inbox,
    /// Open chat (message list and compose box).
    Chat,
    /// Assistant panel.
    Assistant,
}

/// Column arrangement of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenLayout {
    /// No chat open: inbox and a wide assistant panel.
    InboxAndAssistant,
    /// Inbox, chat and a narrow assistant panel.
    ThreeColumn,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Inbox list.
    pub inbox: InboxState,
    /// Open conversation, if any.
    pub chat: Option<ChatSession>,
    /// Assistant panel. Lives for the whole run, whatever the layout.
    pub assistant: AssistantSession,
    /// Theme preference.
    pub theme: ThemeContext,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// One-line notice shown in the status bar.
    pub notice: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    fixtures: FixtureSet,
    feed_settings: FeedSettings,
}

impl App {
    /// Create the application over `fixtures`.
    #[must_use]
    pub fn new(fixtures: FixtureSet, theme: ThemeContext, config: &ClientConfig, now: Instant) -> Self {
        let feed_settings = config.feed_settings();
        Self {
            inbox: InboxState::new(fixtures.inbox.clone(), config.inbox_loading, now),
            chat: None,
            assistant: AssistantSession::new(config.assistant_reply_delay, &feed_settings),
            theme,
            focus: PanelFocus::Inbox,
            notice: None,
            should_quit: false,
            fixtures,
            feed_settings,
        }
    }

    /// Current column arrangement.
    #[must_use]
    pub const fn layout(&self) -> ScreenLayout {
        if self.chat.is_some() {
            ScreenLayout::ThreeColumn
        } else {
            ScreenLayout::InboxAndAssistant
        }
    }

    /// Current theme mode.
    #[must_use]
    pub const fn theme_mode(&self) -> ThemeMode {
        self.theme.mode()
    }

    /// Open a conversation in the chat panel and focus it.
    ///
    /// Re-opening the conversation that is already open only moves focus.
    pub fn open_chat(&mut self, conversation: ConversationId) {
        if self
            .chat
            .as_ref()
            .is_some_and(|c| c.conversation() == conversation)
        {
            self.focus = PanelFocus::Chat;
            return;
        }

        let Some(fixture) = self.fixtures.conversation(conversation) else {
            self.notice = Some(format!("Conversation {conversation} not found"));
            return;
        };
        match ChatSession::open(fixture, self.feed_settings.clone()) {
            Ok(session) => {
                if let Some(previous) = self.chat.replace(session) {
                    previous.close();
                }
                self.focus = PanelFocus::Chat;
                self.notice = None;
            }
            Err(e) => {
                tracing::warn!(%conversation, error = %e, "could not open conversation");
                self.notice = Some(format!("Could not open conversation: {e}"));
            }
        }
    }

    /// Close the chat panel, cancelling its pending work.
    pub fn close_chat(&mut self) {
        if let Some(session) = self.chat.take() {
            session.close();
        }
        if self.focus == PanelFocus::Chat {
            self.focus = PanelFocus::Inbox;
        }
    }

    /// Flip the theme and persist it.
    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
    }

    /// Fire every timer due at `now`.
    pub fn tick(&mut self, now: Instant) {
        self.inbox.tick(now);
        if let Some(chat) = self.chat.as_mut() {
            log_changes("chat", &chat.tick(now));
        }
        log_changes("assistant", &self.assistant.tick(now));
    }

    /// Earliest pending deadline across all panels.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.inbox.next_deadline(),
            self.chat.as_ref().and_then(|c| c.feed().next_deadline()),
            self.assistant.feed().next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Tell the feeds how many message rows their panels can show.
    pub fn set_viewport_heights(&mut self, chat_rows: usize, assistant_rows: usize) {
        if let Some(chat) = self.chat.as_mut() {
            chat.feed_mut().set_viewport_height(chat_rows);
        }
        self.assistant
            .feed_mut()
            .set_viewport_height(assistant_rows);
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                self.toggle_theme();
                return;
            }
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                self.close_chat();
                return;
            }
            (KeyCode::Tab, KeyModifiers::SHIFT) | (KeyCode::BackTab, _) => {
                self.cycle_focus_backward();
                return;
            }
            (KeyCode::Tab, _) => {
                self.cycle_focus_forward();
                return;
            }
            _ => {}
        }

        // Focus-specific shortcuts
        match self.focus {
            PanelFocus::Inbox => self.handle_inbox_key(key),
            PanelFocus::Chat => self.handle_chat_key(key, now),
            PanelFocus::Assistant => self.handle_assistant_key(key, now),
        }
    }

    /// Handle key event when the inbox is focused.
    fn handle_inbox_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.inbox.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.inbox.select_next(),
            KeyCode::Char('f') => self.inbox.cycle_filter(),
            KeyCode::Char('s') => self.inbox.cycle_sort(),
            KeyCode::Enter => match self.inbox.open_selected() {
                Some(conversation) => self.open_chat(conversation),
                None if !self.inbox.is_loading() => {
                    self.notice = Some("No conversation for this item".to_string());
                }
                None => {}
            },
            _ => {}
        }
    }

    /// Handle key event when the chat is focused.
    fn handle_chat_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(chat) = self.chat.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Enter => {
                chat.submit(now);
            }
            _ => {
                if !handle_scroll_key(chat.feed_mut(), key, now) {
                    edit_input(&mut chat.input, key);
                }
            }
        }
    }

    /// Handle key event when the assistant is focused.
    fn handle_assistant_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Enter => {
                self.assistant.submit(now);
            }
            KeyCode::Char(c @ '1'..='3')
                if self.assistant.input.text().is_empty()
                    && self.assistant.suggestions_visible() =>
            {
                let index = c
                    .to_digit(10)
                    .and_then(|d| usize::try_from(d).ok())
                    .map_or(0, |d| d - 1);
                self.assistant.pick_suggestion(index);
            }
            _ => {
                if !handle_scroll_key(self.assistant.feed_mut(), key, now) {
                    edit_input(&mut self.assistant.input, key);
                }
            }
        }
    }

    /// Panels that can take focus, in Tab order.
    fn focus_order(&self) -> &'static [PanelFocus] {
        if self.chat.is_some() {
            &[PanelFocus::Inbox, PanelFocus::Chat, PanelFocus::Assistant]
        } else {
            &[PanelFocus::Inbox, PanelFocus::Assistant]
        }
    }

    /// Cycle focus forward: Inbox -> Chat -> Assistant -> Inbox.
    fn cycle_focus_forward(&mut self) {
        let order = self.focus_order();
        let at = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(at + 1) % order.len()];
    }

    /// Cycle focus backward: Inbox -> Assistant -> Chat -> Inbox.
    fn cycle_focus_backward(&mut self) {
        let order = self.focus_order();
        let at = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(at + order.len() - 1) % order.len()];
    }
}

/// Apply a scroll key to `feed`. Returns whether the key was a scroll key.
fn handle_scroll_key(feed: &mut FeedController, key: KeyEvent, now: Instant) -> bool {
    let page = feed.viewport().height().max(1);
    let load = match key.code {
        KeyCode::Up => Some(feed.scroll_up(1, now)),
        KeyCode::PageUp => Some(feed.scroll_up(page, now)),
        KeyCode::Down => {
            feed.scroll_down(1);
            None
        }
        KeyCode::PageDown => {
            feed.scroll_down(page);
            None
        }
        _ => return false,
    };
    if load == Some(LoadOlder::Scheduled) {
        tracing::debug!(conversation = %feed.conversation(), "loading older messages");
    }
    true
}

/// Apply an editing key to `input`.
fn edit_input(input: &mut ComposeInput, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            input.insert(c);
        }
        KeyCode::Backspace => input.backspace(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => {}
    }
}

fn log_changes(panel: &str, changes: &[FeedChange]) {
    for change in changes {
        tracing::trace!(panel, ?change, "feed changed");
    }
}

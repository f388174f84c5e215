//! Integration tests for the application shell.
//!
//! Verifies:
//! 1. Opening and closing a chat switches between two and three columns.
//! 2. The assistant session survives layout changes with its history.
//! 3. Theme changes persist through the store and are restored on restart.
//! 4. Closing a chat drops its pending reply.
//! 5. The inbox ignores Enter while it is loading.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use helpdesk::app::{App, PanelFocus, ScreenLayout};
use helpdesk::config::ClientConfig;
use helpdesk::theme::{MemoryThemeStore, ThemeContext, ThemeMode};
use helpdesk_proto::fixture::FixtureSet;
use helpdesk_proto::message::ConversationId;
use tokio::time::Instant;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn app_with(store: &MemoryThemeStore, config: &ClientConfig, now: Instant) -> App {
    App::new(
        FixtureSet::builtin(),
        ThemeContext::load(Box::new(store.clone())),
        config,
        now,
    )
}

fn ready_config() -> ClientConfig {
    ClientConfig {
        inbox_loading: Duration::ZERO,
        ..ClientConfig::default()
    }
}

fn type_text(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        app.handle_key_event(press(KeyCode::Char(c)), now);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn assistant_survives_chat_open_and_close() {
    let t0 = Instant::now();
    let store = MemoryThemeStore::new();
    let mut app = app_with(&store, &ready_config(), t0);

    app.focus = PanelFocus::Assistant;
    type_text(&mut app, "refund?", t0);
    app.handle_key_event(press(KeyCode::Enter), t0);
    app.tick(t0 + Duration::from_millis(800));
    assert_eq!(app.assistant.feed().messages().len(), 2);

    app.open_chat(ConversationId::new(1));
    assert_eq!(app.layout(), ScreenLayout::ThreeColumn);
    assert_eq!(app.assistant.feed().messages().len(), 2);

    app.handle_key_event(ctrl('w'), t0);
    assert_eq!(app.layout(), ScreenLayout::InboxAndAssistant);
    assert_eq!(app.assistant.feed().messages().len(), 2);
    assert!(!app.assistant.suggestions_visible());
}

#[test]
fn theme_toggle_persists_across_restart() {
    let t0 = Instant::now();
    let store = MemoryThemeStore::new();
    let mut app = app_with(&store, &ready_config(), t0);
    assert_eq!(app.theme_mode(), ThemeMode::Light);

    app.handle_key_event(ctrl('t'), t0);
    assert_eq!(app.theme_mode(), ThemeMode::Dark);
    assert_eq!(store.stored(), Some(ThemeMode::Dark));
    drop(app);

    let restarted = app_with(&store, &ready_config(), t0);
    assert_eq!(restarted.theme_mode(), ThemeMode::Dark);
}

#[test]
fn closing_chat_drops_pending_reply() {
    let t0 = Instant::now();
    let store = MemoryThemeStore::new();
    let mut app = app_with(&store, &ready_config(), t0);

    app.handle_key_event(press(KeyCode::Enter), t0);
    assert_eq!(app.focus, PanelFocus::Chat);
    type_text(&mut app, "where is my order", t0);
    app.handle_key_event(press(KeyCode::Enter), t0);
    assert_eq!(app.next_deadline(), Some(t0 + Duration::from_secs(2)));

    app.close_chat();
    assert_eq!(app.next_deadline(), None);
    app.tick(t0 + Duration::from_secs(5));

    // Reopening shows the fixture history only.
    app.open_chat(ConversationId::new(1));
    let feed = app.chat.as_ref().unwrap().feed();
    assert!(feed.local_tail().is_empty());
    assert!(!feed.is_typing());
}

#[test]
fn switching_chats_replaces_the_session() {
    let t0 = Instant::now();
    let store = MemoryThemeStore::new();
    let mut app = app_with(&store, &ready_config(), t0);

    app.open_chat(ConversationId::new(1));
    type_text(&mut app, "hello", t0);
    app.handle_key_event(press(KeyCode::Enter), t0);

    app.open_chat(ConversationId::new(2));
    let chat = app.chat.as_ref().unwrap();
    assert_eq!(chat.conversation(), ConversationId::new(2));
    assert_eq!(chat.title(), "Ivan Ramos");
    assert_eq!(app.next_deadline(), None);
}

#[test]
fn inbox_ignores_enter_while_loading() {
    let t0 = Instant::now();
    let store = MemoryThemeStore::new();
    let mut app = app_with(&store, &ClientConfig::default(), t0);
    assert!(app.inbox.is_loading());

    app.handle_key_event(press(KeyCode::Enter), t0);
    assert!(app.chat.is_none());

    app.tick(t0 + Duration::from_secs(1));
    assert!(!app.inbox.is_loading());
    app.handle_key_event(press(KeyCode::Enter), t0 + Duration::from_secs(1));
    assert!(app.chat.is_some());
}

#[test]
fn escape_quits() {
    let t0 = Instant::now();
    let store = MemoryThemeStore::new();
    let mut app = app_with(&store, &ready_config(), t0);
    app.handle_key_event(press(KeyCode::Esc), t0);
    assert!(app.should_quit);
}

//! Integration tests for backward pagination of a conversation feed.
//!
//! Verifies:
//! 1. A 12-message history with page size 10 opens on messages 3..=12.
//! 2. One load after the latency shows the full history, oldest first.
//! 3. Further loads are no-ops once the history is exhausted.
//! 4. Requests while a load is pending are ignored.
//! 5. The scroll position stays on the same message across a prepend.
//! 6. Messages sent during the session survive pagination.

use std::time::Duration;

use helpdesk::feed::{ConversationSource, FeedChange, FeedController, FeedSettings, LoadOlder};
use helpdesk_proto::message::{ConversationId, Message, MessageId};
use tokio::time::Instant;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn history(n: u64) -> Vec<Message> {
    (1..=n)
        .map(|i| Message {
            id: MessageId::new(i),
            sender: if i % 2 == 0 { "Support Agent" } else { "Luis Easton" }.to_string(),
            avatar: if i % 2 == 0 { "S" } else { "L" }.to_string(),
            content: format!("history {i}"),
            timestamp: "1h".to_string(),
            is_user: i % 2 == 1,
            seen: None,
        })
        .collect()
}

fn feed_with(n: u64, settings: FeedSettings) -> FeedController {
    let source = ConversationSource::new(ConversationId::new(7), history(n)).unwrap();
    FeedController::new(source, settings)
}

fn ids(feed: &FeedController) -> Vec<u64> {
    feed.messages().iter().map(|m| m.id.get()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn twelve_messages_page_of_ten() {
    let t0 = Instant::now();
    let mut feed = feed_with(12, FeedSettings::default());
    assert_eq!(ids(&feed), (3..=12).collect::<Vec<_>>());
    assert!(feed.has_older());

    assert_eq!(feed.load_older(t0), LoadOlder::Scheduled);
    let changes = feed.tick(t0 + Duration::from_millis(500));
    assert_eq!(changes, vec![FeedChange::OlderLoaded { added: 2 }]);
    assert_eq!(ids(&feed), (1..=12).collect::<Vec<_>>());
    assert!(!feed.has_older());

    // Exhausted: nothing is scheduled and nothing changes.
    let later = t0 + Duration::from_secs(1);
    assert_eq!(feed.load_older(later), LoadOlder::Exhausted);
    assert!(!feed.is_loading_older());
    assert_eq!(feed.next_deadline(), None);
    assert!(feed.tick(later + Duration::from_secs(5)).is_empty());
    assert_eq!(feed.messages().len(), 12);
}

#[test]
fn short_history_has_nothing_older() {
    let mut feed = feed_with(4, FeedSettings::default());
    assert_eq!(ids(&feed), vec![1, 2, 3, 4]);
    assert!(!feed.has_older());
    assert_eq!(feed.load_older(Instant::now()), LoadOlder::Exhausted);
}

#[test]
fn in_flight_request_is_ignored() {
    let t0 = Instant::now();
    let mut feed = feed_with(35, FeedSettings::default());
    assert_eq!(feed.load_older(t0), LoadOlder::Scheduled);
    assert_eq!(
        feed.load_older(t0 + Duration::from_millis(100)),
        LoadOlder::InFlight
    );

    // Only the first request's deadline exists.
    assert_eq!(feed.next_deadline(), Some(t0 + Duration::from_millis(500)));
    let changes = feed.tick(t0 + Duration::from_secs(2));
    assert_eq!(changes, vec![FeedChange::OlderLoaded { added: 10 }]);
    assert_eq!(feed.messages().len(), 20);
}

#[test]
fn pages_accumulate_until_exhausted() {
    let mut now = Instant::now();
    let mut feed = feed_with(25, FeedSettings::default());
    let mut sizes = vec![feed.messages().len()];
    while feed.load_older(now) == LoadOlder::Scheduled {
        now += Duration::from_millis(500);
        feed.tick(now);
        sizes.push(feed.messages().len());
    }
    assert_eq!(sizes, vec![10, 20, 25]);
    assert_eq!(ids(&feed), (1..=25).collect::<Vec<_>>());
}

#[test]
fn scroll_to_top_loads_and_keeps_position() {
    let t0 = Instant::now();
    let settings = FeedSettings {
        viewport_height: 4,
        ..FeedSettings::default()
    };
    let mut feed = feed_with(12, settings);
    assert_eq!(feed.viewport().top(), 6);

    // Not yet at the top: no load.
    assert_eq!(feed.scroll_up(3, t0), LoadOlder::NotAtTop);
    assert_eq!(feed.scroll_up(3, t0), LoadOlder::Scheduled);
    let first_visible = feed.visible_messages()[0].id;

    feed.tick(t0 + Duration::from_millis(500));
    assert_eq!(feed.viewport().top(), 2);
    assert_eq!(feed.visible_messages()[0].id, first_visible);

    // Scrolling to the real top now finds nothing older.
    assert_eq!(
        feed.scroll_up(10, t0 + Duration::from_secs(1)),
        LoadOlder::Exhausted
    );
}

#[test]
fn local_tail_survives_pagination() {
    let t0 = Instant::now();
    let mut feed = feed_with(12, FeedSettings::default());
    let sent = feed.send_message("Is my refund processed?", t0).unwrap();
    assert_eq!(sent, MessageId::new(13));

    feed.load_older(t0);
    feed.tick(t0 + Duration::from_millis(500));

    assert_eq!(feed.messages().len(), 13);
    assert_eq!(feed.messages().first().unwrap().id, MessageId::new(1));
    assert_eq!(feed.local_tail().len(), 1);
    assert_eq!(feed.local_tail()[0].content, "Is my refund processed?");
}

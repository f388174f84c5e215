//! Integration tests for optimistic send and synthetic replies.
//!
//! Verifies:
//! 1. A send appends immediately and the reply lands after the delay.
//! 2. The typing flag covers exactly the wait for queued replies.
//! 3. Replies arrive in send order, one delay apart.
//! 4. Blank sends change nothing.
//! 5. Closing or dropping a chat cancels its pending reply.
//! 6. The assistant answers by keyword category.

use std::time::Duration;

use helpdesk::assistant::{AssistantSession, classify};
use helpdesk::chat::ChatSession;
use helpdesk::feed::{
    CANNED_REPLY, ConversationSource, FeedChange, FeedController, FeedSettings, ReplyPolicy,
};
use helpdesk_proto::fixture::FixtureSet;
use helpdesk_proto::message::{ConversationId, MessageId};
use tokio::time::Instant;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const REPLY: Duration = Duration::from_millis(2000);

fn refund_chat() -> ChatSession {
    let fixtures = FixtureSet::builtin();
    let fixture = fixtures.conversation(ConversationId::new(1)).unwrap();
    ChatSession::open(fixture, FeedSettings::default()).unwrap()
}

fn empty_feed(policy: ReplyPolicy) -> FeedController {
    FeedController::new(
        ConversationSource::empty(ConversationId::new(9)),
        FeedSettings::default(),
    )
    .with_reply_policy(policy)
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[test]
fn send_then_canned_reply() {
    let t0 = Instant::now();
    let mut chat = refund_chat();
    let before = chat.feed().messages().len();

    chat.input.set("I was charged twice");
    let sent = chat.submit(t0).unwrap();
    let feed = chat.feed();
    assert_eq!(feed.messages().len(), before + 1);
    let last = feed.messages().last().unwrap();
    assert_eq!(last.id, sent);
    assert!(last.is_user);
    assert_eq!(last.content, "I was charged twice");
    assert!(feed.is_typing());

    assert!(chat.tick(t0 + REPLY - Duration::from_millis(1)).is_empty());
    assert!(chat.feed().is_typing());

    let changes = chat.tick(t0 + REPLY);
    assert_eq!(changes.len(), 1);
    let reply = chat.feed().messages().last().unwrap();
    assert!(!reply.is_user);
    assert_eq!(reply.sender, "Support Agent");
    assert_eq!(reply.content, CANNED_REPLY);
    assert!(reply.id > sent);
    assert!(!chat.feed().is_typing());
}

#[test]
fn replies_are_delivered_in_send_order() {
    let t0 = Instant::now();
    let mut feed = empty_feed(ReplyPolicy::Classify);
    feed.send_message("refund please", t0).unwrap();
    feed.send_message("how do I contact you", t0 + Duration::from_millis(100))
        .unwrap();
    assert_eq!(feed.pending_replies(), 2);

    let first = feed.tick(t0 + REPLY);
    assert_eq!(first, vec![FeedChange::ReplyAppended { id: MessageId::new(3) }]);
    assert_eq!(feed.messages()[2].content, classify::REFUND_REPLY);
    assert!(feed.is_typing());

    // The second reply is armed only when the first lands.
    assert!(feed.tick(t0 + REPLY + Duration::from_millis(100)).is_empty());
    let second = feed.tick(t0 + REPLY * 2);
    assert_eq!(second, vec![FeedChange::ReplyAppended { id: MessageId::new(4) }]);
    assert_eq!(feed.messages()[3].content, classify::CONTACT_REPLY);
    assert!(!feed.is_typing());
    assert_eq!(feed.pending_replies(), 0);
}

#[test]
fn late_tick_still_delivers_one_reply_per_tick() {
    let t0 = Instant::now();
    let mut feed = empty_feed(ReplyPolicy::default());
    feed.send_message("one", t0).unwrap();
    feed.send_message("two", t0).unwrap();

    let late = t0 + Duration::from_secs(60);
    assert_eq!(feed.tick(late).len(), 1);
    assert_eq!(feed.tick(late + REPLY).len(), 1);
    let contents: Vec<&str> = feed.messages().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "two", CANNED_REPLY, CANNED_REPLY]);
}

#[test]
fn blank_send_is_a_no_op() {
    let t0 = Instant::now();
    let mut chat = refund_chat();
    let before = chat.feed().messages().len();
    for text in ["", "   ", "\n\t"] {
        chat.input.set(text);
        assert_eq!(chat.submit(t0), None);
    }
    assert_eq!(chat.feed().messages().len(), before);
    assert!(!chat.feed().is_typing());
    assert_eq!(chat.feed().next_deadline(), None);
}

#[test]
fn sent_text_is_trimmed() {
    let mut feed = empty_feed(ReplyPolicy::default());
    feed.send_message("  hello  ", Instant::now()).unwrap();
    assert_eq!(feed.messages()[0].content, "hello");
}

#[test]
fn own_send_scrolls_to_bottom() {
    let t0 = Instant::now();
    let mut chat = refund_chat();
    chat.feed_mut().set_viewport_height(3);
    chat.feed_mut().scroll_up(5, t0);
    assert!(!chat.feed().viewport().is_at_bottom());

    chat.input.set("still there?");
    chat.submit(t0).unwrap();
    assert!(chat.feed().viewport().is_at_bottom());
}

#[test]
fn reply_does_not_yank_reader_scrolled_up() {
    let t0 = Instant::now();
    let mut chat = refund_chat();
    chat.feed_mut().set_viewport_height(3);
    chat.input.set("order 42");
    chat.submit(t0).unwrap();

    chat.feed_mut().scroll_up(4, t0);
    let top = chat.feed().viewport().top();
    chat.tick(t0 + REPLY);
    assert_eq!(chat.feed().viewport().top(), top);
    assert!(!chat.feed().viewport().is_at_bottom());
}

#[test]
fn close_cancels_pending_reply() {
    let t0 = Instant::now();
    let mut chat = refund_chat();
    chat.input.set("hello");
    chat.submit(t0).unwrap();
    assert!(chat.feed().next_deadline().is_some());
    chat.close();

    // Reopening starts from the fixture with nothing pending.
    let reopened = refund_chat();
    assert!(!reopened.feed().is_typing());
    assert_eq!(reopened.feed().next_deadline(), None);
    assert!(reopened.feed().local_tail().is_empty());
}

#[test]
fn cancel_all_drops_queue() {
    let t0 = Instant::now();
    let mut feed = empty_feed(ReplyPolicy::default());
    feed.send_message("a", t0).unwrap();
    feed.send_message("b", t0).unwrap();
    feed.cancel_all();
    assert!(!feed.is_typing());
    assert_eq!(feed.pending_replies(), 0);
    assert!(feed.tick(t0 + REPLY * 3).is_empty());
    assert_eq!(feed.messages().len(), 2);
}

// ---------------------------------------------------------------------------
// Assistant
// ---------------------------------------------------------------------------

#[test]
fn assistant_answers_by_category() {
    let t0 = Instant::now();
    let delay = Duration::from_millis(800);
    let mut assistant = AssistantSession::new(delay, &FeedSettings::default());

    let cases = [
        ("How do I get a REFUND?", classify::REFUND_REPLY),
        ("What's my account balance?", classify::ACCOUNT_REPLY),
        ("Need support with my account", classify::CONTACT_REPLY),
        ("hello", classify::FALLBACK_REPLY),
    ];
    let mut now = t0;
    for (question, expected) in cases {
        assistant.input.set(question);
        assistant.submit(now).unwrap();
        now += delay;
        assistant.tick(now);
        let answer = assistant.feed().messages().last().unwrap();
        assert_eq!(answer.content, expected, "question: {question}");
        assert_eq!(answer.sender, "Fin");
    }
    assert_eq!(assistant.feed().messages().len(), 8);
}

//! Property tests for the feed window.
//!
//! Uses proptest to verify, for any history length and page size:
//! 1. The first page is exactly the newest `min(page, len)` messages.
//! 2. Repeated loads reach the full history and then report `Exhausted`.
//! 3. Every intermediate window is a suffix of the history, oldest first.
//! 4. Sent messages stay after the window whatever pagination does.

use std::time::Duration;

use helpdesk::feed::{ConversationSource, FeedController, FeedSettings, LoadOlder, last_n};
use helpdesk_proto::message::{ConversationId, Message, MessageId};
use proptest::prelude::*;
use tokio::time::Instant;

fn history(len: usize) -> Vec<Message> {
    (1u64..)
        .take(len)
        .map(|i| Message {
            id: MessageId::new(i * 3),
            sender: "Luis Easton".into(),
            avatar: "L".into(),
            content: format!("history {i}"),
            timestamp: "1h".into(),
            is_user: true,
            seen: None,
        })
        .collect()
}

fn feed(len: usize, page_size: usize) -> FeedController {
    let source = ConversationSource::new(ConversationId::new(1), history(len)).unwrap();
    FeedController::new(
        source,
        FeedSettings {
            page_size,
            load_latency: Duration::from_millis(10),
            ..FeedSettings::default()
        },
    )
}

proptest! {
    #[test]
    fn first_page_is_newest_suffix(len in 0usize..60, page in 0usize..25) {
        let all = history(len);
        let feed = feed(len, page);
        prop_assert_eq!(feed.messages(), last_n(&all, page.min(len)));
        prop_assert_eq!(feed.has_older(), len > page);
    }

    #[test]
    fn loads_reach_full_history(len in 0usize..60, page in 1usize..25) {
        let all = history(len);
        let mut feed = feed(len, page);
        let mut now = Instant::now();
        let mut loads = 0usize;

        while feed.load_older(now) == LoadOlder::Scheduled {
            now += Duration::from_millis(10);
            let before = feed.messages().len();
            feed.tick(now);
            let after = feed.messages().len();
            prop_assert!(after > before);
            prop_assert!(after - before <= page);
            prop_assert_eq!(feed.messages(), last_n(&all, after));
            loads += 1;
        }

        prop_assert_eq!(feed.messages(), all.as_slice());
        prop_assert_eq!(loads, len.saturating_sub(page).div_ceil(page));
        prop_assert_eq!(feed.load_older(now), LoadOlder::Exhausted);
    }

    #[test]
    fn sent_messages_stay_after_window(
        len in 1usize..40,
        page in 1usize..15,
        texts in prop::collection::vec("[a-z]{1,12}", 1..5),
    ) {
        let mut feed = feed(len, page);
        let mut now = Instant::now();
        for text in &texts {
            feed.send_message(text, now);
        }
        while feed.load_older(now) == LoadOlder::Scheduled {
            now += Duration::from_millis(10);
            feed.tick(now);
        }

        let tail: Vec<&str> = feed.local_tail().iter().map(|m| m.content.as_str()).collect();
        let expected: Vec<&str> = texts.iter().map(String::as_str).collect();
        prop_assert_eq!(tail, expected);
        prop_assert_eq!(feed.window().len(), len);

        let ids: Vec<MessageId> = feed.messages().iter().map(|m| m.id).collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}

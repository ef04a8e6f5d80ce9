use crate::CONNECTED_NOTICE;
use crate::feed::{FeedBuffer, FeedLine, Notice};

/// **VALUE**: Verifies that a capacity-64 feed keeps the last 64 of 100 pushes in order.
///
/// **WHY THIS MATTERS**: Busy rooms must not grow the feed without bound, and the newest
/// lines are the ones users need to see.
///
/// **BUG THIS CATCHES**: Would catch evicting from the newest end, reordering, or an
/// off-by-one leaving 63 or 65 entries.
#[test]
fn given_capacity_64_when_100_pushed_then_last_64_in_order() {
    // GIVEN: Default capacity
    let mut feed = FeedBuffer::new(64);

    // WHEN: 100 entries
    let mut evicted = 0;
    for i in 0..100u32 {
        evicted += feed.push(i).len();
    }

    // THEN: Exactly 36..100 remain, oldest first
    let items: Vec<u32> = feed.iter().map(|entry| *entry.item()).collect();
    assert_eq!(items, (36..100).collect::<Vec<_>>());
    assert_eq!(feed.len(), 64);
    assert_eq!(evicted, 36);
}

/// **VALUE**: Verifies that eviction removes the whole overflow in one pass.
///
/// **WHY THIS MATTERS**: The view releases evicted entries from the returned batch;
/// the batch must hold every overflowed entry, oldest first.
///
/// **BUG THIS CATCHES**: Would catch evicting only one entry per push.
#[test]
fn given_full_feed_when_pushed_then_evicted_batch_is_oldest_first() {
    // GIVEN: Capacity 3, filled
    let mut feed = FeedBuffer::new(3);
    for word in ["a", "b", "c"] {
        assert!(feed.push(word).is_empty());
    }

    // WHEN: One more push
    let evicted = feed.push("d");

    // THEN: "a" evicted with its original sequence number
    assert_eq!(evicted.len(), 1);
    assert_eq!(*evicted[0].item(), "a");
    assert_eq!(evicted[0].sequence(), 0);
    assert_eq!(feed.latest().map(|e| e.sequence()), Some(3));
}

/// **VALUE**: Verifies that clear empties the feed but sequence numbers keep growing.
///
/// **WHY THIS MATTERS**: Views may key rendered entries by sequence; reusing numbers after a
/// reconnect would alias stale entries.
///
/// **BUG THIS CATCHES**: Would catch `clear()` resetting the sequence counter.
#[test]
fn given_cleared_feed_when_pushed_then_sequence_continues() {
    let mut feed = FeedBuffer::new(8);
    feed.push(FeedLine::Text("old".to_string()));
    feed.push(FeedLine::Text("older".to_string()));

    feed.clear();
    feed.push(FeedLine::Notice(Notice::Connected));

    assert_eq!(feed.len(), 1);
    let entry = feed.latest().unwrap();
    assert_eq!(entry.sequence(), 2);
    assert_eq!(entry.item().to_string(), CONNECTED_NOTICE);
}

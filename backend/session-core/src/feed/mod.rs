//! Bounded feed of rendered entries for a room page.
//!
//! Strict FIFO: entries keep arrival order and overflow is evicted from the
//! oldest end in a single pass, however many entries a burst pushed over.

use crate::{CONNECTED_NOTICE, DISCONNECTED_NOTICE};

use std::collections::VecDeque;
use std::fmt;

/// One entry plus its position in the feed's arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry<T> {
    sequence: u64,
    item: T,
}

impl<T> FeedEntry<T> {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn into_item(self) -> T {
        self.item
    }
}

#[derive(Debug, Clone)]
pub struct FeedBuffer<T> {
    entries: VecDeque<FeedEntry<T>>,
    capacity: usize,
    next_sequence: u64,
}

impl<T> FeedBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_sequence: 0,
        }
    }

    /// Append at the newest end.
    ///
    /// Returns the entries evicted to get back under capacity, oldest first,
    /// so the caller can release whatever it rendered for them.
    pub fn push(&mut self, item: T) -> Vec<FeedEntry<T>> {
        self.entries.push_back(FeedEntry {
            sequence: self.next_sequence,
            item,
        });
        self.next_sequence += 1;

        let excess = self.entries.len().saturating_sub(self.capacity);
        self.entries.drain(..excess).collect()
    }

    /// Drop all entries. Sequence numbers keep increasing across clears.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &FeedEntry<T>> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&FeedEntry<T>> {
        self.entries.back()
    }
}

/// Connection notices interleaved with chat text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Connected,
    Disconnected,
}

/// What a room feed shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLine {
    Notice(Notice),
    Text(String),
}

impl fmt::Display for FeedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedLine::Notice(Notice::Connected) => f.write_str(CONNECTED_NOTICE),
            FeedLine::Notice(Notice::Disconnected) => f.write_str(DISCONNECTED_NOTICE),
            FeedLine::Text(text) => f.write_str(text),
        }
    }
}

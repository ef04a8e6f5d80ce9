//! Shared fixtures for unit tests.

use crate::config::SessionConfig;
use crate::error::session::SessionError;
use crate::feed::{FeedBuffer, FeedEntry, FeedLine};
use crate::protocol::Surface;
use crate::rooms::{RoomEntry, RoomSnapshot};
use crate::session::{SessionEvent, SessionMachine, ViewAdapter};

/// View that records everything it is told.
#[derive(Debug, Default)]
pub(crate) struct RecordingView {
    pub events: Vec<SessionEvent>,
    pub feed: Vec<FeedLine>,
    pub evicted: usize,
    pub snapshots: Vec<Vec<RoomEntry>>,
    pub exhausted: usize,
}

impl ViewAdapter for RecordingView {
    fn on_event(&mut self, event: &SessionEvent) {
        self.events.push(event.clone());
    }

    fn on_feed_changed(&mut self, feed: &FeedBuffer<FeedLine>, evicted: &[FeedEntry<FeedLine>]) {
        self.feed = feed.iter().map(|entry| entry.item().clone()).collect();
        self.evicted += evicted.len();
    }

    fn on_rooms_changed(&mut self, snapshot: &RoomSnapshot) {
        self.snapshots.push(snapshot.to_vec());
    }

    fn on_retry_exhausted(&mut self, _error: &SessionError) {
        self.exhausted += 1;
    }
}

pub(crate) fn machine(surface: Surface) -> SessionMachine<RecordingView> {
    SessionMachine::new(surface, &SessionConfig::default(), RecordingView::default())
}

pub(crate) fn machine_with(
    surface: Surface,
    config: &SessionConfig,
) -> SessionMachine<RecordingView> {
    SessionMachine::new(surface, config, RecordingView::default())
}

/// A machine that has completed its handshake.
pub(crate) fn open_machine(surface: Surface) -> SessionMachine<RecordingView> {
    let mut machine = machine(surface);
    assert!(machine.open());
    machine.handle_open();
    machine
}

//! Terminal rendering of session events.

use session_core::error::session::SessionError;
use session_core::feed::{FeedBuffer, FeedEntry, FeedLine};
use session_core::protocol::Surface;
use session_core::rooms::RoomSnapshot;
use session_core::session::{SessionEvent, ViewAdapter};
use session_core::{CONNECTED_NOTICE, DISCONNECTED_NOTICE, NOTICE_PREFIX};

use std::fmt::Display;
use std::io::Write;

use log::warn;

/// `str` for exactly one, `str + end` otherwise.
pub fn plural(str: &str, end: &str, count: u64) -> String {
    if count == 1 {
        str.to_string()
    } else {
        format!("{str}{end}")
    }
}

/// Prints feed lines as they arrive plus counters and the room directory.
pub struct TerminalView<W: Write + Send + 'static> {
    surface: Surface,
    out: W,
    /// Sequence of the last feed entry already printed.
    printed_through: Option<u64>,
}

impl<W: Write + Send + 'static> TerminalView<W> {
    pub fn new(surface: Surface, out: W) -> Self {
        Self {
            surface,
            out,
            printed_through: None,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn line(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            warn!("Failed to write to terminal: {e}");
        }
    }
}

impl<W: Write + Send + 'static> ViewAdapter for TerminalView<W> {
    fn on_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::UserCountChanged(count) => {
                self.line(format!("{count} {}", plural("user", "s", *count)));
            }
            SessionEvent::RoomCountChanged(count) => {
                self.line(format!("{count} {}", plural("room", "s", *count)));
            }
            // Room pages show these through the feed.
            SessionEvent::Connected if self.surface == Surface::Directory => {
                self.line(CONNECTED_NOTICE);
            }
            SessionEvent::Disconnected if self.surface == Surface::Directory => {
                self.line(DISCONNECTED_NOTICE);
            }
            SessionEvent::Connected
            | SessionEvent::Disconnected
            | SessionEvent::NewText(_)
            | SessionEvent::RoomOccupancyChanged { .. } => {}
        }
    }

    fn on_feed_changed(&mut self, feed: &FeedBuffer<FeedLine>, _evicted: &[FeedEntry<FeedLine>]) {
        let printed_through = self.printed_through;
        let fresh: Vec<(u64, String)> = feed
            .iter()
            .filter(|entry| printed_through.is_none_or(|seen| entry.sequence() > seen))
            .map(|entry| (entry.sequence(), entry.item().to_string()))
            .collect();

        for (sequence, text) in fresh {
            self.line(text);
            self.printed_through = Some(sequence);
        }
    }

    fn on_rooms_changed(&mut self, snapshot: &RoomSnapshot) {
        for room in snapshot.iter() {
            self.line(format!("[{}] {}", room.occupancy, room.room_id));
        }
    }

    fn on_retry_exhausted(&mut self, error: &SessionError) {
        self.line(format!(
            "{NOTICE_PREFIX}{error}. Type /reconnect to try again."
        ));
    }
}

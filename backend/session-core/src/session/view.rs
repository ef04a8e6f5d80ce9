use crate::error::session::SessionError;
use crate::feed::{FeedBuffer, FeedEntry, FeedLine};
use crate::rooms::RoomSnapshot;
use crate::session::SessionEvent;

/// The presentation surface a session reports to.
///
/// Implementations render; they never decide anything about the connection.
/// All methods are called from the session's task, one at a time and in
/// arrival order, so implementations need no locking of their own.
pub trait ViewAdapter: Send + 'static {
    /// Every presentation event, in the order it happened.
    fn on_event(&mut self, event: &SessionEvent);

    /// Room feed after a push or clear. `evicted` holds entries that fell off
    /// the old end during this push, oldest first.
    fn on_feed_changed(&mut self, _feed: &FeedBuffer<FeedLine>, _evicted: &[FeedEntry<FeedLine>]) {
    }

    /// Directory contents after an occupancy update.
    fn on_rooms_changed(&mut self, _snapshot: &RoomSnapshot) {}

    /// Automatic reconnection gave up. A manual `open()` is still possible.
    fn on_retry_exhausted(&mut self, _error: &SessionError) {}
}

//! Pure session state machine.
//!
//! Every socket, timer and caller event maps to exactly one transition
//! function here. Nothing in this file performs I/O, so each transition can
//! be exercised without a server.

use crate::config::SessionConfig;
use crate::error::protocol::ProtocolError;
use crate::error::session::SessionError;
use crate::feed::{FeedBuffer, FeedLine, Notice};
use crate::protocol::{ProtocolCodec, Surface};
use crate::retry::{BackoffDecision, BackoffPolicy, BackoffState};
use crate::rooms::RoomRegistry;
use crate::session::{ConnectionState, SessionEvent, SessionStatus, ViewAdapter};

use std::time::Duration;

use log::{debug, info, warn};

/// What the driver should do after a close was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Already disconnected; duplicate notification.
    Ignored,
    /// Arm a one-shot timer and call [`SessionMachine::reopen`] when it fires.
    Reconnect(Duration),
    /// Backoff gave up. Terminal until a manual [`SessionMachine::open`].
    Exhausted,
    /// The close was requested locally; do not reconnect.
    Stopped,
}

/// What the driver should do after a local [`SessionMachine::close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// Send a close frame and wait (bounded) for the socket to close.
    SendCloseFrame,
    /// Drop the in-flight dial; the machine is already `Disconnected`.
    AbortDial,
    /// Drop any pending reconnect timer.
    CancelTimer,
    /// Already closing.
    Ignored,
}

pub struct SessionMachine<V: ViewAdapter> {
    state: ConnectionState,
    codec: ProtocolCodec,
    backoff: BackoffPolicy,
    feed: FeedBuffer<FeedLine>,
    rooms: RoomRegistry,
    view: V,
    exhausted: bool,
    /// Set by a local close; only a manual open clears it.
    suspended: bool,
}

impl<V: ViewAdapter> SessionMachine<V> {
    pub fn new(surface: Surface, config: &SessionConfig, view: V) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            codec: ProtocolCodec::new(surface),
            backoff: BackoffPolicy::new(config.backoff),
            feed: FeedBuffer::new(config.feed.capacity),
            rooms: RoomRegistry::new(),
            view,
            exhausted: false,
            suspended: false,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn surface(&self) -> Surface {
        self.codec.surface()
    }

    pub fn backoff_state(&self) -> BackoffState {
        self.backoff.state()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn feed(&self) -> &FeedBuffer<FeedLine> {
        &self.feed
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            surface: self.surface(),
            state: self.state,
            backoff: self.backoff.state(),
            exhausted: self.exhausted,
            suspended: self.suspended,
        }
    }

    /// Manual open: `Disconnected → Connecting`, starting a fresh attempt sequence.
    ///
    /// Returns `true` if the caller should dial. A no-op while `Connecting`,
    /// `Open` or `Closing`.
    pub fn open(&mut self) -> bool {
        if self.state != ConnectionState::Disconnected {
            debug!("open() ignored while {}", self.state);
            return false;
        }

        self.backoff.reset();
        self.exhausted = false;
        self.suspended = false;
        self.state = ConnectionState::Connecting;
        true
    }

    /// Timer-driven reopen: like [`open`](Self::open) but keeps the backoff sequence.
    ///
    /// Refused once exhausted or after a local close.
    pub fn reopen(&mut self) -> bool {
        if self.state != ConnectionState::Disconnected || self.exhausted || self.suspended {
            debug!(
                "reopen() ignored (state {}, exhausted {}, suspended {})",
                self.state, self.exhausted, self.suspended
            );
            return false;
        }

        self.state = ConnectionState::Connecting;
        true
    }

    /// Handshake succeeded: `Connecting → Open`.
    pub fn handle_open(&mut self) {
        if self.state != ConnectionState::Connecting {
            warn!("Handshake completed while {}; ignoring", self.state);
            return;
        }

        self.state = ConnectionState::Open;
        self.backoff.reset();
        self.exhausted = false;
        info!("Connected ({} surface)", self.surface());

        self.view.on_event(&SessionEvent::Connected);

        if self.surface() == Surface::Room {
            self.feed.clear();
            self.push_feed(FeedLine::Notice(Notice::Connected));
        }
    }

    /// One inbound text frame.
    ///
    /// # Errors
    ///
    /// Returns the [`ProtocolError`] for frames that were dropped. State is
    /// untouched and the view sees nothing in that case.
    pub fn handle_frame(&mut self, frame: &str) -> Result<(), ProtocolError> {
        if self.state != ConnectionState::Open {
            debug!("Frame received while {}; dropping", self.state);
            return Ok(());
        }

        let event = self.codec.decode_event(frame)?;
        self.dispatch(event);
        Ok(())
    }

    fn dispatch(&mut self, event: SessionEvent) {
        match &event {
            SessionEvent::NewText(text) => {
                let line = FeedLine::Text(text.clone());
                self.view.on_event(&event);
                self.push_feed(line);
            }
            SessionEvent::RoomOccupancyChanged { room_id, occupancy } => {
                self.rooms.upsert(room_id.clone(), *occupancy);
                self.view.on_event(&event);
                let snapshot = self.rooms.snapshot();
                self.view.on_rooms_changed(&snapshot);
            }
            SessionEvent::UserCountChanged(_)
            | SessionEvent::RoomCountChanged(_)
            | SessionEvent::Connected
            | SessionEvent::Disconnected => self.view.on_event(&event),
        }
    }

    fn push_feed(&mut self, line: FeedLine) {
        let evicted = self.feed.push(line);
        if !evicted.is_empty() {
            debug!("Feed evicted {} entries", evicted.len());
        }
        self.view.on_feed_changed(&self.feed, &evicted);
    }

    /// Encode outgoing text. Only valid while `Open`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotConnected`] if the session is not `Open`
    /// - [`SessionError::Protocol`] if the text is empty after trimming
    #[track_caller]
    pub fn encode_outgoing(&self, text: &str) -> Result<String, SessionError> {
        if self.state != ConnectionState::Open {
            return Err(SessionError::not_connected(self.state));
        }

        Ok(self.codec.encode_text(text)?)
    }

    /// Local close. Suspends automatic reconnection until the next [`open`](Self::open).
    ///
    /// - `Open → Closing`: the caller sends a close frame
    /// - `Connecting → Disconnected`: the caller drops the dial; backoff is untouched
    /// - `Disconnected`: the caller drops any pending reconnect timer
    pub fn close(&mut self) -> CloseAction {
        self.suspended = true;

        match self.state {
            ConnectionState::Open => {
                self.state = ConnectionState::Closing;
                CloseAction::SendCloseFrame
            }
            ConnectionState::Connecting => {
                self.state = ConnectionState::Disconnected;
                info!("Connection attempt abandoned by local close");
                self.view.on_event(&SessionEvent::Disconnected);
                CloseAction::AbortDial
            }
            ConnectionState::Disconnected => CloseAction::CancelTimer,
            ConnectionState::Closing => {
                debug!("close() ignored while {}", self.state);
                CloseAction::Ignored
            }
        }
    }

    /// The socket closed, for whatever reason.
    ///
    /// Emits `Disconnected` exactly once per close, then consults the backoff
    /// policy unless the close was requested locally.
    pub fn handle_close(&mut self) -> CloseOutcome {
        let previous = self.state;

        if previous == ConnectionState::Disconnected {
            debug!("Close notification while already disconnected; ignoring");
            return CloseOutcome::Ignored;
        }

        self.state = ConnectionState::Disconnected;
        info!("Disconnected (was {previous})");
        self.view.on_event(&SessionEvent::Disconnected);

        if self.surface() == Surface::Room
            && matches!(previous, ConnectionState::Open | ConnectionState::Closing)
        {
            self.push_feed(FeedLine::Notice(Notice::Disconnected));
        }

        if previous == ConnectionState::Closing {
            return CloseOutcome::Stopped;
        }

        match self.backoff.advance() {
            BackoffDecision::RetryAfter(delay) => {
                info!(
                    "Reconnecting in {delay:?} (attempt {})",
                    self.backoff.state().retry_count
                );
                CloseOutcome::Reconnect(delay)
            }
            BackoffDecision::Exhausted => {
                self.exhausted = true;
                let error = SessionError::retry_exhausted(self.backoff.config().max_retries);
                warn!("{error}");
                self.view.on_retry_exhausted(&error);
                CloseOutcome::Exhausted
            }
        }
    }

    /// Socket or handshake error. Always resolved by forcing a close.
    pub fn handle_error(&mut self, error: SessionError) -> CloseOutcome {
        warn!("Connection failed [{}]: {error}", error.error_category());
        self.handle_close()
    }

    /// Tear down without reconnecting (session shutdown).
    pub fn stop(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }

        let was_open = matches!(self.state, ConnectionState::Open | ConnectionState::Closing);
        self.state = ConnectionState::Disconnected;
        self.view.on_event(&SessionEvent::Disconnected);

        if was_open && self.surface() == Surface::Room {
            self.push_feed(FeedLine::Notice(Notice::Disconnected));
        }
    }
}

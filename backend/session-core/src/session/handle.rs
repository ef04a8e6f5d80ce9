//! Session handle type.
//!
//! The handle is the only way to talk to a running [`ConnectionManager`](crate::session::ConnectionManager).
//! It is `Clone`; every clone drives the same session.

use crate::error::session::SessionError;
use crate::session::SessionStatus;

use std::sync::Arc;

use tokio::sync::{RwLock, mpsc, oneshot};

/// Commands processed by the session actor, strictly in order.
#[derive(Debug)]
pub(crate) enum SessionCommand {
    /// Manual open; cancels a pending reconnect timer.
    Open,

    /// Encode and write one text frame.
    Send {
        text: String,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },

    /// Close or abandon the connection and suspend reconnects.
    Close,

    /// Stop the actor task.
    Shutdown,
}

/// Handle to a running session.
///
/// # Lifecycle
///
/// The actor stops when [`shutdown`](Self::shutdown) is called or when the
/// last handle is dropped.
#[derive(Clone)]
pub struct SessionHandle {
    /// Channel to the session actor
    command_tx: mpsc::Sender<SessionCommand>,

    /// Last status published by the actor
    status: Arc<RwLock<SessionStatus>>,
}

impl SessionHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<SessionCommand>,
        status: Arc<RwLock<SessionStatus>>,
    ) -> Self {
        Self { command_tx, status }
    }

    /// Open the connection, starting a fresh backoff sequence.
    ///
    /// A no-op if the session is already connecting or open. Cancels any
    /// pending automatic reconnect.
    pub async fn open(&self) -> Result<(), SessionError> {
        self.submit(SessionCommand::Open).await
    }

    /// Send one line of user text.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotConnected`] if the session is not open
    /// - [`SessionError::Protocol`] if the text is empty or whitespace-only
    /// - [`SessionError::Connection`] if the socket write failed (the session then reconnects)
    /// - [`SessionError::Closed`] if the session task has stopped
    pub async fn send(&self, text: impl Into<String>) -> Result<(), SessionError> {
        let (reply, response) = oneshot::channel();
        self.submit(SessionCommand::Send {
            text: text.into(),
            reply,
        })
        .await?;

        response
            .await
            .map_err(|e| SessionError::closed(format!("Session dropped send reply: {e}")))?
    }

    /// Close the socket, abandon an in-flight dial, or cancel a pending reconnect.
    ///
    /// The session stays disconnected until [`open`](Self::open).
    pub async fn close(&self) -> Result<(), SessionError> {
        self.submit(SessionCommand::Close).await
    }

    /// Stop the session task.
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.submit(SessionCommand::Shutdown).await
    }

    /// Latest status (read-only).
    pub async fn status(&self) -> SessionStatus {
        *self.status.read().await
    }

    /// True once the session task has exited.
    pub fn is_stopped(&self) -> bool {
        self.command_tx.is_closed()
    }

    async fn submit(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.command_tx
            .send(command)
            .await
            .map_err(|e| SessionError::closed(format!("Session actor stopped: {e}")))
    }
}

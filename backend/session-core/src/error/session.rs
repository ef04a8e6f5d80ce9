//! Error types for connection lifecycle operations.
//!
//! Key design decisions:
//! - `NotConnected` is always surfaced to the caller, never swallowed
//! - `Connection` errors are resolved by forcing a close, which feeds the reconnect path
//! - `RetryExhausted` is terminal only until the next manual `open()`

use crate::error::protocol::ProtocolError;
use crate::session::ConnectionState;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;
use tokio_tungstenite::tungstenite::Error as WsError;

#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("Not Connected Error: cannot send while {state} {location}")]
    NotConnected {
        state: ConnectionState,
        location: ErrorLocation,
    },

    #[error("Connection Error: {message} {location}")]
    Connection {
        message: String,
        location: ErrorLocation,
    },

    #[error("Retry Exhausted Error: gave up after {attempts} attempts {location}")]
    RetryExhausted {
        attempts: u32,
        location: ErrorLocation,
    },

    #[error("Session Closed Error: {message} {location}")]
    Closed {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl SessionError {
    #[track_caller]
    pub fn not_connected(state: ConnectionState) -> Self {
        SessionError::NotConnected {
            state,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn connection(message: impl Into<String>) -> Self {
        SessionError::Connection {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn retry_exhausted(attempts: u32) -> Self {
        SessionError::RetryExhausted {
            attempts,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn closed(message: impl Into<String>) -> Self {
        SessionError::Closed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Get error category for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            SessionError::NotConnected { .. } => "not_connected",
            SessionError::Connection { .. } => "connection",
            SessionError::RetryExhausted { .. } => "retry_exhausted",
            SessionError::Closed { .. } => "closed",
            SessionError::Protocol(_) => "protocol",
        }
    }
}

impl From<WsError> for SessionError {
    #[track_caller]
    fn from(error: WsError) -> Self {
        SessionError::Connection {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

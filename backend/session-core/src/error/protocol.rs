//! Errors raised while encoding or decoding wire frames.
//!
//! None of these are fatal: inbound failures cause the frame to be dropped,
//! outbound failures mean no frame was produced.

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ProtocolError {
    #[error("Unrecognized Frame Kind Error: token '{token}' {location}")]
    UnrecognizedFrameKind {
        token: char,
        location: ErrorLocation,
    },

    #[error("Empty Frame Error: frame has no kind token {location}")]
    EmptyFrame { location: ErrorLocation },

    #[error("Malformed Payload Error: {message} {location}")]
    MalformedPayload {
        message: String,
        location: ErrorLocation,
    },

    #[error("Empty Text Error: a message must contain at least one character {location}")]
    EmptyText { location: ErrorLocation },
}

impl ProtocolError {
    #[track_caller]
    pub fn unrecognized_frame_kind(token: char) -> Self {
        ProtocolError::UnrecognizedFrameKind {
            token,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn empty_frame() -> Self {
        ProtocolError::EmptyFrame {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed_payload(message: impl Into<String>) -> Self {
        ProtocolError::MalformedPayload {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn empty_text() -> Self {
        ProtocolError::EmptyText {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Inbound errors are dropped silently; outbound ones are reported to the caller.
    pub fn is_inbound(&self) -> bool {
        !matches!(self, ProtocolError::EmptyText { .. })
    }
}

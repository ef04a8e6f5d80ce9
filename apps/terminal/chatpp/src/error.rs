use session_core::error::CoreError;
use session_core::error::config::ConfigError;
use session_core::error::session::SessionError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

/// Errors that end the terminal client.
///
/// Session-level failures that the user can recover from (sending while
/// disconnected, blank lines) are reported inline and never become an `AppError`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Error from this app (logger, filesystem, stdin)
    #[error("Chatpp Error: {message} {location}")]
    Chatpp {
        message: String,
        location: ErrorLocation,
    },

    /// Error from session-core (config, URL, session)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },
}

impl AppError {
    #[track_caller]
    pub fn chatpp(message: impl Into<String>) -> Self {
        AppError::Chatpp {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for AppError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        AppError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for AppError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        AppError::from(CoreError::from(error))
    }
}

impl From<SessionError> for AppError {
    #[track_caller]
    fn from(error: SessionError) -> Self {
        AppError::from(CoreError::from(error))
    }
}

use crate::error::AppError;

use session_core::error::config::ConfigError;
use session_core::error::session::SessionError;
use session_core::session::{ConnectionState, SessionTarget};

/// **VALUE**: Verifies that core errors keep their message when lifted into `AppError`.
///
/// **WHY THIS MATTERS**: The process exits with this message; the core detail
/// (bad URL, unreadable config) is the only useful part.
///
/// **BUG THIS CATCHES**: Would catch a conversion that replaces the message with a generic one.
#[test]
fn given_config_error_when_converted_then_core_message_preserved() {
    // GIVEN: A real URL error
    let config_err: ConfigError = SessionTarget::from_page_url("ftp://example.com/dev").unwrap_err();
    let core_message = config_err.to_string();

    // WHEN
    let err = AppError::from(config_err);

    // THEN
    let error_string = err.to_string();
    assert!(error_string.starts_with("Core Error: "));
    assert!(error_string.contains(&core_message));
    assert!(error_string.contains("unsupported scheme 'ftp'"));
}

/// **VALUE**: Verifies the app's own errors carry a location.
///
/// **WHY THIS MATTERS**: Startup failures (log dir, stdin) must point at the failing call.
///
/// **BUG THIS CATCHES**: Would catch a missing `#[track_caller]` on the constructor.
#[test]
fn given_chatpp_error_when_formatted_then_includes_location() {
    let err = AppError::chatpp("Failed to read stdin");

    let error_string = format!("{err}");

    assert!(error_string.contains("Chatpp Error: Failed to read stdin"));
    assert!(error_string.contains("tests/error.rs"));
}

/// **VALUE**: Verifies session errors convert through the core wrapper.
///
/// **WHY THIS MATTERS**: `?` on handle calls must compile down to a `Core` error.
///
/// **BUG THIS CATCHES**: Would catch session errors being classified as app errors.
#[test]
fn given_session_error_when_converted_then_core_variant() {
    let err: AppError = SessionError::not_connected(ConnectionState::Disconnected).into();

    assert!(matches!(err, AppError::Core { .. }));
    assert!(err.to_string().contains("Not Connected Error"));
}

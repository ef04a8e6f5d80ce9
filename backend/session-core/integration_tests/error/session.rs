use session_core::error::protocol::ProtocolError;
use session_core::error::session::SessionError;
use session_core::session::ConnectionState;

use std::error::Error;

/// **VALUE**: Verifies that `NotConnected` reports the state and location.
///
/// **WHY THIS MATTERS**: "cannot send" alone does not tell whether the session is still
/// connecting or gave up entirely.
///
/// **BUG THIS CATCHES**: Would catch the state being dropped from the message.
#[test]
fn given_not_connected_when_formatted_then_includes_state_and_location() {
    // GIVEN
    let err = SessionError::not_connected(ConnectionState::Connecting);

    // WHEN
    let error_string = err.to_string();

    // THEN
    assert!(error_string.contains("Not Connected Error"));
    assert!(error_string.contains("connecting"));
    assert!(error_string.contains("integration_tests"));
    assert_eq!(err.error_category(), "not_connected");
}

/// **VALUE**: Verifies that exhaustion reports the attempt count.
///
/// **WHY THIS MATTERS**: Users see this message when the session gives up.
///
/// **BUG THIS CATCHES**: Would catch a wrong field in the Display string.
#[test]
fn given_retry_exhausted_when_formatted_then_includes_attempts() {
    let err = SessionError::retry_exhausted(10);

    let error_string = err.to_string();

    assert!(error_string.contains("Retry Exhausted Error"));
    assert!(error_string.contains("10 attempts"));
    assert_eq!(err.error_category(), "retry_exhausted");
}

/// **VALUE**: Verifies that protocol errors convert into `SessionError` transparently.
///
/// **WHY THIS MATTERS**: `send()` surfaces empty-text rejections as `SessionError`; the
/// original message and location must survive.
///
/// **BUG THIS CATCHES**: Would catch `#[from]` being replaced by a lossy conversion.
#[test]
fn given_protocol_error_when_converted_then_session_error_is_transparent() {
    // GIVEN
    let protocol = ProtocolError::empty_text();
    let expected = protocol.to_string();

    // WHEN
    let err: SessionError = protocol.into();

    // THEN
    assert_eq!(err.to_string(), expected);
    assert_eq!(err.error_category(), "protocol");
    assert!(matches!(
        err,
        SessionError::Protocol(ProtocolError::EmptyText { .. })
    ));
}

/// **VALUE**: Verifies that socket errors map onto `Connection`.
///
/// **WHY THIS MATTERS**: Every transport failure must feed the reconnect path, which keys
/// on the `Connection` variant.
///
/// **BUG THIS CATCHES**: Would catch a transport error mapped to a variant that skips reconnect.
#[test]
fn given_websocket_error_when_converted_then_connection_error() {
    use tokio_tungstenite::tungstenite::Error as WsError;

    let err = SessionError::from(WsError::ConnectionClosed);

    assert!(matches!(err, SessionError::Connection { .. }));
    assert!(err.to_string().contains("Connection Error"));
    assert!(err.source().is_none());
}

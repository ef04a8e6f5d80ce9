use session_core::error::CoreError;
use session_core::error::protocol::ProtocolError;

/// **VALUE**: Verifies that `ProtocolError` constructors capture the caller's location.
///
/// **WHY THIS MATTERS**: Dropped frames are only visible in logs. The log line must say
/// where the frame was rejected.
///
/// **BUG THIS CATCHES**: Would catch a missing `#[track_caller]` on a constructor, which
/// would report the error module itself instead of the call site.
#[test]
fn given_protocol_error_when_formatted_then_includes_caller_location() {
    // GIVEN: Errors built from this file
    let errors = [
        ProtocolError::unrecognized_frame_kind('9'),
        ProtocolError::empty_frame(),
        ProtocolError::malformed_payload("invalid count 'x'"),
        ProtocolError::empty_text(),
    ];

    // WHEN / THEN: Every message points here
    for err in errors {
        let error_string = err.to_string();
        assert!(
            error_string.contains("integration_tests"),
            "missing location: {error_string}"
        );
        assert!(error_string.contains("Error:"), "missing kind: {error_string}");
    }
}

/// **VALUE**: Verifies the message content of frame errors.
///
/// **WHY THIS MATTERS**: The token and payload reason are what a developer needs to diagnose
/// a protocol mismatch.
///
/// **BUG THIS CATCHES**: Would catch a Display string that drops the token or reason.
#[test]
fn given_unrecognized_token_when_formatted_then_names_token() {
    let err = ProtocolError::unrecognized_frame_kind('9');

    let error_string = format!("{err}");

    assert!(error_string.contains("Unrecognized Frame Kind Error"));
    assert!(error_string.contains("'9'"));
    assert!(err.is_inbound());
}

/// **VALUE**: Verifies that `CoreError` wraps protocol errors transparently.
///
/// **WHY THIS MATTERS**: Front-ends report `CoreError`; wrapping must not add noise or hide
/// the original message and location.
///
/// **BUG THIS CATCHES**: Would catch a non-transparent wrapper.
#[test]
fn given_protocol_error_when_converted_to_core_error_then_display_unchanged() {
    let err = ProtocolError::empty_text();
    let expected = err.to_string();

    let core: CoreError = err.into();

    assert_eq!(core.to_string(), expected);
}

use crate::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` records the file of the caller.
///
/// **WHY THIS MATTERS**: Every session, protocol and config error embeds one of these.
/// If the file is wrong, every error message in the workspace points at the wrong place.
///
/// **BUG THIS CATCHES**: Would catch if `Location::caller()` propagation breaks or the
/// file field is populated from the wrong source.
#[test]
#[track_caller]
fn given_location_caller_when_error_location_created_then_captures_file() {
    // GIVEN / WHEN: A location captured here
    let location = ErrorLocation::from(Location::caller());

    // THEN: File, line and column are populated
    assert!(location.file.ends_with(".rs"), "Should capture a source file");
    assert!(location.line > 0, "Should capture line number");
    assert!(location.column > 0, "Should capture column number");
}

/// **VALUE**: Verifies the bracketed `[file:line:column]` display format.
///
/// **WHY THIS MATTERS**: Log lines and error strings are grepped by this shape.
///
/// **BUG THIS CATCHES**: Would catch a Display change that drops brackets or a field.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: A fixed location
    let location = ErrorLocation {
        file: "src/session/machine.rs",
        line: 42,
        column: 9,
    };

    // WHEN: Formatting as string
    let formatted = location.to_string();

    // THEN: Exact bracketed format
    assert_eq!(formatted, "[src/session/machine.rs:42:9]");
}

use crate::error::protocol::ProtocolError;
use crate::protocol::{MessageKind, ProtocolCodec, Surface};
use crate::session::SessionEvent;

/// **VALUE**: Verifies that directory room updates split on the first separator only.
///
/// **WHY THIS MATTERS**: Room paths can be nested (`/general/sub`). Splitting on every
/// separator would truncate the room name and merge distinct rooms in the directory.
///
/// **BUG THIS CATCHES**: Would catch `split('/')` being used instead of `split_once('/')`.
#[test]
fn given_nested_room_path_when_decoded_then_split_on_first_separator() {
    // GIVEN: Directory codec and a nested room update
    let codec = ProtocolCodec::new(Surface::Directory);

    // WHEN: Decoding
    let event = codec.decode_event("27/general/sub").expect("valid room update");

    // THEN: Full path preserved
    assert_eq!(
        event,
        SessionEvent::RoomOccupancyChanged {
            room_id: "/general/sub".to_string(),
            occupancy: 7,
        }
    );
}

/// **VALUE**: Verifies that the root room decodes to `/`.
///
/// **WHY THIS MATTERS**: The server reports the directory channel itself as `2<n>/`.
///
/// **BUG THIS CATCHES**: Would catch an empty remainder being rejected or mapped to "".
#[test]
fn given_root_room_update_when_decoded_then_room_id_is_slash() {
    let codec = ProtocolCodec::new(Surface::Directory);

    let event = codec.decode_event("23/").expect("valid root update");

    assert_eq!(
        event,
        SessionEvent::RoomOccupancyChanged {
            room_id: "/".to_string(),
            occupancy: 3,
        }
    );
}

/// **VALUE**: Verifies that the same token means different things per surface.
///
/// **WHY THIS MATTERS**: `0` is chat text on a room page but the room count on the
/// directory page. Mixing them up would print numbers as chat lines.
///
/// **BUG THIS CATCHES**: Would catch a single global token table.
#[test]
fn given_token_zero_when_decoded_per_surface_then_kind_differs() {
    // GIVEN: One frame, two surfaces
    let room = ProtocolCodec::new(Surface::Room);
    let directory = ProtocolCodec::new(Surface::Directory);

    // WHEN / THEN
    assert_eq!(room.decode("012").unwrap().kind(), MessageKind::NewText);
    assert_eq!(room.decode("012").unwrap().payload(), "12");
    assert_eq!(
        directory.decode_event("012").unwrap(),
        SessionEvent::RoomCountChanged(12)
    );
    assert_eq!(
        room.decode_event("15").unwrap(),
        SessionEvent::UserCountChanged(5)
    );
}

/// **VALUE**: Verifies that unknown tokens are rejected.
///
/// **WHY THIS MATTERS**: Unknown frames must be dropped, never rendered.
///
/// **BUG THIS CATCHES**: Would catch a catch-all mapping unknown tokens to text, or the
/// room surface accepting directory-only token `2`.
#[test]
fn given_unknown_token_when_decoded_then_unrecognized_frame_kind() {
    let room = ProtocolCodec::new(Surface::Room);

    for frame in ["9hello", "2x/room"] {
        let err = room.decode(frame).unwrap_err();
        assert!(
            matches!(err, ProtocolError::UnrecognizedFrameKind { .. }),
            "{frame} should be unrecognized, got {err:?}"
        );
    }

    assert!(matches!(
        room.decode("").unwrap_err(),
        ProtocolError::EmptyFrame { .. }
    ));
}

/// **VALUE**: Verifies malformed count payloads are rejected.
///
/// **WHY THIS MATTERS**: Counts are rendered as numbers; garbage must not reach the view.
///
/// **BUG THIS CATCHES**: Would catch unchecked parsing or defaulting bad counts to 0.
#[test]
fn given_malformed_counts_when_decoded_then_malformed_payload() {
    let directory = ProtocolCodec::new(Surface::Directory);

    for frame in ["1abc", "0", "2seven/room", "27room", "1-3"] {
        let err = directory.decode_event(frame).unwrap_err();
        assert!(
            matches!(err, ProtocolError::MalformedPayload { .. }),
            "{frame} should be malformed, got {err:?}"
        );
    }
}

/// **VALUE**: Verifies outgoing encoding trims and prefixes the text token.
///
/// **WHY THIS MATTERS**: The server re-broadcasts `msg[1..]`, so the token must be exactly
/// one character and surrounding whitespace must not leak into the room.
///
/// **BUG THIS CATCHES**: Would catch missing trimming or a wrong token.
#[test]
fn given_padded_text_when_encoded_then_trimmed_with_token() {
    let codec = ProtocolCodec::new(Surface::Room);

    assert_eq!(codec.encode_text("  hello world \n").unwrap(), "0hello world");
}

/// **VALUE**: Verifies that empty and whitespace-only text produce no frame.
///
/// **WHY THIS MATTERS**: Blank chat lines are rejected client-side before anything is sent.
///
/// **BUG THIS CATCHES**: Would catch checking emptiness before trimming.
#[test]
fn given_blank_text_when_encoded_then_empty_text_error() {
    let codec = ProtocolCodec::new(Surface::Room);

    for text in ["", "   ", "\t\n"] {
        let err = codec.encode_text(text).unwrap_err();
        assert!(matches!(err, ProtocolError::EmptyText { .. }));
        assert!(!err.is_inbound());
    }
}

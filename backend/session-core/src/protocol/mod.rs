//! Wire protocol for the chat server.
//!
//! A frame is one text WebSocket message: a single leading character naming
//! the kind, followed by the raw UTF-8 payload. There is no length prefix,
//! no delimiter and no escaping.
//!
//! | surface   | token | meaning                         | payload            |
//! |-----------|-------|---------------------------------|--------------------|
//! | room      | `0`   | new text line                   | text               |
//! | room      | `1`   | users in this room              | decimal            |
//! | directory | `0`   | number of rooms                 | decimal            |
//! | directory | `1`   | users across all rooms          | decimal            |
//! | directory | `2`   | occupancy of one room           | `<count>/<path>`   |
//!
//! Outgoing user text always uses token `0`.

pub mod codec;
pub mod message;

pub use codec::ProtocolCodec;
pub use message::{Message, MessageKind, Surface};

/// Token prefixed to outgoing user text.
pub const TEXT_TOKEN: char = '0';

/// Separator between the count and the room path in a directory update.
pub const ROOM_UPDATE_SEPARATOR: char = '/';

use crate::error::protocol::ProtocolError;
use crate::protocol::ROOM_UPDATE_SEPARATOR;
use crate::session::SessionEvent;

use std::fmt;

/// Which page the session is feeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// A single chat room: text lines and the room's user count.
    Room,
    /// The `/` overview: room count, total users, per-room occupancy.
    Directory,
}

impl Surface {
    /// `/` is the directory; any other path is a room.
    pub fn for_path(path: &str) -> Self {
        if path.is_empty() || path == "/" {
            Surface::Directory
        } else {
            Surface::Room
        }
    }

    /// Map a leading frame token to a message kind on this surface.
    pub fn kind_for(self, token: char) -> Option<MessageKind> {
        match (self, token) {
            (Surface::Room, '0') => Some(MessageKind::NewText),
            (Surface::Room, '1') => Some(MessageKind::UserCount),
            (Surface::Directory, '0') => Some(MessageKind::RoomCount),
            (Surface::Directory, '1') => Some(MessageKind::UserCount),
            (Surface::Directory, '2') => Some(MessageKind::RoomUpdate),
            _ => None,
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Room => write!(f, "room"),
            Surface::Directory => write!(f, "directory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    NewText,
    UserCount,
    RoomCount,
    RoomUpdate,
}

/// One decoded inbound frame, before its payload is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    kind: MessageKind,
    payload: String,
}

impl Message {
    pub fn new(kind: MessageKind, payload: impl Into<String>) -> Self {
        Self {
            kind,
            payload: payload.into(),
        }
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Interpret the payload and produce the presentation event.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MalformedPayload`] if a count is not a decimal
    /// integer or a room update has no separator.
    pub fn into_event(self) -> Result<SessionEvent, ProtocolError> {
        match self.kind {
            MessageKind::NewText => Ok(SessionEvent::NewText(self.payload)),
            MessageKind::UserCount => Ok(SessionEvent::UserCountChanged(parse_count(
                &self.payload,
            )?)),
            MessageKind::RoomCount => Ok(SessionEvent::RoomCountChanged(parse_count(
                &self.payload,
            )?)),
            MessageKind::RoomUpdate => {
                // Only the first separator splits; the path may contain more.
                let (count, rest) = self
                    .payload
                    .split_once(ROOM_UPDATE_SEPARATOR)
                    .ok_or_else(|| {
                        ProtocolError::malformed_payload(format!(
                            "room update '{}' has no '{ROOM_UPDATE_SEPARATOR}' separator",
                            self.payload
                        ))
                    })?;

                Ok(SessionEvent::RoomOccupancyChanged {
                    room_id: format!("{ROOM_UPDATE_SEPARATOR}{rest}"),
                    occupancy: parse_count(count)?,
                })
            }
        }
    }
}

fn parse_count(raw: &str) -> Result<u64, ProtocolError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ProtocolError::malformed_payload(format!("invalid count '{raw}': {e}")))
}

use crate::error::protocol::ProtocolError;
use crate::protocol::TEXT_TOKEN;
use crate::protocol::message::{Message, Surface};
use crate::session::SessionEvent;

/// Frame encoder/decoder bound to one surface.
///
/// The surface matters only for decoding: the same token means different
/// things on a room page and on the directory page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolCodec {
    surface: Surface,
}

impl ProtocolCodec {
    pub fn new(surface: Surface) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Encode user text as an outgoing frame.
    ///
    /// The text is trimmed first.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::EmptyText`] for empty or whitespace-only input.
    /// No frame is produced in that case.
    pub fn encode_text(&self, text: &str) -> Result<String, ProtocolError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ProtocolError::empty_text());
        }

        let mut frame = String::with_capacity(trimmed.len() + TEXT_TOKEN.len_utf8());
        frame.push(TEXT_TOKEN);
        frame.push_str(trimmed);
        Ok(frame)
    }

    /// Split a frame into kind and payload.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::EmptyFrame`] if the frame has no token
    /// - [`ProtocolError::UnrecognizedFrameKind`] if the token is unknown on this surface
    pub fn decode(&self, frame: &str) -> Result<Message, ProtocolError> {
        let token = frame.chars().next().ok_or_else(|| ProtocolError::empty_frame())?;

        let kind = self
            .surface
            .kind_for(token)
            .ok_or_else(|| ProtocolError::unrecognized_frame_kind(token))?;

        Ok(Message::new(kind, &frame[token.len_utf8()..]))
    }

    /// Decode a frame all the way to its presentation event.
    pub fn decode_event(&self, frame: &str) -> Result<SessionEvent, ProtocolError> {
        self.decode(frame)?.into_event()
    }
}

use crate::protocol::Surface;
use crate::retry::BackoffState;
use crate::session::ConnectionState;

/// Point-in-time view of a session, readable from any [`SessionHandle`](crate::session::SessionHandle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatus {
    pub surface: Surface,
    pub state: ConnectionState,
    pub backoff: BackoffState,
    /// Automatic reconnection has given up; only a manual `open()` resumes.
    pub exhausted: bool,
    /// A local close is in effect; only a manual `open()` resumes.
    pub suspended: bool,
}

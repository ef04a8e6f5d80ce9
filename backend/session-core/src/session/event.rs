/// Presentation-facing events produced by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Connected,
    Disconnected,
    NewText(String),
    UserCountChanged(u64),
    RoomCountChanged(u64),
    RoomOccupancyChanged { room_id: String, occupancy: u64 },
}

//! Live room occupancy for the directory page.

use std::collections::BTreeMap;
use std::ops::Deref;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEntry {
    pub room_id: String,
    pub occupancy: u64,
}

/// roomId -> occupancy. Last write wins.
#[derive(Debug, Clone, Default)]
pub struct RoomRegistry {
    rooms: BTreeMap<String, u64>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns the previous occupancy, if any.
    pub fn upsert(&mut self, room_id: impl Into<String>, occupancy: u64) -> Option<u64> {
        self.rooms.insert(room_id.into(), occupancy)
    }

    pub fn get(&self, room_id: &str) -> Option<u64> {
        self.rooms.get(room_id).copied()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// All rooms by ascending occupancy; equal occupancy falls back to roomId ascending.
    pub fn snapshot(&self) -> RoomSnapshot {
        let mut entries: Vec<RoomEntry> = self
            .rooms
            .iter()
            .map(|(room_id, &occupancy)| RoomEntry {
                room_id: room_id.clone(),
                occupancy,
            })
            .collect();

        // BTreeMap iteration is already roomId-ordered and the sort is stable.
        entries.sort_by_key(|entry| entry.occupancy);

        RoomSnapshot { entries }
    }
}

/// Read-only ordered view produced by [`RoomRegistry::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomSnapshot {
    entries: Vec<RoomEntry>,
}

impl Deref for RoomSnapshot {
    type Target = [RoomEntry];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

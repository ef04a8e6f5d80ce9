use crate::rooms::{RoomEntry, RoomRegistry};

fn entry(room_id: &str, occupancy: u64) -> RoomEntry {
    RoomEntry {
        room_id: room_id.to_string(),
        occupancy,
    }
}

/// **VALUE**: Verifies that upserting the same room twice keeps one entry with the last value.
///
/// **WHY THIS MATTERS**: The server re-announces every room on each join/leave; duplicates
/// would list a room several times in the directory.
///
/// **BUG THIS CATCHES**: Would catch a Vec-backed registry that appends instead of replacing.
#[test]
fn given_same_room_when_upserted_twice_then_single_entry_with_latest() {
    // GIVEN: Empty registry
    let mut rooms = RoomRegistry::new();

    // WHEN: Two updates for /a
    assert_eq!(rooms.upsert("/a", 3), None);
    assert_eq!(rooms.upsert("/a", 5), Some(3));

    // THEN: One entry, occupancy 5
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms.snapshot().to_vec(), vec![entry("/a", 5)]);
}

/// **VALUE**: Verifies snapshot ordering: ascending occupancy, ties by room id.
///
/// **WHY THIS MATTERS**: The directory is rendered in snapshot order; an unstable tie order
/// makes rooms jump around on every update.
///
/// **BUG THIS CATCHES**: Would catch descending order or tie order depending on hash
/// iteration or insertion order.
#[test]
fn given_ties_when_snapshot_then_ascending_occupancy_then_room_id() {
    // GIVEN: Rooms inserted in scrambled order
    let mut rooms = RoomRegistry::new();
    rooms.upsert("/zeta", 2);
    rooms.upsert("/dev", 5);
    rooms.upsert("/alpha", 2);
    rooms.upsert("/", 0);

    // WHEN: Snapshot
    let snapshot = rooms.snapshot();

    // THEN: Deterministic order
    assert_eq!(
        snapshot.to_vec(),
        vec![
            entry("/", 0),
            entry("/alpha", 2),
            entry("/zeta", 2),
            entry("/dev", 5),
        ]
    );
}

/// **VALUE**: Verifies that a snapshot is detached from later updates.
///
/// **WHY THIS MATTERS**: Views may hold a snapshot while the session keeps dispatching.
///
/// **BUG THIS CATCHES**: Would catch a snapshot that borrows or aliases registry storage.
#[test]
fn given_snapshot_when_registry_updated_then_snapshot_unchanged() {
    let mut rooms = RoomRegistry::new();
    rooms.upsert("/a", 1);
    let before = rooms.snapshot();

    rooms.upsert("/a", 9);
    rooms.upsert("/b", 2);

    assert_eq!(before.to_vec(), vec![entry("/a", 1)]);
    assert_eq!(rooms.get("/a"), Some(9));
}

use crate::session_tests::helpers::{ChannelView, TestServer, ViewSignal, wait_for, wait_for_event};

use session_core::config::SessionConfig;
use session_core::protocol::Surface;
use session_core::rooms::RoomEntry;
use session_core::session::{SessionEvent, SessionTarget, start_session};

use futures_util::SinkExt;
use tokio_tungstenite::tungstenite::Message;

/// **VALUE**: Verifies the directory page: counts and a sorted room list.
///
/// **WHY THIS MATTERS**: The directory is how users find rooms; it must show every room
/// exactly once, ordered by occupancy.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - The root path does not select the directory surface
/// - Repeated room updates create duplicate entries
/// - The snapshot is not ordered by ascending occupancy
#[tokio::test]
async fn given_directory_session_when_room_updates_arrive_then_sorted_snapshot() {
    // GIVEN: A directory session
    let mut server = TestServer::start().await;
    let (view, mut rx) = ChannelView::new();
    let target = SessionTarget::from_page_url(&server.page_url("/")).unwrap();
    assert_eq!(target.surface(), Surface::Directory);
    let handle = start_session(target, &SessionConfig::default(), view);
    let mut server_ws = server.accept().await;
    wait_for_event(&mut rx, SessionEvent::Connected).await;

    // WHEN: Counts and room updates, /dev updated twice
    for frame in ["02", "13", "22/dev", "21/", "25/dev"] {
        server_ws.send(Message::Text(frame.into())).await.unwrap();
    }

    // THEN
    wait_for_event(&mut rx, SessionEvent::RoomCountChanged(2)).await;
    wait_for_event(&mut rx, SessionEvent::UserCountChanged(3)).await;
    let rooms = wait_for(&mut rx, |s| {
        matches!(s, ViewSignal::Rooms(rooms) if rooms.iter().any(|r| r.occupancy == 5))
    })
    .await;
    assert_eq!(
        rooms,
        ViewSignal::Rooms(vec![
            RoomEntry {
                room_id: "/".to_string(),
                occupancy: 1,
            },
            RoomEntry {
                room_id: "/dev".to_string(),
                occupancy: 5,
            },
        ])
    );

    handle.shutdown().await.unwrap();
}

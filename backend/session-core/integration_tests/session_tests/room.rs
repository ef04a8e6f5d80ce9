use crate::session_tests::helpers::{
    ChannelView, TestServer, ViewSignal, drain, wait_for, wait_for_event, wait_for_status,
};

use session_core::config::SessionConfig;
use session_core::session::{ConnectionState, SessionEvent, SessionTarget, start_session};

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;

/// **VALUE**: Verifies the full happy path on a room page: connect, receive, send.
///
/// **WHY THIS MATTERS**: This is what every chat user does. If any leg breaks, the page is
/// useless.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - The socket URL is derived wrongly and the server is never reached
/// - Inbound text frames are not decoded into `NewText`
/// - Outgoing text is not prefixed with the text token
/// - The feed does not start with the Connected notice
#[tokio::test]
async fn given_room_server_when_session_started_then_text_flows_both_ways() {
    // GIVEN: A server and a room session
    let mut server = TestServer::start().await;
    let (view, mut rx) = ChannelView::new();
    let target = SessionTarget::from_page_url(&server.page_url("/dev")).unwrap();
    let handle = start_session(target, &SessionConfig::default(), view);
    let mut server_ws = server.accept().await;

    // THEN: Connected, with the notice in the feed
    wait_for_event(&mut rx, SessionEvent::Connected).await;
    let feed = wait_for(&mut rx, |s| matches!(s, ViewSignal::Feed(_))).await;
    assert_eq!(
        feed,
        ViewSignal::Feed(vec!["> Connected To Server".to_string()])
    );

    // WHEN: Server broadcasts a message
    server_ws
        .send(Message::Text("0hello".into()))
        .await
        .unwrap();

    // THEN: It reaches the view
    wait_for_event(&mut rx, SessionEvent::NewText("hello".to_string())).await;

    // WHEN: User sends text
    handle.send("  hi there ").await.unwrap();

    // THEN: Server receives the trimmed, tokenized frame
    let received = server_ws.next().await.unwrap().unwrap();
    assert_eq!(received, Message::Text("0hi there".into()));

    handle.shutdown().await.unwrap();
}

/// **VALUE**: Verifies that user counts are surfaced on a room page.
///
/// **WHY THIS MATTERS**: Rooms show how many people are present.
///
/// **BUG THIS CATCHES**: Would catch token `1` being misrouted on the room surface.
#[tokio::test]
async fn given_room_session_when_user_count_frame_then_count_event() {
    // GIVEN
    let mut server = TestServer::start().await;
    let (view, mut rx) = ChannelView::new();
    let target = SessionTarget::from_page_url(&server.page_url("/dev")).unwrap();
    let handle = start_session(target, &SessionConfig::default(), view);
    let mut server_ws = server.accept().await;
    wait_for_event(&mut rx, SessionEvent::Connected).await;

    // WHEN
    server_ws.send(Message::Text("14".into())).await.unwrap();

    // THEN
    wait_for_event(&mut rx, SessionEvent::UserCountChanged(4)).await;

    drain(server_ws);
    handle.shutdown().await.unwrap();
}

/// **VALUE**: Verifies that garbage frames do not disturb an open session.
///
/// **WHY THIS MATTERS**: One bad frame must not drop the user out of the room.
///
/// **BUG THIS CATCHES**: Would catch a decode error tearing down the socket.
#[tokio::test]
async fn given_open_session_when_unknown_frame_arrives_then_session_stays_open() {
    // GIVEN
    let mut server = TestServer::start().await;
    let (view, mut rx) = ChannelView::new();
    let target = SessionTarget::from_page_url(&server.page_url("/dev")).unwrap();
    let handle = start_session(target, &SessionConfig::default(), view);
    let mut server_ws = server.accept().await;
    wait_for_event(&mut rx, SessionEvent::Connected).await;

    // WHEN: Unknown token, then a valid frame
    server_ws.send(Message::Text("9noise".into())).await.unwrap();
    server_ws.send(Message::Text("0after".into())).await.unwrap();

    // THEN: Only the valid frame surfaced, no disconnect in between
    let next = wait_for(&mut rx, |s| matches!(s, ViewSignal::Event(_))).await;
    assert_eq!(
        next,
        ViewSignal::Event(SessionEvent::NewText("after".to_string()))
    );
    let status = wait_for_status(&handle, |s| s.state == ConnectionState::Open).await;
    assert_eq!(status.backoff.retry_count, 0);

    drain(server_ws);
    handle.shutdown().await.unwrap();
}

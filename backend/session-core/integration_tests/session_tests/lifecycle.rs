use crate::session_tests::helpers::{
    ChannelView, StallingListener, TestServer, ViewSignal, WAIT, config_with_retries,
    dead_address, drain, page_url_for, wait_for, wait_for_event, wait_for_status,
};

use session_core::config::SessionConfig;
use session_core::error::session::SessionError;
use session_core::session::{ConnectionState, SessionEvent, SessionTarget, start_session};

use std::time::Duration;

/// **VALUE**: Verifies automatic reconnect after the server drops the connection.
///
/// **WHY THIS MATTERS**: Servers restart. Users should land back in the room without
/// reloading the page.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - A remote close is not noticed
/// - The reconnect timer is never armed or never fires
/// - The backoff is not reset after the reconnect succeeds
#[tokio::test]
async fn given_open_session_when_server_closes_then_reconnects() {
    // GIVEN: Connected room session
    let mut server = TestServer::start().await;
    let (view, mut rx) = ChannelView::new();
    let target = SessionTarget::from_page_url(&server.page_url("/dev")).unwrap();
    let handle = start_session(target, &SessionConfig::default(), view);
    let mut first = server.accept().await;
    wait_for_event(&mut rx, SessionEvent::Connected).await;

    // WHEN: Server closes the socket
    first.close(None).await.unwrap();
    drain(first);

    // THEN: Disconnected notice, then a new connection after the 1s grace delay
    wait_for_event(&mut rx, SessionEvent::Disconnected).await;
    let feed = wait_for(&mut rx, |s| matches!(s, ViewSignal::Feed(_))).await;
    assert_eq!(
        feed,
        ViewSignal::Feed(vec![
            "> Connected To Server".to_string(),
            "> Disconnected From Server".to_string(),
        ])
    );

    let second = server.accept().await;
    wait_for_event(&mut rx, SessionEvent::Connected).await;
    let status = wait_for_status(&handle, |s| s.state == ConnectionState::Open).await;
    assert_eq!(status.backoff.retry_count, 0);
    assert_eq!(status.backoff.total_elapsed_secs, 0);

    drain(second);
    handle.shutdown().await.unwrap();
}

/// **VALUE**: Verifies exhaustion with zero retries against a dead port.
///
/// **WHY THIS MATTERS**: When the server is gone the session must give up, tell the user,
/// and refuse sends instead of queueing them.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - A failed handshake is not routed through the backoff
/// - `on_retry_exhausted` is never called
/// - Sends succeed or hang while disconnected
/// - A reconnect timer is still armed after exhaustion
#[tokio::test]
async fn given_dead_server_when_retries_exhausted_then_view_told_and_send_refused() {
    // GIVEN: No retries, nothing listening
    let (view, mut rx) = ChannelView::new();
    let addr = dead_address().await;
    let target = SessionTarget::from_page_url(&page_url_for(addr, "/room")).unwrap();

    // WHEN: Session starts
    let handle = start_session(target, &config_with_retries(0), view);

    // THEN: Disconnected, then exhausted
    wait_for_event(&mut rx, SessionEvent::Disconnected).await;
    wait_for(&mut rx, |s| *s == ViewSignal::Exhausted).await;
    let status = wait_for_status(&handle, |s| s.exhausted).await;
    assert_eq!(status.state, ConnectionState::Disconnected);

    // THEN: Sends are refused
    let err = handle.send("anyone?").await.unwrap_err();
    assert!(
        matches!(err, SessionError::NotConnected { .. }),
        "expected NotConnected, got {err:?}"
    );

    // THEN: The server coming back on the same port sees no dial past the grace delay
    let mut revived = TestServer::bind(addr).await;
    assert!(
        revived
            .accept_within(Duration::from_secs(2))
            .await
            .is_none(),
        "exhausted session dialed again"
    );

    handle.shutdown().await.unwrap();
}

/// **VALUE**: Verifies that a manual open after exhaustion reaches a server that came back.
///
/// **WHY THIS MATTERS**: Manual open is the only way out of exhaustion.
///
/// **BUG THIS CATCHES**: Would catch `open()` being ignored while exhausted.
#[tokio::test]
async fn given_exhausted_session_when_opened_manually_then_connects() {
    // GIVEN: A session exhausted against a server that drops every socket
    let mut server = TestServer::start().await;
    let (view, mut rx) = ChannelView::new();
    let target = SessionTarget::from_page_url(&server.page_url("/dev")).unwrap();
    let handle = start_session(target, &config_with_retries(0), view);
    let mut first = server.accept().await;
    wait_for_event(&mut rx, SessionEvent::Connected).await;
    first.close(None).await.unwrap();
    drain(first);
    wait_for(&mut rx, |s| *s == ViewSignal::Exhausted).await;

    // WHEN: Manual open
    handle.open().await.unwrap();

    // THEN: Connected again with a fresh backoff
    let second = server.accept().await;
    wait_for_event(&mut rx, SessionEvent::Connected).await;
    let status = wait_for_status(&handle, |s| s.state == ConnectionState::Open).await;
    assert!(!status.exhausted);

    drain(second);
    handle.shutdown().await.unwrap();
}

/// **VALUE**: Verifies that a local close does not reconnect.
///
/// **WHY THIS MATTERS**: Users who leave must stay gone.
///
/// **BUG THIS CATCHES**: Would catch a local close being treated like a server drop.
#[tokio::test]
async fn given_open_session_when_closed_locally_then_no_reconnect() {
    // GIVEN: Connected room session
    let mut server = TestServer::start().await;
    let (view, mut rx) = ChannelView::new();
    let target = SessionTarget::from_page_url(&server.page_url("/dev")).unwrap();
    let handle = start_session(target, &SessionConfig::default(), view);
    let server_ws = server.accept().await;
    drain(server_ws);
    wait_for_event(&mut rx, SessionEvent::Connected).await;

    // WHEN: Local close
    handle.close().await.unwrap();

    // THEN: Disconnected and no new connection past the grace delay
    wait_for_event(&mut rx, SessionEvent::Disconnected).await;
    assert!(
        server
            .accept_within(Duration::from_millis(1500))
            .await
            .is_none()
    );
    let status = handle.status().await;
    assert_eq!(status.state, ConnectionState::Disconnected);
    assert_eq!(status.backoff.retry_count, 0);

    handle.shutdown().await.unwrap();
}

/// **VALUE**: Verifies shutdown stops the actor and later calls fail with `Closed`.
///
/// **WHY THIS MATTERS**: Callers must get an error, not a hang, after shutdown.
///
/// **BUG THIS CATCHES**: Would catch the actor loop surviving shutdown.
#[tokio::test]
async fn given_running_session_when_shutdown_then_stopped() {
    // GIVEN
    let mut server = TestServer::start().await;
    let (view, mut rx) = ChannelView::new();
    let target = SessionTarget::from_page_url(&server.page_url("/dev")).unwrap();
    let handle = start_session(target, &SessionConfig::default(), view);
    drain(server.accept().await);
    wait_for_event(&mut rx, SessionEvent::Connected).await;

    // WHEN
    handle.shutdown().await.unwrap();

    // THEN
    wait_for_event(&mut rx, SessionEvent::Disconnected).await;
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !handle.is_stopped() {
        assert!(tokio::time::Instant::now() < deadline, "actor never stopped");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    let err = handle.send("late").await.unwrap_err();
    assert!(matches!(err, SessionError::Closed { .. }));
}

/// **VALUE**: Verifies that a manual open during the backoff wait cancels the pending timer.
///
/// **WHY THIS MATTERS**: Two dials for one session would mean two sockets in the same room
/// and every line delivered twice.
///
/// **BUG THIS CATCHES**: Would catch the reconnect timer surviving a manual open and firing
/// a second connection attempt.
#[tokio::test]
async fn given_reconnect_pending_when_opened_manually_then_single_dial() {
    // GIVEN: The server dropped the session; the 1s reconnect timer is armed
    let mut server = TestServer::start().await;
    let (view, mut rx) = ChannelView::new();
    let target = SessionTarget::from_page_url(&server.page_url("/dev")).unwrap();
    let handle = start_session(target, &SessionConfig::default(), view);
    let mut first = server.accept().await;
    wait_for_event(&mut rx, SessionEvent::Connected).await;
    first.close(None).await.unwrap();
    drain(first);
    wait_for_event(&mut rx, SessionEvent::Disconnected).await;

    // WHEN: Manual open before the timer fires
    handle.open().await.unwrap();

    // THEN: Exactly one new connection, ahead of the timer
    let second = server
        .accept_within(Duration::from_millis(800))
        .await
        .expect("manual open did not dial immediately");
    wait_for_event(&mut rx, SessionEvent::Connected).await;
    assert!(
        server
            .accept_within(Duration::from_secs(2))
            .await
            .is_none(),
        "cancelled reconnect timer still dialed"
    );

    drain(second);
    handle.shutdown().await.unwrap();
}

/// **VALUE**: Verifies that a local close during the backoff wait keeps the session closed.
///
/// **WHY THIS MATTERS**: Closing during an outage is still closing; the session must not
/// come back on its own when the timer fires.
///
/// **BUG THIS CATCHES**: Would catch `close()` being ignored outside `Open`, leaving the
/// reconnect timer armed.
#[tokio::test]
async fn given_reconnect_pending_when_closed_locally_then_stays_disconnected() {
    // GIVEN: The server dropped the session; the reconnect timer is armed
    let mut server = TestServer::start().await;
    let (view, mut rx) = ChannelView::new();
    let target = SessionTarget::from_page_url(&server.page_url("/dev")).unwrap();
    let handle = start_session(target, &SessionConfig::default(), view);
    let mut first = server.accept().await;
    wait_for_event(&mut rx, SessionEvent::Connected).await;
    first.close(None).await.unwrap();
    drain(first);
    wait_for_event(&mut rx, SessionEvent::Disconnected).await;

    // WHEN: Local close during the wait
    handle.close().await.unwrap();

    // THEN: No dial after the grace delay
    assert!(
        server
            .accept_within(Duration::from_secs(2))
            .await
            .is_none(),
        "session reconnected after close"
    );
    let status = wait_for_status(&handle, |s| s.suspended).await;
    assert_eq!(status.state, ConnectionState::Disconnected);

    // THEN: Manual open resumes
    handle.open().await.unwrap();
    let second = server.accept().await;
    wait_for_event(&mut rx, SessionEvent::Connected).await;

    drain(second);
    handle.shutdown().await.unwrap();
}

/// **VALUE**: Verifies that a local close abandons an in-flight connection attempt.
///
/// **WHY THIS MATTERS**: A handshake against a slow server can take up to the connect
/// timeout; the user must be able to give up without it counting as a failure.
///
/// **BUG THIS CATCHES**: Would catch the dial surviving the close, or the abandoned attempt
/// advancing the backoff and scheduling a reconnect.
#[tokio::test]
async fn given_connection_attempt_when_closed_locally_then_abandoned() {
    // GIVEN: A listener that never completes the WebSocket handshake
    let mut listener = StallingListener::start().await;
    let (view, mut rx) = ChannelView::new();
    let target = SessionTarget::from_page_url(&listener.page_url("/dev")).unwrap();
    let handle = start_session(target, &SessionConfig::default(), view);
    let _stalled = listener
        .accept_within(WAIT)
        .await
        .expect("session never dialed");

    // WHEN: Local close while connecting
    handle.close().await.unwrap();

    // THEN: Disconnected, backoff untouched, no further dial
    wait_for_event(&mut rx, SessionEvent::Disconnected).await;
    let status = wait_for_status(&handle, |s| s.state == ConnectionState::Disconnected).await;
    assert_eq!(status.backoff.retry_count, 0);
    assert!(status.suspended);
    assert!(
        listener
            .accept_within(Duration::from_secs(2))
            .await
            .is_none(),
        "abandoned attempt was retried"
    );

    handle.shutdown().await.unwrap();
}

/// **VALUE**: Verifies that the close handshake is bounded when the peer never answers.
///
/// **WHY THIS MATTERS**: A session stuck in `Closing` refuses every `open()`, so the user
/// could never reconnect without restarting.
///
/// **BUG THIS CATCHES**: Would catch a missing close deadline.
#[tokio::test]
async fn given_silent_peer_when_closed_locally_then_disconnected_after_deadline() {
    // GIVEN: A server socket that is never read, so the close is never answered
    let mut server = TestServer::start().await;
    let (view, mut rx) = ChannelView::new();
    let target = SessionTarget::from_page_url(&server.page_url("/dev")).unwrap();
    let handle = start_session(target, &SessionConfig::default(), view);
    let _silent = server.accept().await;
    wait_for_event(&mut rx, SessionEvent::Connected).await;

    // WHEN: Local close
    handle.close().await.unwrap();

    // THEN: Disconnected once the deadline passes
    wait_for_event(&mut rx, SessionEvent::Disconnected).await;
    let status = wait_for_status(&handle, |s| s.state == ConnectionState::Disconnected).await;
    assert!(status.suspended);

    // THEN: Manual open works again
    handle.open().await.unwrap();
    let second = server.accept().await;
    wait_for_event(&mut rx, SessionEvent::Connected).await;

    drain(second);
    handle.shutdown().await.unwrap();
}

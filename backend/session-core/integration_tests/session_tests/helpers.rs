//! Test helpers for session integration tests.
//!
//! - A throwaway WebSocket server on `127.0.0.1:0`
//! - A listener that accepts TCP but never answers the WebSocket handshake
//! - A view that forwards everything it sees over a channel
//! - Waiters with timeouts so a broken session fails instead of hanging

use session_core::config::{BackoffConfig, SessionConfig};
use session_core::error::session::SessionError;
use session_core::feed::{FeedBuffer, FeedEntry, FeedLine};
use session_core::rooms::{RoomEntry, RoomSnapshot};
use session_core::session::{SessionEvent, SessionHandle, SessionStatus, ViewAdapter};

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep, timeout};
use tokio_tungstenite::{WebSocketStream, accept_async};

pub const WAIT: Duration = Duration::from_secs(10);

pub type ServerSocket = WebSocketStream<TcpStream>;

/// Everything a [`ChannelView`] was told, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewSignal {
    Event(SessionEvent),
    Feed(Vec<String>),
    Rooms(Vec<RoomEntry>),
    Exhausted,
}

pub struct ChannelView {
    tx: mpsc::UnboundedSender<ViewSignal>,
}

impl ChannelView {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ViewSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, signal: ViewSignal) {
        let _ = self.tx.send(signal);
    }
}

impl ViewAdapter for ChannelView {
    fn on_event(&mut self, event: &SessionEvent) {
        self.forward(ViewSignal::Event(event.clone()));
    }

    fn on_feed_changed(&mut self, feed: &FeedBuffer<FeedLine>, _evicted: &[FeedEntry<FeedLine>]) {
        let lines = feed.iter().map(|entry| entry.item().to_string()).collect();
        self.forward(ViewSignal::Feed(lines));
    }

    fn on_rooms_changed(&mut self, snapshot: &RoomSnapshot) {
        self.forward(ViewSignal::Rooms(snapshot.to_vec()));
    }

    fn on_retry_exhausted(&mut self, _error: &SessionError) {
        self.forward(ViewSignal::Exhausted);
    }
}

/// Local WebSocket server that hands every accepted socket to the test.
pub struct TestServer {
    addr: SocketAddr,
    connections: mpsc::UnboundedReceiver<ServerSocket>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await
    }

    pub async fn bind(addr: SocketAddr) -> Self {
        let listener = TcpListener::bind(addr)
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Test server has no address");
        let (tx, connections) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let Ok(ws) = accept_async(stream).await else {
                    continue;
                };
                if tx.send(ws).is_err() {
                    break;
                }
            }
        });

        Self { addr, connections }
    }

    pub fn page_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn accept(&mut self) -> ServerSocket {
        self.accept_within(WAIT)
            .await
            .expect("Session never connected to test server")
    }

    pub async fn accept_within(&mut self, limit: Duration) -> Option<ServerSocket> {
        timeout(limit, self.connections.recv()).await.ok().flatten()
    }
}

/// Accepts TCP connections and holds them without ever completing a handshake.
pub struct StallingListener {
    addr: SocketAddr,
    connections: mpsc::UnboundedReceiver<TcpStream>,
}

impl StallingListener {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stalling listener");
        let addr = listener.local_addr().expect("Stalling listener has no address");
        let (tx, connections) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                if tx.send(stream).is_err() {
                    break;
                }
            }
        });

        Self { addr, connections }
    }

    pub fn page_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn accept_within(&mut self, limit: Duration) -> Option<TcpStream> {
        timeout(limit, self.connections.recv()).await.ok().flatten()
    }
}

/// An address nothing listens on (until a test binds it again).
pub async fn dead_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind throwaway listener");
    let addr = listener.local_addr().expect("Throwaway listener has no address");
    drop(listener);
    addr
}

pub fn page_url_for(addr: SocketAddr, path: &str) -> String {
    format!("http://{addr}{path}")
}

pub fn config_with_retries(max_retries: u32) -> SessionConfig {
    SessionConfig {
        backoff: BackoffConfig {
            max_retries,
            ..BackoffConfig::default()
        },
        ..SessionConfig::default()
    }
}

/// Keep reading a server socket so close handshakes complete.
pub fn drain(mut ws: ServerSocket) {
    tokio::spawn(async move { while let Some(Ok(_)) = ws.next().await {} });
}

/// Wait for the first signal matching `predicate`, skipping the rest.
pub async fn wait_for(
    rx: &mut mpsc::UnboundedReceiver<ViewSignal>,
    predicate: impl Fn(&ViewSignal) -> bool,
) -> ViewSignal {
    let deadline = Instant::now() + WAIT;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let signal = timeout(remaining, rx.recv())
            .await
            .expect("Timed out waiting for view signal")
            .expect("View channel closed");
        if predicate(&signal) {
            return signal;
        }
    }
}

pub async fn wait_for_event(rx: &mut mpsc::UnboundedReceiver<ViewSignal>, event: SessionEvent) {
    wait_for(rx, |signal| *signal == ViewSignal::Event(event.clone())).await;
}

/// Poll the published status until `predicate` holds.
pub async fn wait_for_status(
    handle: &SessionHandle,
    predicate: impl Fn(&SessionStatus) -> bool,
) -> SessionStatus {
    let deadline = Instant::now() + WAIT;
    loop {
        let status = handle.status().await;
        if predicate(&status) {
            return status;
        }
        assert!(
            Instant::now() < deadline,
            "Timed out waiting for status, last: {status:?}"
        );
        sleep(Duration::from_millis(20)).await;
    }
}

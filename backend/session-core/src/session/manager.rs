//! Session actor: owns the socket and drives the state machine.
//!
//! One tokio task per session. A single `tokio::select!` loop waits on four
//! sources and feeds each event into the [`SessionMachine`]:
//!
//! 1. caller commands from [`SessionHandle`]s
//! 2. the in-flight connect/handshake future
//! 3. the next inbound socket frame
//! 4. the one-shot reconnect timer
//! 5. the close-handshake deadline
//!
//! Handlers run to completion before the loop polls again, so frames are
//! dispatched strictly in arrival order and the feed and room registry are
//! never touched concurrently.

use crate::config::SessionConfig;
use crate::error::session::SessionError;
use crate::session::handle::{SessionCommand, SessionHandle};
use crate::session::{
    CloseAction, CloseOutcome, SessionMachine, SessionStatus, SessionTarget, ViewAdapter,
};

use std::future::{Future, pending};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, trace, warn};
use tokio::net::TcpStream;
use tokio::spawn as TokioSpawn;
use tokio::sync::{RwLock, mpsc};
use tokio::time::{Sleep, sleep as TokioSleep, timeout as TokioTimeout};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

const COMMAND_CHANNEL_CAPACITY: usize = 100;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type ConnectFuture = Pin<Box<dyn Future<Output = Result<WsStream, SessionError>> + Send>>;
type Timer = Pin<Box<Sleep>>;

/// Starts a session for `target` and begins connecting immediately.
///
/// Must be called from within a tokio runtime. The returned handle is the
/// only way to reach the session; dropping every clone stops it.
pub fn start_session<V: ViewAdapter>(
    target: SessionTarget,
    config: &SessionConfig,
    view: V,
) -> SessionHandle {
    let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    let manager = ConnectionManager::new(target, config, view);
    let status = Arc::clone(&manager.status);

    TokioSpawn(manager.run(command_rx));

    SessionHandle::new(command_tx, status)
}

/// Owns one socket, one state machine and its view.
pub struct ConnectionManager<V: ViewAdapter> {
    url: Url,
    machine: SessionMachine<V>,
    status: Arc<RwLock<SessionStatus>>,
}

impl<V: ViewAdapter> ConnectionManager<V> {
    pub fn new(target: SessionTarget, config: &SessionConfig, view: V) -> Self {
        let machine = SessionMachine::new(target.surface(), config, view);
        let status = Arc::new(RwLock::new(machine.status()));

        Self {
            url: target.url().clone(),
            machine,
            status,
        }
    }

    /// The actor loop. Runs until shutdown or until every handle is dropped.
    async fn run(mut self, mut command_rx: mpsc::Receiver<SessionCommand>) {
        info!("Session started for {} ({})", self.url, self.machine.surface());

        let mut socket: Option<WsStream> = None;
        let mut connecting: Option<ConnectFuture> = None;
        let mut reconnect: Option<Timer> = None;
        let mut close_deadline: Option<Timer> = None;

        if self.machine.open() {
            connecting = Some(self.dial());
        }
        self.publish_status().await;

        loop {
            tokio::select! {
                command = command_rx.recv() => {
                    let Some(command) = command else {
                        debug!("All session handles dropped");
                        break;
                    };

                    match command {
                        SessionCommand::Open => {
                            if reconnect.take().is_some() {
                                debug!("Manual open cancelled pending reconnect timer");
                            }
                            if self.machine.open() {
                                connecting = Some(self.dial());
                            }
                        }
                        SessionCommand::Send { text, reply } => {
                            let result = self.write_text(&mut socket, &text).await;
                            if let Err(SessionError::Connection { message, .. }) = &result {
                                socket = None;
                                let error = SessionError::connection(message.clone());
                                reconnect = schedule(self.machine.handle_error(error));
                            }
                            if reply.send(result).is_err() {
                                trace!("Send caller went away before reply");
                            }
                        }
                        SessionCommand::Close => match self.machine.close() {
                            CloseAction::SendCloseFrame => {
                                let sent = match socket.as_mut() {
                                    Some(ws) => ws.close(None).await,
                                    None => Ok(()),
                                };
                                match sent {
                                    Ok(()) => {
                                        close_deadline = Some(Box::pin(TokioSleep(CLOSE_TIMEOUT)));
                                    }
                                    Err(e) => {
                                        warn!("Close frame failed: {e}");
                                        socket = None;
                                        reconnect = schedule(self.machine.handle_close());
                                    }
                                }
                            }
                            CloseAction::AbortDial => {
                                connecting = None;
                            }
                            CloseAction::CancelTimer => {
                                if reconnect.take().is_some() {
                                    debug!("Local close cancelled pending reconnect timer");
                                }
                            }
                            CloseAction::Ignored => {}
                        },
                        SessionCommand::Shutdown => {
                            if let Some(mut ws) = socket.take()
                                && let Err(e) = ws.close(None).await
                            {
                                debug!("Close on shutdown failed: {e}");
                            }
                            self.machine.stop();
                            break;
                        }
                    }
                }

                result = wait_connect(&mut connecting) => {
                    connecting = None;
                    match result {
                        Ok(ws) => {
                            socket = Some(ws);
                            self.machine.handle_open();
                        }
                        Err(e) => {
                            reconnect = schedule(self.machine.handle_error(e));
                        }
                    }
                }

                frame = next_frame(&mut socket) => {
                    match frame {
                        Some(Ok(Message::Text(text))) => {
                            if let Err(e) = self.machine.handle_frame(text.as_str()) {
                                debug!("Dropped frame: {e}");
                            }
                        }
                        Some(Ok(Message::Binary(data))) => {
                            debug!("Ignoring {} byte binary frame", data.len());
                        }
                        Some(Ok(Message::Close(close_frame))) => {
                            // Stream ends once tungstenite finishes the close handshake.
                            debug!("Server sent close: {close_frame:?}");
                        }
                        Some(Ok(_)) => {}
                        Some(Err(WsError::ConnectionClosed | WsError::AlreadyClosed)) | None => {
                            socket = None;
                            close_deadline = None;
                            reconnect = schedule(self.machine.handle_close());
                        }
                        Some(Err(e)) => {
                            socket = None;
                            close_deadline = None;
                            reconnect = schedule(self.machine.handle_error(e.into()));
                        }
                    }
                }

                () = wait_timer(&mut close_deadline) => {
                    close_deadline = None;
                    warn!("Peer did not finish the close handshake within {CLOSE_TIMEOUT:?}");
                    socket = None;
                    reconnect = schedule(self.machine.handle_close());
                }

                () = wait_timer(&mut reconnect) => {
                    reconnect = None;
                    if self.machine.reopen() {
                        connecting = Some(self.dial());
                    }
                }
            }

            self.publish_status().await;
        }

        self.publish_status().await;
        info!("Session for {} stopped", self.url);
    }

    fn dial(&self) -> ConnectFuture {
        let url = self.url.to_string();
        debug!("Dialing {url}");

        Box::pin(async move {
            match TokioTimeout(CONNECT_TIMEOUT, connect_async(url.as_str())).await {
                Ok(Ok((ws, _response))) => Ok(ws),
                Ok(Err(e)) => Err(SessionError::from(e)),
                Err(_) => Err(SessionError::connection(format!(
                    "Handshake with {url} timed out after {CONNECT_TIMEOUT:?}"
                ))),
            }
        })
    }

    async fn write_text(
        &mut self,
        socket: &mut Option<WsStream>,
        text: &str,
    ) -> Result<(), SessionError> {
        let frame = self.machine.encode_outgoing(text)?;

        let ws = socket
            .as_mut()
            .ok_or_else(|| SessionError::not_connected(self.machine.state()))?;

        ws.send(Message::Text(frame.into())).await.map_err(|e| {
            error!("Failed to send frame: {e}");
            SessionError::from(e)
        })
    }

    async fn publish_status(&mut self) {
        *self.status.write().await = self.machine.status();
    }
}

fn schedule(outcome: CloseOutcome) -> Option<Timer> {
    match outcome {
        CloseOutcome::Reconnect(delay) => Some(Box::pin(TokioSleep(delay))),
        CloseOutcome::Exhausted => {
            info!("No further automatic reconnects; waiting for manual open");
            None
        }
        CloseOutcome::Ignored | CloseOutcome::Stopped => None,
    }
}

async fn wait_connect(connecting: &mut Option<ConnectFuture>) -> Result<WsStream, SessionError> {
    match connecting {
        Some(future) => future.await,
        None => pending().await,
    }
}

async fn next_frame(socket: &mut Option<WsStream>) -> Option<Result<Message, WsError>> {
    match socket {
        Some(ws) => ws.next().await,
        None => pending().await,
    }
}

async fn wait_timer(timer: &mut Option<Timer>) {
    match timer {
        Some(timer) => timer.await,
        None => pending().await,
    }
}

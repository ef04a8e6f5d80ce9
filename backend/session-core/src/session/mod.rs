//! Connection lifecycle for one chat page.
//!
//! This module is split the same way the rest of the workspace splits stateful
//! services:
//!
//! - [`SessionMachine`]: pure state machine with named transitions, no I/O
//! - [`ConnectionManager`]: the actor task that owns the socket and reconnect timer
//!   and feeds socket/timer/command events into the machine one at a time
//! - [`SessionHandle`]: cheap cloneable front door that sends commands to the actor
//! - [`ViewAdapter`]: the presentation surface the machine reports to
//!
//! # Lifecycle
//!
//! ```text
//!              open()                 handshake ok
//! Disconnected ──────▶ Connecting ─────────────────▶ Open
//!      ▲                   │                          │ close()
//!      │   close/error     │                          ▼
//!      └───────────────────┴──────────────────────  Closing
//! ```
//!
//! Every close from `Connecting` or `Open` advances the backoff policy and,
//! unless it is exhausted, arms a one-shot reconnect timer. A local `close()`
//! in any state suspends reconnection until the next manual `open()`.

mod connection_state;
mod endpoint;
mod event;
mod handle;
mod machine;
mod manager;
mod status;
mod view;

pub use connection_state::ConnectionState;
pub use endpoint::{SessionTarget, socket_url};
pub use event::SessionEvent;
pub use handle::SessionHandle;
pub use machine::{CloseAction, CloseOutcome, SessionMachine};
pub use manager::{ConnectionManager, start_session};
pub use status::SessionStatus;
pub use view::ViewAdapter;

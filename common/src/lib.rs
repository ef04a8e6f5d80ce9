//! Shared primitives for the chat session workspace.
//!
//! ## Architecture
//!
//! - **common** (this crate): types every other crate leans on (error locations)
//! - **session-core**: connection lifecycle, backoff, protocol, feed and room state
//! - **chatpp**: terminal front-end wiring a view onto a session
//!
//! Nothing here knows about sockets or the wire protocol.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;

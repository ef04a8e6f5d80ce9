pub mod config;
pub mod error;
pub mod feed;
pub mod protocol;
pub mod retry;
pub mod rooms;
pub mod session;

#[cfg(test)]
mod tests;

pub const APP_NAME: &str = "chatpp";
pub const NOTICE_PREFIX: &str = "> ";
pub const CONNECTED_NOTICE: &str = const_format::concatcp!(NOTICE_PREFIX, "Connected To Server");
pub const DISCONNECTED_NOTICE: &str =
    const_format::concatcp!(NOTICE_PREFIX, "Disconnected From Server");

//! Command line and in-chat commands.

use std::path::PathBuf;

use clap::Parser;

/// Terminal client for chat rooms.
#[derive(Debug, Parser)]
#[command(name = "chatpp", version)]
pub struct Args {
    /// Page URL of the room, e.g. `https://chat.example.com/dev`.
    /// The root path (`/`) opens the room directory.
    pub url: String,

    /// Directory holding `session.toml` [default: platform config dir]
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Directory for `chatpp.log` [default: platform cache dir]
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

/// One line typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand<'a> {
    Quit,
    Reconnect,
    Status,
    Text(&'a str),
}

impl<'a> InputCommand<'a> {
    /// Slash commands are matched after trimming; anything else is chat text.
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            "/quit" | "/exit" => InputCommand::Quit,
            "/reconnect" => InputCommand::Reconnect,
            "/status" => InputCommand::Status,
            _ => InputCommand::Text(line),
        }
    }
}

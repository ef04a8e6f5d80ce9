//! Wiring: logger, config, session and the stdin loop.

use crate::cli::{Args, InputCommand};
use crate::error::AppError;
use crate::logger::initialize as LoggerInitialize;
use crate::view::TerminalView;

use session_core::APP_NAME;
use session_core::config::{SessionConfig, default_config_dir};
use session_core::error::session::SessionError;
use session_core::session::{SessionHandle, SessionTarget, start_session};

use std::fs::create_dir_all;
use std::io::stdout;
use std::path::PathBuf;

use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader, stdin};

/// Run the client until `/quit`, end of input, or a fatal error.
pub async fn run(args: Args) -> Result<(), AppError> {
    let log_dir = match args.log_dir {
        Some(dir) => dir,
        None => default_log_dir()?,
    };
    create_dir_all(&log_dir).map_err(|e| {
        AppError::chatpp(format!(
            "Failed to create log directory {}: {e}",
            log_dir.display()
        ))
    })?;
    LoggerInitialize(&log_dir)?;
    info!("Log directory: {}", log_dir.display());

    let config_dir = match args.config_dir {
        Some(dir) => dir,
        None => default_config_dir()?,
    };
    let config = SessionConfig::load(&config_dir)?;

    let target = SessionTarget::from_page_url(&args.url)?;
    info!("Joining {} as {}", target.url(), target.surface());

    let view = TerminalView::new(target.surface(), stdout());
    let handle = start_session(target, &config, view);

    let result = input_loop(&handle).await;

    if let Err(e) = handle.shutdown().await {
        warn!("Session already stopped: {e}");
    }

    result
}

async fn input_loop(handle: &SessionHandle) -> Result<(), AppError> {
    let mut lines = BufReader::new(stdin()).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| AppError::chatpp(format!("Failed to read stdin: {e}")))?
    {
        match InputCommand::parse(&line) {
            InputCommand::Quit => break,
            InputCommand::Reconnect => handle.open().await?,
            InputCommand::Status => {
                let status = handle.status().await;
                println!(
                    "{} {} (retry {}, waited {}s{})",
                    status.surface,
                    status.state,
                    status.backoff.retry_count,
                    status.backoff.total_elapsed_secs,
                    if status.exhausted {
                        ", gave up"
                    } else if status.suspended {
                        ", closed"
                    } else {
                        ""
                    }
                );
            }
            InputCommand::Text(text) => match handle.send(text).await {
                Ok(()) => {}
                Err(e @ SessionError::Closed { .. }) => return Err(e.into()),
                Err(e) => eprintln!("{e}"),
            },
        }
    }

    Ok(())
}

fn default_log_dir() -> Result<PathBuf, AppError> {
    dirs::cache_dir()
        .map(|dir| dir.join(APP_NAME))
        .ok_or_else(|| AppError::chatpp("Platform has no cache directory"))
}

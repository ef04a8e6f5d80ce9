//! Session tuning: reconnect backoff and feed capacity.
//!
//! Loaded from `{config_dir}/session.toml`. Every field has a default, so a
//! partial file (or none at all) is valid:
//!
//! ```toml
//! [backoff]
//! initial_delay_secs = 1
//! step = 2.0
//! max_delay_secs = 90
//! max_retries = 10
//!
//! [feed]
//! capacity = 64
//! ```

use crate::APP_NAME;
use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "session.toml";

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BackoffConfig {
    #[serde(default = "default_initial_delay_secs")]
    pub initial_delay_secs: u64,
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay_secs: default_initial_delay_secs(),
            step: default_step(),
            max_delay_secs: default_max_delay_secs(),
            max_retries: default_max_retries(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedConfig {
    #[serde(default = "default_feed_capacity")]
    pub capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            capacity: default_feed_capacity(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    #[serde(default)]
    pub backoff: BackoffConfig,

    #[serde(default)]
    pub feed: FeedConfig,
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_initial_delay_secs() -> u64 {
    1
}
fn default_step() -> f64 {
    2.0
}
fn default_max_delay_secs() -> u64 {
    90
}
fn default_max_retries() -> u32 {
    10
}
fn default_feed_capacity() -> usize {
    64
}

// ============================================
// IMPLEMENTATION
// ============================================

impl SessionConfig {
    /// Load config from `{config_dir}/session.toml`.
    ///
    /// # Returns
    ///
    /// Returns defaults if the file does not exist.
    /// Returns `Err(ConfigError)` if the file exists but cannot be read, parsed or validated.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let config = Self::load_from_path(&config_path)?;
        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Load from a specific file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            warn!("Failed to read config file {}: {}", path.display(), e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: path.to_path_buf(),
                source: e,
            }
        })?;

        let config: SessionConfig = toml::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config TOML {}: {}", path.display(), e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let backoff = &self.backoff;

        if backoff.initial_delay_secs < 1 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "backoff.initial_delay_secs must be at least 1".to_string(),
            });
        }

        if backoff.initial_delay_secs > backoff.max_delay_secs {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "backoff.initial_delay_secs ({}) exceeds backoff.max_delay_secs ({})",
                    backoff.initial_delay_secs, backoff.max_delay_secs
                ),
            });
        }

        if !backoff.step.is_finite() || backoff.step < 1.0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid backoff.step: {} (must be >= 1.0)", backoff.step),
            });
        }

        if self.feed.capacity == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "feed.capacity must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

/// Platform config directory for the client (`~/.config/chatpp` on Linux).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_NAME))
        .ok_or_else(|| ConfigError::DirectoryNotFound {
            location: ErrorLocation::from(Location::caller()),
            reason: "platform has no config directory".to_string(),
        })
}

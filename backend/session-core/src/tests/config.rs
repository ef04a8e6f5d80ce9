use crate::config::{BackoffConfig, SessionConfig};
use crate::error::config::ConfigError;

use std::fs;

use tempfile::TempDir;

/// **VALUE**: Verifies that a missing config file yields defaults.
///
/// **WHY THIS MATTERS**: First run has no config file; that must not be an error.
///
/// **BUG THIS CATCHES**: Would catch `load()` surfacing a ReadError for a missing file.
#[test]
fn given_no_config_file_when_loaded_then_defaults() {
    // GIVEN: Empty directory
    let dir = TempDir::new().unwrap();

    // WHEN
    let config = SessionConfig::load(dir.path()).unwrap();

    // THEN
    assert_eq!(config, SessionConfig::default());
    assert_eq!(config.backoff.max_delay_secs, 90);
    assert_eq!(config.feed.capacity, 64);
}

/// **VALUE**: Verifies that a partial file keeps defaults for missing fields.
///
/// **WHY THIS MATTERS**: Users typically override one value, not the whole table.
///
/// **BUG THIS CATCHES**: Would catch a missing `#[serde(default)]` on a field or section.
#[test]
fn given_partial_config_when_loaded_then_missing_fields_defaulted() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("session.toml"),
        "[backoff]\nmax_retries = 3\n",
    )
    .unwrap();

    // WHEN
    let config = SessionConfig::load(dir.path()).unwrap();

    // THEN
    assert_eq!(
        config.backoff,
        BackoffConfig {
            max_retries: 3,
            ..BackoffConfig::default()
        }
    );
    assert_eq!(config.feed.capacity, 64);
}

/// **VALUE**: Verifies that malformed TOML is a parse error naming the file.
///
/// **WHY THIS MATTERS**: A typo in the config must be reported, not silently replaced by defaults.
///
/// **BUG THIS CATCHES**: Would catch parse failures falling back to defaults.
#[test]
fn given_malformed_toml_when_loaded_then_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.toml");
    fs::write(&path, "[backoff\nstep = ").unwrap();

    let err = SessionConfig::load(dir.path()).unwrap_err();

    match err {
        ConfigError::ParseError { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

/// **VALUE**: Verifies each validation rule.
///
/// **WHY THIS MATTERS**: A step below 1.0 would shrink delays, and zero capacity would
/// evict every line on arrival.
///
/// **BUG THIS CATCHES**: Would catch a missing rule in `validate()`.
#[test]
fn given_out_of_range_values_when_validated_then_validation_error() {
    let cases = [
        "[backoff]\ninitial_delay_secs = 0\n",
        "[backoff]\ninitial_delay_secs = 100\nmax_delay_secs = 90\n",
        "[backoff]\nstep = 0.5\n",
        "[backoff]\nstep = nan\n",
        "[feed]\ncapacity = 0\n",
    ];

    for contents in cases {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("session.toml"), contents).unwrap();

        let err = SessionConfig::load(dir.path()).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { .. }),
            "{contents:?} should fail validation, got {err:?}"
        );
    }
}

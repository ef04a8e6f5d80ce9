//! Deterministic reconnect backoff.
//!
//! The first failure after a successful connection retries at the initial
//! delay; only the second and later consecutive failures grow it. With the
//! default tuning that yields `1, 2, 4, 8, … 90, 90` seconds and gives up once
//! `retry_count` passes `max_retries`.
//!
//! [`advance`] is the pure transition. [`BackoffPolicy`] owns a state and also
//! implements [`backoff::backoff::Backoff`] so it can stand in wherever an
//! `ExponentialBackoff` would be driven with `next_backoff()`.

use crate::config::BackoffConfig;

use std::time::Duration;

use backoff::backoff::Backoff;
use log::{debug, trace};

/// Mutable part of the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffState {
    pub delay_secs: u64,
    pub retry_count: u32,
    pub total_elapsed_secs: u64,
}

impl BackoffState {
    /// State used at start-up and after every successful open.
    pub fn initial(config: &BackoffConfig) -> Self {
        Self {
            delay_secs: config.initial_delay_secs.clamp(1, config.max_delay_secs.max(1)),
            retry_count: 0,
            total_elapsed_secs: 0,
        }
    }
}

/// Outcome of one [`advance`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffDecision {
    RetryAfter(Duration),
    Exhausted,
}

/// Pure backoff transition for one failed attempt.
pub fn advance(state: BackoffState, config: &BackoffConfig) -> (BackoffState, BackoffDecision) {
    let max_delay = config.max_delay_secs.max(1);
    let mut next = state;

    if next.retry_count > 0 {
        let grown = (next.delay_secs as f64 * config.step).floor();
        next.delay_secs = if grown >= max_delay as f64 {
            max_delay
        } else {
            grown as u64
        };
    }

    next.retry_count = next.retry_count.saturating_add(1);
    next.delay_secs = next.delay_secs.clamp(1, max_delay);

    if next.retry_count > config.max_retries {
        return (next, BackoffDecision::Exhausted);
    }

    next.total_elapsed_secs = next.total_elapsed_secs.saturating_add(next.delay_secs);
    (
        next,
        BackoffDecision::RetryAfter(Duration::from_secs(next.delay_secs)),
    )
}

/// Stateful wrapper around [`advance`], owned by one session.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    config: BackoffConfig,
    state: BackoffState,
}

impl BackoffPolicy {
    pub fn new(config: BackoffConfig) -> Self {
        Self {
            state: BackoffState::initial(&config),
            config,
        }
    }

    pub fn config(&self) -> &BackoffConfig {
        &self.config
    }

    pub fn state(&self) -> BackoffState {
        self.state
    }

    /// Record one failed attempt and decide whether to retry.
    pub fn advance(&mut self) -> BackoffDecision {
        let (next, decision) = advance(self.state, &self.config);
        self.state = next;

        match decision {
            BackoffDecision::RetryAfter(delay) => trace!(
                "Backoff attempt {} -> retry after {delay:?} (total {}s)",
                next.retry_count, next.total_elapsed_secs
            ),
            BackoffDecision::Exhausted => debug!(
                "Backoff exhausted after {} attempts (max {})",
                next.retry_count, self.config.max_retries
            ),
        }

        decision
    }

    pub fn reset(&mut self) {
        self.state = BackoffState::initial(&self.config);
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.retry_count > self.config.max_retries
    }
}

impl Backoff for BackoffPolicy {
    fn reset(&mut self) {
        BackoffPolicy::reset(self);
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        match BackoffPolicy::advance(self) {
            BackoffDecision::RetryAfter(delay) => Some(delay),
            BackoffDecision::Exhausted => None,
        }
    }
}

use crate::config::BackoffConfig;
use crate::retry::{BackoffDecision, BackoffPolicy, BackoffState, advance};

use std::time::Duration;

use backoff::backoff::Backoff;

fn config(max_retries: u32) -> BackoffConfig {
    BackoffConfig {
        max_retries,
        ..BackoffConfig::default()
    }
}

fn delay_of(decision: BackoffDecision) -> u64 {
    match decision {
        BackoffDecision::RetryAfter(delay) => delay.as_secs(),
        BackoffDecision::Exhausted => panic!("expected a retry, got exhaustion"),
    }
}

/// **VALUE**: Verifies the full delay sequence for consecutive failures with default tuning.
///
/// **WHY THIS MATTERS**: The first failure retries at the minimum delay ("grace" retry),
/// and only later failures double. Users see this as how long the page stays disconnected.
///
/// **BUG THIS CATCHES**: Would catch growing the delay on the first failure (2, 4, 8 …),
/// forgetting to clamp at the maximum, or `retry_count` drifting from the attempt number.
#[test]
fn given_consecutive_failures_when_advanced_then_delays_double_from_second_and_clamp() {
    // GIVEN: Default step/max with a generous retry limit
    let mut policy = BackoffPolicy::new(config(20));
    let expected = [1, 2, 4, 8, 16, 32, 64, 90, 90, 90];

    // WHEN / THEN: Each attempt yields the expected delay and retry count
    for (attempt, expected_delay) in expected.iter().enumerate() {
        let delay = delay_of(policy.advance());
        assert_eq!(delay, *expected_delay, "attempt {}", attempt + 1);
        assert_eq!(policy.state().retry_count, attempt as u32 + 1);
    }
}

/// **VALUE**: Verifies that exhaustion is signalled exactly after `max_retries` retries.
///
/// **WHY THIS MATTERS**: The session must stop reconnecting on its own at some point,
/// and must not stop one attempt early.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one (`>=` instead of `>`) in the limit check,
/// or elapsed time being accumulated for the attempt that is never made.
#[test]
fn given_max_retries_when_exceeded_then_exhausted_and_elapsed_frozen() {
    // GIVEN: Default tuning (10 retries)
    let mut policy = BackoffPolicy::new(BackoffConfig::default());

    // WHEN: Ten failures
    for _ in 0..10 {
        assert!(matches!(policy.advance(), BackoffDecision::RetryAfter(_)));
    }
    let elapsed = policy.state().total_elapsed_secs;

    // THEN: The eleventh is exhausted and elapsed time does not grow
    assert_eq!(policy.advance(), BackoffDecision::Exhausted);
    assert!(policy.is_exhausted());
    assert_eq!(elapsed, 1 + 2 + 4 + 8 + 16 + 32 + 64 + 90 + 90 + 90);
    assert_eq!(policy.state().total_elapsed_secs, elapsed);
    assert_eq!(policy.state().retry_count, 11);
}

/// **VALUE**: Verifies that reset restores the initial state.
///
/// **WHY THIS MATTERS**: A successful open must start the next outage from a 1s delay.
///
/// **BUG THIS CATCHES**: Would catch reset leaving `delay_secs` at its grown value.
#[test]
fn given_grown_delay_when_reset_then_back_to_initial() {
    // GIVEN: Several failures
    let mut policy = BackoffPolicy::new(config(10));
    for _ in 0..5 {
        policy.advance();
    }

    // WHEN: Reset
    policy.reset();

    // THEN: Initial values
    assert_eq!(
        policy.state(),
        BackoffState {
            delay_secs: 1,
            retry_count: 0,
            total_elapsed_secs: 0
        }
    );
    assert_eq!(delay_of(policy.advance()), 1);
}

/// **VALUE**: Verifies that fractional steps are floored.
///
/// **WHY THIS MATTERS**: Delays are whole seconds; a non-integer step must not produce
/// fractional or rounded-up delays.
///
/// **BUG THIS CATCHES**: Would catch `round()`/`ceil()` in place of `floor()`.
#[test]
fn given_fractional_step_when_advanced_then_delay_is_floored() {
    // GIVEN: initial 2s, step 1.5
    let config = BackoffConfig {
        initial_delay_secs: 2,
        step: 1.5,
        max_delay_secs: 90,
        max_retries: 10,
    };
    let mut state = BackoffState::initial(&config);
    let mut delays = Vec::new();

    // WHEN: Four pure transitions
    for _ in 0..4 {
        let (next, decision) = advance(state, &config);
        delays.push(delay_of(decision));
        state = next;
    }

    // THEN: 2, 3, floor(4.5)=4, 6
    assert_eq!(delays, vec![2, 3, 4, 6]);
}

/// **VALUE**: Verifies the `backoff::backoff::Backoff` adapter.
///
/// **WHY THIS MATTERS**: Code written against the `backoff` crate drives policies with
/// `next_backoff()` until `None`; ours must follow the same contract.
///
/// **BUG THIS CATCHES**: Would catch the adapter returning `Some` after exhaustion or
/// `reset()` not clearing the retry count.
#[test]
fn given_backoff_trait_when_driven_to_exhaustion_then_returns_none_until_reset() {
    // GIVEN: Two retries allowed
    let mut policy = BackoffPolicy::new(config(2));

    // WHEN / THEN: Two delays, then None
    assert_eq!(policy.next_backoff(), Some(Duration::from_secs(1)));
    assert_eq!(policy.next_backoff(), Some(Duration::from_secs(2)));
    assert_eq!(policy.next_backoff(), None);

    // WHEN: Reset through the trait
    Backoff::reset(&mut policy);

    // THEN: Sequence starts again
    assert_eq!(policy.next_backoff(), Some(Duration::from_secs(1)));
}

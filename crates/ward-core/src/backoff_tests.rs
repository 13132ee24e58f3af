use super::*;
use crate::clock::FakeClock;
use yare::parameterized;

fn policy() -> BackoffPolicy {
    BackoffPolicy {
        base: Duration::from_millis(500),
        factor: 2.0,
        max: Duration::from_secs(30),
        jitter: Duration::from_millis(400),
        reset_after_ok: Duration::from_secs(60),
        window: Duration::from_secs(300),
        max_restarts_in_window: 3,
    }
}

#[test]
fn first_delay_uses_attempt_one() {
    let mut state = BackoffState::new(policy());
    let clock = FakeClock::new();
    state.register_start(&clock);
    assert_eq!(state.attempt(), 1);
    // zero jitter sample maps to the minimum of the jitter range, never negative
    let delay = state.next_delay_with_jitter(0.0);
    assert!(delay <= Duration::from_millis(500));
}

#[test]
fn delay_grows_exponentially_and_clamps_to_max() {
    let mut state = BackoffState::new(policy());
    let clock = FakeClock::new();
    for _ in 0..10 {
        state.register_start(&clock);
    }
    // midpoint jitter sample (0.5) contributes zero offset
    let delay = state.next_delay_with_jitter(0.5);
    assert_eq!(delay, Duration::from_secs(30));
}

#[parameterized(
    zero = { 0.0 },
    midpoint = { 0.5 },
    one = { 1.0 },
)]
fn jitter_never_goes_negative(sample: f64) {
    let mut state = BackoffState::new(policy());
    let clock = FakeClock::new();
    state.register_start(&clock);
    let delay = state.next_delay_with_jitter(sample);
    assert!(delay >= Duration::ZERO);
}

#[test]
fn reset_after_good_uptime_clears_attempt_but_not_history() {
    let mut state = BackoffState::new(policy());
    let clock = FakeClock::new();
    state.register_start(&clock);
    state.register_start(&clock);
    assert_eq!(state.attempt(), 2);
    state.reset_if_uptime_good(Duration::from_secs(60));
    assert_eq!(state.attempt(), 0);
    assert_eq!(state.recent_starts.len(), 2);
}

#[test]
fn short_uptime_does_not_reset() {
    let mut state = BackoffState::new(policy());
    let clock = FakeClock::new();
    state.register_start(&clock);
    state.reset_if_uptime_good(Duration::from_secs(1));
    assert_eq!(state.attempt(), 1);
}

#[test]
fn breaker_trips_after_window_exceeded() {
    let mut state = BackoffState::new(policy());
    let clock = FakeClock::new();
    for _ in 0..3 {
        state.register_start(&clock);
    }
    assert!(!state.too_many_restarts());
    state.register_start(&clock);
    assert!(state.too_many_restarts());
}

#[test]
fn old_starts_fall_out_of_the_rolling_window() {
    let mut state = BackoffState::new(policy());
    let clock = FakeClock::new();
    for _ in 0..3 {
        state.register_start(&clock);
    }
    clock.advance(Duration::from_secs(301));
    state.register_start(&clock);
    assert!(!state.too_many_restarts());
}

proptest::proptest! {
    /// Delay is always within `[0, max + jitter]` regardless of how many
    /// attempts have accumulated or which jitter sample lands.
    #[test]
    fn delay_with_jitter_stays_within_max_plus_jitter(
        attempts in 1u32..64,
        jitter_sample in 0.0f64..1.0,
    ) {
        let mut state = BackoffState::new(policy());
        let clock = FakeClock::new();
        for _ in 0..attempts {
            state.register_start(&clock);
        }
        let delay = state.next_delay_with_jitter(jitter_sample);
        proptest::prop_assert!(delay >= Duration::ZERO);
        proptest::prop_assert!(delay <= policy().max + policy().jitter);
    }
}

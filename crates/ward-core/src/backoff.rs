// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exponential backoff with jitter and a rolling-window restart breaker.

use crate::clock::Clock;
use std::time::{Duration, Instant};

/// Immutable per-node backoff knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffPolicy {
    pub base: Duration,
    pub factor: f64,
    pub max: Duration,
    pub jitter: Duration,
    pub reset_after_ok: Duration,
    pub window: Duration,
    pub max_restarts_in_window: usize,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(500),
            factor: 2.0,
            max: Duration::from_secs(30),
            jitter: Duration::from_millis(400),
            reset_after_ok: Duration::from_secs(60),
            window: Duration::from_secs(300),
            max_restarts_in_window: 20,
        }
    }
}

/// Mutable per-node restart bookkeeping. Owned exclusively by that node's
/// supervision task; never touched concurrently.
pub struct BackoffState {
    policy: BackoffPolicy,
    attempt: u32,
    recent_starts: Vec<Instant>,
}

impl BackoffState {
    pub fn new(policy: BackoffPolicy) -> Self {
        Self { policy, attempt: 0, recent_starts: Vec::new() }
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Record a start attempt: evict entries older than the rolling window
    /// and increment the attempt counter. Call once per start, including
    /// the very first.
    pub fn register_start(&mut self, clock: &impl Clock) {
        let now = clock.now();
        self.recent_starts.retain(|t| now.saturating_duration_since(*t) <= self.policy.window);
        self.recent_starts.push(now);
        self.attempt += 1;
    }

    /// Reset the attempt counter once the node has stayed up long enough
    /// to be considered healthy. Does not clear the restart-window history.
    pub fn reset_if_uptime_good(&mut self, uptime: Duration) {
        if uptime >= self.policy.reset_after_ok {
            self.attempt = 0;
        }
    }

    /// True once the rolling window has seen more restarts than the policy
    /// tolerates — the breaker has tripped and the caller should give up.
    pub fn too_many_restarts(&self) -> bool {
        self.recent_starts.len() > self.policy.max_restarts_in_window
    }

    /// Delay before the next start attempt, sampling jitter from the
    /// process-wide RNG.
    pub fn next_delay(&self) -> Duration {
        self.next_delay_with_jitter(rand::random::<f64>())
    }

    /// Delay before the next start, including jitter, clamped to `[0, max]`
    /// before jitter and never negative after it. `jitter_sample` is a
    /// uniform `[0, 1)` draw, exposed so tests can pin the jitter exactly.
    pub fn next_delay_with_jitter(&self, jitter_sample: f64) -> Duration {
        let exp = self.policy.factor.powi(self.attempt.saturating_sub(1) as i32);
        let raw = self.policy.base.mul_f64(exp).min(self.policy.max);
        let jitter_range = self.policy.jitter.as_secs_f64();
        let offset = (jitter_sample * 2.0 - 1.0) * jitter_range;
        let total = (raw.as_secs_f64() + offset).max(0.0);
        Duration::from_secs_f64(total)
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot latches used throughout the supervisor: per-node readiness,
//! and the process-wide shutdown trigger.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Clone, Default)]
struct Latch {
    set: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl Latch {
    fn set(&self) {
        self.set.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    fn clear(&self) {
        self.set.store(false, Ordering::SeqCst);
    }

    fn is_set(&self) -> bool {
        self.set.load(Ordering::SeqCst)
    }

    async fn wait(&self) {
        loop {
            if self.is_set() {
                return;
            }
            let notified = self.notify.notified();
            if self.is_set() {
                return;
            }
            notified.await;
        }
    }

    /// Resolve on the next `set`/`clear` transition, whichever comes first.
    /// Unlike `wait`, this does not care which way the latch moved — it's
    /// for callers that want to re-evaluate a condition spanning several
    /// latches rather than wait on one of them reaching a specific state.
    ///
    /// Deliberately *not* an `async fn`: the registration with `Notify` has
    /// to happen synchronously, right here, before this returns — an async
    /// fn's body doesn't start running until its returned future is first
    /// polled, which for a caller collecting several of these into a
    /// `select_all` could be arbitrarily later, leaving a window where a
    /// `notify_waiters()` on another thread wakes no one and is lost for
    /// good (there's no state flag here like `is_set` to fall back on).
    fn changed(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        let mut notified = Box::pin(self.notify.notified());
        notified.as_mut().enable();
        notified
    }
}

/// Per-node readiness: `cleared -> set -> cleared -> set -> ...`. Set by a
/// successful `mark_ready`; cleared on the node's own exit or on a cascade
/// stop triggered by a parent going away.
#[derive(Clone, Default)]
pub struct ReadyEvent(Latch);

impl ReadyEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.0.set();
    }

    pub fn clear(&self) {
        self.0.clear();
    }

    pub fn is_set(&self) -> bool {
        self.0.is_set()
    }

    pub async fn wait(&self) {
        self.0.wait().await;
    }

    /// Resolve on the next set-or-clear transition, for callers (the
    /// supervisor's parent-readiness wait) that need to re-evaluate a
    /// condition over several nodes' latches rather than block on one.
    /// Registers with the underlying `Notify` synchronously, before
    /// returning, so a caller building a batch of these to `select_all`
    /// over can't lose a wakeup that fires before the batch is polled.
    pub fn changed(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        self.0.changed()
    }
}

/// Process-wide, set-once-and-stays-set shutdown trigger.
#[derive(Clone, Default)]
pub struct ShutdownEvent(Latch);

impl ShutdownEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger shutdown. Idempotent: calling it again is a no-op.
    pub fn trigger(&self) {
        self.0.set();
    }

    pub fn is_triggered(&self) -> bool {
        self.0.is_set()
    }

    pub async fn wait(&self) {
        self.0.wait().await;
    }
}

/// Per-run, set-once latch a service node's worker task watches to know
/// when to wind down. Recreated on every `start`; distinct from the
/// process-wide [`ShutdownEvent`] even though it shares the same shape.
#[derive(Clone, Default)]
pub struct StopSignal(Latch);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.set();
    }

    pub fn is_triggered(&self) -> bool {
        self.0.is_set()
    }

    pub async fn wait(&self) {
        self.0.wait().await;
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;

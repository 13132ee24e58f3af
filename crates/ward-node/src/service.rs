// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service-backed node: owns a long-running in-process worker task instead
//! of an OS child process. The worker is handed the same [`ReadyEvent`]
//! the supervisor waits on, and a private [`StopSignal`] it watches to
//! know when to wind down.

use crate::events::{ReadyEvent, ShutdownEvent, StopSignal};
use crate::node::{BoxFuture, Node, NodeHandle};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use ward_core::{ControlMessage, Outcome};

/// The worker body: one-time setup, then useful work until `stop` fires,
/// then release resources and return an optional exit code.
pub type WorkerFn = Arc<dyn Fn(StopSignal, ReadyEvent) -> BoxFuture<'static, Option<i32>> + Send + Sync>;

/// How a service node handles an incoming control message. Given its own
/// `&self`-free nature, state a concrete service needs (pending-reply map,
/// a handle to its own data) is expected to be captured by the closure.
pub type ReceiveFn = Arc<dyn Fn(&ControlMessage) -> BoxFuture<'static, Outcome> + Send + Sync>;

pub type HealthProbe = Arc<dyn Fn() -> BoxFuture<'static, Outcome> + Send + Sync>;

struct Running {
    task: JoinHandle<Option<i32>>,
    // The worker's own ready latch, private to this run — distinct from the
    // `ReadyEvent` the supervisor passes into `mark_ready`, which is the one
    // `wait_parents_ready` actually watches. `mark_ready` waits on this one
    // and then sets that one, so the supervisor only ever learns the worker
    // is ready after it actually is.
    worker_ready: ReadyEvent,
}

/// Concrete [`Node`] wrapping an in-process worker loop.
pub struct ServiceNode {
    name: String,
    run: WorkerFn,
    receive: Option<ReceiveFn>,
    health_probe: Option<HealthProbe>,
    ready_timeout: Duration,
    stop_timeout: Duration,
    health_interval: Duration,
    health_fail_threshold: u32,
    // Cheap, never held across an await: lets `stop()` signal the worker
    // even while `wait_or_shutdown` owns the `Running` (and its `JoinHandle`)
    // outright for the duration of its wait.
    signal: parking_lot::Mutex<Option<StopSignal>>,
    running: tokio::sync::Mutex<Option<Running>>,
}

impl ServiceNode {
    pub fn new(name: impl Into<String>, run: WorkerFn) -> Self {
        Self {
            name: name.into(),
            run,
            receive: None,
            health_probe: None,
            ready_timeout: Duration::from_secs(20),
            stop_timeout: Duration::from_secs(15),
            health_interval: Duration::ZERO,
            health_fail_threshold: 3,
            signal: parking_lot::Mutex::new(None),
            running: tokio::sync::Mutex::new(None),
        }
    }

    pub fn with_receive(mut self, receive: ReceiveFn) -> Self {
        self.receive = Some(receive);
        self
    }

    pub fn with_health_probe(mut self, probe: HealthProbe) -> Self {
        self.health_probe = Some(probe);
        self
    }

    pub fn with_ready_timeout(mut self, d: Duration) -> Self {
        self.ready_timeout = d;
        self
    }

    pub fn with_stop_timeout(mut self, d: Duration) -> Self {
        self.stop_timeout = d;
        self
    }

    pub fn with_health_interval(mut self, d: Duration) -> Self {
        self.health_interval = d;
        self
    }

    pub fn with_health_fail_threshold(mut self, n: u32) -> Self {
        self.health_fail_threshold = n;
        self
    }

    /// Signal already triggered by the caller; wait out the worker's own
    /// wind-down, escalating to `abort` past `stop_timeout`.
    async fn finish_stop(&self, mut running: Running, _handle: &NodeHandle, reason: &str) {
        if let Some(stop) = self.signal.lock().as_ref() {
            stop.trigger();
        }
        if tokio::time::timeout(self.stop_timeout, &mut running.task).await.is_err() {
            tracing::warn!(node = %self.name, reason, "service.stop_timeout_aborting");
            running.task.abort();
            let _ = running.task.await;
        }
        self.signal.lock().take();
        tracing::info!(node = %self.name, reason, "service.stopped");
    }
}

#[async_trait]
impl Node for ServiceNode {
    async fn start(&self) -> Option<NodeHandle> {
        let stop = StopSignal::new();
        // The worker gets its own, private ready latch to set once its
        // one-time setup completes; `mark_ready` below waits on this one
        // and only then sets the supervisor's external latch.
        let worker_ready = ReadyEvent::new();
        let task = tokio::spawn((self.run)(stop.clone(), worker_ready.clone()));
        *self.signal.lock() = Some(stop);
        *self.running.lock().await = Some(Running { task, worker_ready });
        tracing::info!(node = %self.name, "service.started");
        Some(NodeHandle::new(Instant::now(), None))
    }

    async fn mark_ready(&self, _handle: &NodeHandle, ready: &ReadyEvent) -> Outcome {
        // Wait for the worker's own latch, then propagate readiness to the
        // supervisor's external one (bounded by the caller's ready_timeout
        // wrapper around this call).
        let worker_ready = self.running.lock().await.as_ref().map(|r| r.worker_ready.clone());
        match worker_ready {
            Some(worker_ready) => worker_ready.wait().await,
            None => return Ok("no longer running".to_string()),
        }
        ready.set();
        Ok("ready".to_string())
    }

    async fn check(&self, _handle: &NodeHandle) -> Outcome {
        match &self.health_probe {
            Some(probe) => probe().await,
            None => Ok("healthy".to_string()),
        }
    }

    async fn receive(&self, _ready: &ReadyEvent, message: &ControlMessage) -> Outcome {
        match &self.receive {
            Some(f) => f(message).await,
            None => Ok("ignored".to_string()),
        }
    }

    async fn wait_or_shutdown(&self, handle: &NodeHandle, shutdown: &ShutdownEvent) -> Option<i32> {
        // Take exclusive ownership of the JoinHandle for this wait so a
        // concurrent `stop()` (health watchdog) is never blocked on us for
        // longer than it takes to trigger the cheap `signal` mutex.
        let running = self.running.lock().await.take();
        let Some(mut running) = running else { return None };
        tokio::select! {
            result = &mut running.task => {
                self.signal.lock().take();
                match result {
                    Ok(code) => code,
                    Err(err) => {
                        tracing::warn!(node = %self.name, error = %err, "service.task_panicked");
                        None
                    }
                }
            }
            _ = shutdown.wait() => {
                self.finish_stop(running, handle, "shutdown").await;
                None
            }
        }
    }

    async fn stop(&self, handle: &NodeHandle, reason: &str) {
        // Always cheap to trigger, even if `wait_or_shutdown` currently owns
        // the `Running`/`JoinHandle` outright — this is what makes that
        // in-flight wait resolve.
        if let Some(stop) = self.signal.lock().as_ref() {
            stop.trigger();
        }
        if let Some(running) = self.running.lock().await.take() {
            self.finish_stop(running, handle, reason).await;
        } else {
            tracing::debug!(node = %self.name, reason, "service.stop_signal_only");
        }
    }

    fn ready_timeout(&self) -> Duration {
        self.ready_timeout
    }

    fn stop_timeout(&self) -> Duration {
        self.stop_timeout
    }

    fn health_interval(&self) -> Duration {
        self.health_interval
    }

    fn health_fail_threshold(&self) -> u32 {
        self.health_fail_threshold
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;

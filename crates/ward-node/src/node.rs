// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The uniform lifecycle every supervised node implements. The supervisor
//! only ever calls through this trait — it never reaches into a concrete
//! node's internals.

use crate::events::{ReadyEvent, ShutdownEvent};
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};
use ward_core::{BackoffPolicy, ControlMessage, Outcome};

/// A boxed, owned future, for trait objects that hand back async work
/// (readiness/health probes, service worker bodies) without naming a
/// concrete future type.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Opaque token identifying one run of a node. Owned by the supervisor
/// from the moment `start` returns it until `stop` finishes; the node
/// itself keeps the real resources (child process, worker task) behind
/// interior mutability rather than inside this struct, since a single
/// `&self` node instance is restarted many times over its supervised
/// lifetime.
#[derive(Debug, Clone, Copy)]
pub struct NodeHandle {
    pub started_at: Instant,
    /// `None` for service nodes; `Some(pid)` for process nodes.
    pub pid: Option<u32>,
}

impl NodeHandle {
    pub fn new(started_at: Instant, pid: Option<u32>) -> Self {
        Self { started_at, pid }
    }

    pub fn uptime(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }
}

/// The capability set a supervised unit must expose. Two concrete shapes
/// exist today — [`crate::process::ProcessNode`] and
/// [`crate::service::ServiceNode`] — and more can be added without the
/// supervisor changing at all.
#[async_trait]
pub trait Node: Send + Sync + 'static {
    /// Begin one run. `None` signals a fatal start failure (for example a
    /// missing executable); the supervisor treats that as cause for
    /// global shutdown rather than a retryable failure.
    async fn start(&self) -> Option<NodeHandle>;

    /// Probe (or simply declare) readiness and set `ready` on success.
    /// Bounded by [`Node::ready_timeout`] by the caller.
    async fn mark_ready(&self, handle: &NodeHandle, ready: &ReadyEvent) -> Outcome;

    /// A single health probe while the node is ready.
    async fn check(&self, handle: &NodeHandle) -> Outcome;

    /// Handle one control-bus message addressed to this node. Exceptions
    /// must not escape this call; the supervisor isolates it regardless,
    /// but a well-behaved node reports failure through the returned
    /// `Outcome` rather than panicking.
    async fn receive(&self, ready: &ReadyEvent, message: &ControlMessage) -> Outcome;

    /// Block until the node exits on its own, or until `shutdown` fires —
    /// whichever comes first. On shutdown this must itself call `stop`
    /// before returning, the same as any other exit path.
    async fn wait_or_shutdown(&self, handle: &NodeHandle, shutdown: &ShutdownEvent) -> Option<i32>;

    /// Idempotent graceful-then-forceful stop. Must return once resources
    /// are released, within `stop_timeout + kill_timeout`.
    async fn stop(&self, handle: &NodeHandle, reason: &str);

    fn ready_timeout(&self) -> Duration {
        Duration::from_secs(20)
    }

    fn stop_timeout(&self) -> Duration {
        Duration::from_secs(15)
    }

    fn kill_timeout(&self) -> Duration {
        Duration::from_secs(5)
    }

    /// `Duration::ZERO` disables the health watchdog for this node.
    fn health_interval(&self) -> Duration {
        Duration::ZERO
    }

    fn health_fail_threshold(&self) -> u32 {
        3
    }

    /// Restart backoff policy for this node. Each node owns its own
    /// [`BackoffState`](ward_core::BackoffState), seeded from this policy,
    /// so one chatty dependency's restarts don't skew another node's.
    fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy::default()
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;

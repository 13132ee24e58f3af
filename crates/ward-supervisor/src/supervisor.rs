// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The public entry point: validate a graph, run it, and report why it
//! stopped. Everything else in this crate is plumbing `Supervisor` wires
//! together.

use crate::descriptor::NodeDescriptor;
use crate::error::ConstructionError;
use crate::exit::ShutdownReason;
use crate::loop_ as node_loop;
use crate::runtime::SharedRuntime;
use crate::signal;
use crate::snapshot::{HealthSnapshot, NodeSnapshot};
use crate::toposort::toposort;
use crate::dispatch;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use ward_bus::ControlBusReceiver;
use ward_core::{Clock, NodeId, SystemClock};

/// A validated, constructed-but-not-yet-running dependency graph. Building
/// one validates every descriptor (duplicate ids, unknown parents, cycles)
/// up front, so a [`ConstructionError`] always means nothing has started.
pub struct Supervisor<C: Clock = SystemClock> {
    runtime: Arc<SharedRuntime<C>>,
    bus_rx: Mutex<Option<ControlBusReceiver>>,
}

/// How long a node task is given to notice shutdown and wind itself down
/// before the final sweep forcibly stops it and moves on. Generous
/// relative to any single node's `stop_timeout + kill_timeout`.
const NODE_TASK_JOIN_TIMEOUT: Duration = Duration::from_secs(120);

impl Supervisor<SystemClock> {
    /// Validate `descriptors` and build a runnable supervisor using the
    /// real system clock. `bus_rx` is the consumer half of the
    /// [`ward_bus::ControlBus`] whose producer handle callers hand to
    /// nodes at construction time.
    pub fn new(descriptors: Vec<NodeDescriptor>, bus_rx: ControlBusReceiver) -> Result<Self, ConstructionError> {
        Self::with_clock(descriptors, bus_rx, SystemClock)
    }
}

impl<C: Clock> Supervisor<C> {
    pub fn with_clock(descriptors: Vec<NodeDescriptor>, bus_rx: ControlBusReceiver, clock: C) -> Result<Self, ConstructionError> {
        let order = toposort(&descriptors)?;
        let map: BTreeMap<NodeId, NodeDescriptor> = descriptors.into_iter().map(|d| (d.id, d)).collect();
        let runtime = Arc::new(SharedRuntime::new(order, map, clock));
        Ok(Self { runtime, bus_rx: Mutex::new(Some(bus_rx)) })
    }

    pub fn run_id(&self) -> Uuid {
        self.runtime.run_id
    }

    /// Request shutdown from outside the run (an embedding binary's admin
    /// endpoint, or a test). Equivalent to an OS termination signal except
    /// for the [`ShutdownReason`] it's recorded under.
    pub fn shutdown(&self) {
        self.runtime.trigger_shutdown(ShutdownReason::Requested);
    }

    /// Point-in-time view of every node's run state.
    pub fn snapshot(&self) -> HealthSnapshot {
        let nodes = self
            .runtime
            .order
            .iter()
            .map(|id| {
                let handle = self.runtime.handle_of(*id);
                let descriptor = &self.runtime.descriptors[id];
                let snapshot = NodeSnapshot {
                    name: id.to_string(),
                    running: handle.is_some(),
                    ready: self.runtime.ready[id].is_set(),
                    pid: handle.and_then(|h| h.pid),
                    uptime_seconds: handle.map(|h| h.uptime(self.runtime.clock.now()).as_secs_f64()).unwrap_or(0.0),
                    parents: descriptor.parents.iter().copied().collect(),
                };
                (*id, snapshot)
            })
            .collect();
        HealthSnapshot { run_id: self.runtime.run_id, shutdown: self.runtime.shutdown.is_triggered(), nodes }
    }

    /// Run the whole graph until shutdown, then return why it stopped.
    /// Spawns one supervision task per node plus the control dispatch
    /// loop, installs the OS signal handlers, and — once every node task
    /// has wound down or timed out — sweeps the graph in reverse
    /// topological order as a final defensive stop.
    ///
    /// May only be called once per `Supervisor`; a second call panics,
    /// since the bus receiver is consumed by the first.
    pub async fn execute(&self) -> ShutdownReason {
        #[allow(clippy::expect_used)]
        let bus_rx = self.bus_rx.lock().take().expect("Supervisor::execute called more than once");

        signal::install(self.runtime.clone());

        let node_tasks: Vec<(NodeId, tokio::task::JoinHandle<()>)> = self
            .runtime
            .order
            .iter()
            .map(|id| {
                let id = *id;
                let runtime = self.runtime.clone();
                (id, tokio::spawn(node_loop::run(id, runtime)))
            })
            .collect();

        let dispatch_task = tokio::spawn(dispatch::run(bus_rx, self.runtime.clone()));

        self.runtime.shutdown.wait().await;
        tracing::info!(reason = %self.runtime.shutdown_reason(), "supervisor.shutdown_triggered");

        for (id, task) in node_tasks {
            let abort = task.abort_handle();
            if tokio::time::timeout(NODE_TASK_JOIN_TIMEOUT, task).await.is_err() {
                tracing::warn!(node = %id, "supervisor.node_task_join_timeout");
                abort.abort();
            }
        }

        // Defensive: a node loop is expected to stop itself and its
        // children before its task returns, but a final reverse-order
        // sweep covers anything left holding a handle (e.g. a task that
        // was aborted above).
        for id in self.runtime.order.iter().rev() {
            node_loop::stop_node(&self.runtime, *id, "shutdown_sweep").await;
        }

        dispatch_task.abort();
        let _ = dispatch_task.await;

        self.runtime.shutdown_reason()
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;

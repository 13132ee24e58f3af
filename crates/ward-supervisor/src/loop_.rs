// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-node supervision loop (§4.6): wait for parents, start, mark
//! ready, watch, exit, cascade-stop dependents, stop, backoff, repeat.

use crate::exit::ShutdownReason;
use crate::runtime::SharedRuntime;
use crate::watchdog;
use futures_util::future::select_all;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use ward_core::{BackoffState, Clock, NodeId};
use ward_node::ReadyEvent;

pub async fn run<C: Clock>(id: NodeId, runtime: Arc<SharedRuntime<C>>) {
    let descriptor = runtime.descriptors[&id].clone();
    if descriptor.disabled {
        tracing::info!(node = %id, "proc.disabled");
        runtime.shutdown.wait().await;
        return;
    }

    let node = descriptor.runnable.clone();
    let ready = runtime.ready[&id].clone();
    let parents = runtime.parents_of(id);
    let mut backoff = BackoffState::new(node.backoff_policy());

    loop {
        if !wait_parents_ready(&parents, &runtime.shutdown).await {
            return;
        }

        backoff.register_start(&runtime.clock);
        let Some(handle) = node.start().await else {
            tracing::error!(node = %id, "proc.start_failed");
            runtime.trigger_shutdown(ShutdownReason::StartFailure(id));
            return;
        };
        runtime.set_handle(id, Some(handle));

        match tokio::time::timeout(node.ready_timeout(), node.mark_ready(&handle, &ready)).await {
            Ok(Ok(detail)) => tracing::info!(node = %id, detail, "proc.ready"),
            Ok(Err(err)) => tracing::warn!(node = %id, error = %err, "proc.ready_failed"),
            Err(_) => tracing::warn!(node = %id, "proc.ready_timeout"),
        }

        let watchdog_task = (node.health_interval() > Duration::ZERO && ready.is_set()).then(|| {
            tokio::spawn(watchdog::watch(id, node.clone(), handle, ready.clone(), runtime.shutdown.clone()))
        });

        let exit_code = node.wait_or_shutdown(&handle, &runtime.shutdown).await;
        ready.clear();
        tracing::info!(node = %id, ?exit_code, "proc.exit");

        for child in runtime.children_of(id) {
            stop_node(&runtime, child, &format!("{id}_down")).await;
        }

        if let Some(task) = watchdog_task {
            task.abort();
        }
        node.stop(&handle, "exit").await;
        runtime.set_handle(id, None);

        backoff.reset_if_uptime_good(handle.uptime(runtime.clock.now()));

        if runtime.shutdown.is_triggered() {
            return;
        }
        if backoff.too_many_restarts() {
            tracing::error!(node = %id, "proc.giveup");
            runtime.trigger_shutdown(ShutdownReason::BreakerTrip(id));
            return;
        }
        tokio::time::sleep(backoff.next_delay()).await;
    }
}

/// Clear a node's ready latch and, if it's currently running, stop it —
/// used both for a parent-failure cascade and the final shutdown sweep.
/// Clearing the latch first sends the node's own loop back into
/// `wait_parents_ready` once it finishes unwinding from this stop.
pub async fn stop_node<C: Clock>(runtime: &Arc<SharedRuntime<C>>, id: NodeId, reason: &str) {
    runtime.ready[&id].clear();
    if let Some(handle) = runtime.handle_of(id) {
        runtime.descriptors[&id].runnable.stop(&handle, reason).await;
    }
}

/// Block until every parent's ready latch is set, or shutdown fires.
/// Re-evaluates from scratch on every latch transition rather than
/// trusting a single pass, since a parent can flap (set, then clear)
/// while we're waiting on a sibling.
async fn wait_parents_ready(parents: &[ReadyEvent], shutdown: &ward_node::ShutdownEvent) -> bool {
    loop {
        if shutdown.is_triggered() {
            return false;
        }
        if parents.iter().all(ReadyEvent::is_set) {
            return true;
        }
        let not_ready: Vec<Pin<Box<dyn std::future::Future<Output = ()> + Send + '_>>> =
            parents.iter().filter(|p| !p.is_set()).map(ReadyEvent::changed).collect();
        if not_ready.is_empty() {
            continue;
        }
        tokio::select! {
            _ = shutdown.wait() => return false,
            _ = select_all(not_ready) => continue,
        }
    }
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-node health watchdog: while a node is live, probe it on an
//! interval and stop it once consecutive failures cross its threshold.

use std::sync::Arc;
use ward_core::NodeId;
use ward_node::{Node, NodeHandle, ReadyEvent, ShutdownEvent};

/// Runs until the node loses readiness, shutdown fires, or the health
/// probe fails `health_fail_threshold` times in a row — at which point it
/// calls `stop(reason="healthcheck_failed")` and returns. The owning
/// per-node loop is expected to abort this task once its own
/// `wait_or_shutdown` resolves, so it never outlives the run it watches.
pub async fn watch(id: NodeId, node: Arc<dyn Node>, handle: NodeHandle, ready: ReadyEvent, shutdown: ShutdownEvent) {
    let interval = node.health_interval();
    if interval.is_zero() {
        return;
    }
    let threshold = node.health_fail_threshold();
    let mut consecutive_failures = 0u32;

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shutdown.wait() => return,
            _ = ready.changed() => if !ready.is_set() { return },
        }
        if !ready.is_set() {
            return;
        }

        match node.check(&handle).await {
            Ok(_) => consecutive_failures = 0,
            Err(err) => {
                consecutive_failures += 1;
                tracing::warn!(node = %id, error = %err, consecutive_failures, threshold, "health.fail");
                if consecutive_failures >= threshold {
                    tracing::warn!(node = %id, "health.fail_threshold_reached");
                    node.stop(&handle, "healthcheck_failed").await;
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "watchdog_tests.rs"]
mod tests;

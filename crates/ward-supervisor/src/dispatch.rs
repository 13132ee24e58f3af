// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The control bus dispatch loop: one message at a time, routed to its
//! destination node's `receive`, with every failure mode (malformed
//! message, unknown destination, a panicking handler) isolated so it
//! never takes down the supervisor or blocks another node's traffic
//! beyond the scope of the one message being handled.

use crate::exit::ShutdownReason;
use crate::runtime::SharedRuntime;
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use ward_bus::{ControlBusReceiver, RecvError};
use ward_core::{Clock, ControlMessage};

pub async fn run<C: Clock>(mut rx: ControlBusReceiver, runtime: Arc<SharedRuntime<C>>) {
    loop {
        tokio::select! {
            _ = runtime.shutdown.wait() => return,
            received = rx.receive() => {
                match received {
                    Ok(message) => dispatch_one(&runtime, &message).await,
                    Err(RecvError::Closed) => {
                        tracing::error!("control.bus_closed");
                        runtime.trigger_shutdown(ShutdownReason::BusClosed);
                        return;
                    }
                }
            }
        }
    }
}

async fn dispatch_one<C: Clock>(runtime: &Arc<SharedRuntime<C>>, message: &ControlMessage) {
    let Some(node_id) = message.node else {
        tracing::warn!(action = ?message.action, "control.malformed_message_dropped");
        return;
    };
    let (Some(descriptor), Some(ready)) = (runtime.descriptors.get(&node_id), runtime.ready.get(&node_id))
    else {
        tracing::warn!(node = %node_id, action = ?message.action, "control.unknown_node_dropped");
        return;
    };

    let outcome =
        AssertUnwindSafe(descriptor.runnable.receive(ready, message)).catch_unwind().await;
    match outcome {
        Ok(Ok(detail)) => {
            tracing::debug!(node = %node_id, action = ?message.action, correlation_id = %message.correlation_id, detail, "control.dispatched")
        }
        Ok(Err(err)) => {
            tracing::warn!(node = %node_id, action = ?message.action, correlation_id = %message.correlation_id, error = %err, "control.receive_error")
        }
        Err(_) => {
            tracing::error!(node = %node_id, action = ?message.action, correlation_id = %message.correlation_id, "control.receive_panicked")
        }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Translate OS termination signals into the single process-wide shutdown
//! trigger. Platforms that don't let us attach handlers degrade silently —
//! the supervisor still shuts down cleanly on an explicit `shutdown()`.

use crate::exit::ShutdownReason;
use crate::runtime::SharedRuntime;
use std::sync::Arc;
use ward_core::Clock;

/// Spawn a task that triggers shutdown (recorded as [`ShutdownReason::Signal`])
/// on SIGTERM or SIGINT (or, on Windows, Ctrl-C). Returns immediately; the
/// returned task runs for the lifetime of the process.
pub fn install<C: Clock>(runtime: Arc<SharedRuntime<C>>) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        for kind in [SignalKind::terminate(), SignalKind::interrupt()] {
            match signal(kind) {
                Ok(mut stream) => {
                    let runtime = runtime.clone();
                    tokio::spawn(async move {
                        stream.recv().await;
                        tracing::info!("signal.received");
                        runtime.trigger_shutdown(ShutdownReason::Signal);
                    });
                }
                Err(err) => {
                    tracing::warn!(error = %err, "signal.install_failed");
                }
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("signal.received");
                runtime.trigger_shutdown(ShutdownReason::Signal);
            }
        });
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;

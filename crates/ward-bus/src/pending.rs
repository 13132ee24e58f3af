// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Correlates outgoing requests with their eventual reply, for the nodes
//! that use the bus as a request/response transport.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use uuid::Uuid;
use ward_core::PayloadEnvelope;

#[derive(Debug, thiserror::Error)]
pub enum PendingReplyError {
    #[error("no reply received for correlation id {0} within the deadline")]
    TimedOut(Uuid),
    #[error("pending reply for correlation id {0} was cancelled")]
    Cancelled(Uuid),
}

/// Per-node map from correlation id to a single-resolution reply slot. A
/// response with an unknown or already-resolved id is logged and dropped
/// by the caller, never by this map — it only ever holds slots someone is
/// still waiting on.
#[derive(Clone, Default)]
pub struct PendingReplyMap {
    inner: Arc<Mutex<HashMap<Uuid, oneshot::Sender<PayloadEnvelope>>>>,
}

impl PendingReplyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh correlation id before sending the request, and
    /// await its reply with a timeout. Removes the slot on resolution,
    /// timeout, or cancellation so the map never grows unbounded.
    pub async fn wait_for(&self, correlation_id: Uuid, timeout: Duration) -> Result<PayloadEnvelope, PendingReplyError> {
        let (tx, rx) = oneshot::channel();
        self.inner.lock().insert(correlation_id, tx);
        let result = tokio::time::timeout(timeout, rx).await;
        self.inner.lock().remove(&correlation_id);
        match result {
            Ok(Ok(envelope)) => Ok(envelope),
            Ok(Err(_)) => Err(PendingReplyError::Cancelled(correlation_id)),
            Err(_) => Err(PendingReplyError::TimedOut(correlation_id)),
        }
    }

    /// Resolve a pending reply. Returns `true` if a waiter was found and
    /// woken; `false` for an unknown or already-resolved id, which the
    /// caller should log as a duplicate/late response and drop.
    pub fn resolve(&self, correlation_id: Uuid, envelope: PayloadEnvelope) -> bool {
        match self.inner.lock().remove(&correlation_id) {
            Some(tx) => tx.send(envelope).is_ok(),
            None => false,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.inner.lock().len()
    }
}

#[cfg(test)]
#[path = "pending_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The envelope wrapping opaque node-to-node payloads, and the control
//! message that carries one across the bus.

use crate::action::ControlAction;
use crate::node_id::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Versioned wrapper around an opaque payload. The supervisor never reads
/// `kind` or `data`; only concrete nodes agree on their meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadEnvelope {
    pub version: u32,
    pub kind: String,
    pub data: serde_json::Value,
}

impl PayloadEnvelope {
    pub fn new(version: u32, kind: impl Into<String>, data: serde_json::Value) -> Self {
        Self { version, kind: kind.into(), data }
    }
}

/// One message on the control bus.
///
/// `node` is the destination; a `None` destination is malformed and is
/// dropped by the supervisor's dispatch loop rather than delivered anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlMessage {
    pub action: ControlAction,
    pub node: Option<NodeId>,
    pub payload: Option<PayloadEnvelope>,
    pub correlation_id: Uuid,
}

impl ControlMessage {
    /// Build a fresh message with a new correlation id.
    pub fn new(action: ControlAction, node: Option<NodeId>, payload: Option<PayloadEnvelope>) -> Self {
        Self { action, node, payload, correlation_id: Uuid::new_v4() }
    }

    /// Build a reply echoing the request's correlation id.
    pub fn reply_to(request: &ControlMessage, action: ControlAction, node: Option<NodeId>, payload: Option<PayloadEnvelope>) -> Self {
        Self { action, node, payload, correlation_id: request.correlation_id }
    }

    pub fn is_malformed(&self) -> bool {
        self.node.is_none()
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;

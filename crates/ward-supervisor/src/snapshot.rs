// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only point-in-time view of the supervisor. The representation at
//! any system boundary (HTTP, CLI, ...) is out of scope; only this
//! structure is contractual.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use ward_core::NodeId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeSnapshot {
    pub name: String,
    pub running: bool,
    pub ready: bool,
    pub pid: Option<u32>,
    pub uptime_seconds: f64,
    pub parents: Vec<NodeId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthSnapshot {
    pub run_id: Uuid,
    pub shutdown: bool,
    pub nodes: std::collections::BTreeMap<NodeId, NodeSnapshot>,
}

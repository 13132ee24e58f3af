// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Construction-time failures. Every variant here means no task is ever
//! spawned — the process exits non-zero before anything runs.

use thiserror::Error;
use ward_core::NodeId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("duplicate node id in graph: {0}")]
    DuplicateNode(NodeId),

    #[error("node {node} declares unknown parent {parent}")]
    UnknownParent { node: NodeId, parent: NodeId },

    #[error("dependency graph has a cycle reachable from {0}")]
    Cycle(NodeId),
}

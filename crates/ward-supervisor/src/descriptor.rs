// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative description of one node in the graph. Immutable for the
//! whole run; the supervisor never mutates a descriptor after construction.

use std::collections::BTreeSet;
use std::sync::Arc;
use ward_core::NodeId;
use ward_node::Node;

/// One vertex in the dependency DAG: the node's address, its runnable
/// implementation, and the set of parents it must wait ready before it
/// may start.
#[derive(Clone)]
pub struct NodeDescriptor {
    pub id: NodeId,
    pub runnable: Arc<dyn Node>,
    pub parents: BTreeSet<NodeId>,
    pub disabled: bool,
}

impl NodeDescriptor {
    pub fn new(id: NodeId, runnable: Arc<dyn Node>) -> Self {
        Self { id, runnable, parents: BTreeSet::new(), disabled: false }
    }

    pub fn with_parents(mut self, parents: impl IntoIterator<Item = NodeId>) -> Self {
        self.parents = parents.into_iter().collect();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Graph validation and topological ordering. Both the startup order and
//! the reverse-order shutdown sweep are derived from the same sort.

use crate::descriptor::NodeDescriptor;
use crate::error::ConstructionError;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use ward_core::NodeId;

/// Validate the graph (no duplicate ids, no unknown parents, no cycles)
/// and return a topological order, ties broken by [`NodeId`]'s declared
/// ordering so the same graph always sorts the same way.
pub fn toposort(descriptors: &[NodeDescriptor]) -> Result<Vec<NodeId>, ConstructionError> {
    let mut by_id: HashMap<NodeId, &NodeDescriptor> = HashMap::new();
    for d in descriptors {
        if by_id.insert(d.id, d).is_some() {
            return Err(ConstructionError::DuplicateNode(d.id));
        }
    }

    for d in descriptors {
        for parent in &d.parents {
            if !by_id.contains_key(parent) {
                return Err(ConstructionError::UnknownParent { node: d.id, parent: *parent });
            }
        }
    }

    let mut children: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    let mut in_degree: BTreeMap<NodeId, usize> = BTreeMap::new();
    for d in descriptors {
        in_degree.insert(d.id, d.parents.len());
        for parent in &d.parents {
            children.entry(*parent).or_default().push(d.id);
        }
    }

    let mut frontier: BTreeSet<NodeId> =
        in_degree.iter().filter(|(_, deg)| **deg == 0).map(|(id, _)| *id).collect();
    let mut order = Vec::with_capacity(descriptors.len());

    while let Some(&next) = frontier.iter().next() {
        frontier.remove(&next);
        order.push(next);
        if let Some(kids) = children.get(&next) {
            for child in kids {
                #[allow(clippy::expect_used)]
                let deg = in_degree.get_mut(child).expect("child is in the graph");
                *deg -= 1;
                if *deg == 0 {
                    frontier.insert(*child);
                }
            }
        }
    }

    if order.len() != descriptors.len() {
        // Some node still has unresolved parents: it sits on (or downstream
        // of) a cycle. Report the smallest such id for a deterministic error.
        #[allow(clippy::expect_used)]
        let stuck = in_degree
            .iter()
            .filter(|(_, deg)| **deg > 0)
            .map(|(id, _)| *id)
            .min()
            .expect("at least one node must be stuck if the order is short");
        return Err(ConstructionError::Cycle(stuck));
    }

    Ok(order)
}

#[cfg(test)]
#[path = "toposort_tests.rs"]
mod tests;

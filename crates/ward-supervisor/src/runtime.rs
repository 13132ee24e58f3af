// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State shared by every per-node supervision task, the control dispatch
//! loop, and anyone holding a snapshot handle. Never exposed outside this
//! crate — callers only ever see it through `Supervisor`.

use crate::descriptor::NodeDescriptor;
use crate::exit::ShutdownReason;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use uuid::Uuid;
use ward_core::{Clock, NodeId};
use ward_node::{NodeHandle, ReadyEvent, ShutdownEvent};

pub struct SharedRuntime<C: Clock> {
    pub run_id: Uuid,
    pub clock: C,
    pub shutdown: ShutdownEvent,
    pub order: Vec<NodeId>,
    pub descriptors: BTreeMap<NodeId, NodeDescriptor>,
    pub children: BTreeMap<NodeId, Vec<NodeId>>,
    pub ready: BTreeMap<NodeId, ReadyEvent>,
    pub handles: BTreeMap<NodeId, RwLock<Option<NodeHandle>>>,
    shutdown_reason: Mutex<Option<ShutdownReason>>,
}

impl<C: Clock> SharedRuntime<C> {
    pub fn new(order: Vec<NodeId>, descriptors: BTreeMap<NodeId, NodeDescriptor>, clock: C) -> Self {
        let mut children: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        for d in descriptors.values() {
            for parent in &d.parents {
                children.entry(*parent).or_default().push(d.id);
            }
        }
        let ready = descriptors.keys().map(|id| (*id, ReadyEvent::new())).collect();
        let handles = descriptors.keys().map(|id| (*id, RwLock::new(None))).collect();

        Self {
            run_id: Uuid::new_v4(),
            clock,
            shutdown: ShutdownEvent::new(),
            order,
            descriptors,
            children,
            ready,
            handles,
            shutdown_reason: Mutex::new(None),
        }
    }

    pub fn parents_of(&self, id: NodeId) -> Vec<ReadyEvent> {
        self.descriptors[&id].parents.iter().map(|p| self.ready[p].clone()).collect()
    }

    pub fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        self.children.get(&id).cloned().unwrap_or_default()
    }

    pub fn set_handle(&self, id: NodeId, handle: Option<NodeHandle>) {
        *self.handles[&id].write() = handle;
    }

    pub fn handle_of(&self, id: NodeId) -> Option<NodeHandle> {
        *self.handles[&id].read()
    }

    /// Trigger global shutdown, recording the first reason only — later
    /// calls (e.g. a signal arriving after a breaker trip already fired)
    /// don't overwrite the reason the process will exit with.
    pub fn trigger_shutdown(&self, reason: ShutdownReason) {
        let mut slot = self.shutdown_reason.lock();
        if slot.is_none() {
            *slot = Some(reason);
        }
        drop(slot);
        self.shutdown.trigger();
    }

    pub fn shutdown_reason(&self) -> ShutdownReason {
        self.shutdown_reason.lock().as_ref().copied().unwrap_or(ShutdownReason::Requested)
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires the closed set of [`NodeId`]s into the dependency graph this
//! repository demonstrates: an audio pipeline (`LIQUID_SOAP`) feeding an
//! HLS encoder, a database gateway feeding a prefetcher and a search
//! crawler that a coordinator fans in from, a now-playing watcher on the
//! pipeline, and a public API sitting on top of all three.

use crate::nodes;
use ward_bus::ControlBus;
use ward_core::{NodeId, SupervisorConfig};
use ward_supervisor::NodeDescriptor;

pub fn build(config: &SupervisorConfig, bus: &ControlBus) -> Vec<NodeDescriptor> {
    let liquid_soap = config.node(NodeId::LiquidSoap);
    let hls = config.node(NodeId::Hls);

    vec![
        NodeDescriptor::new(NodeId::LiquidSoap, nodes::liquid_soap_node(&liquid_soap))
            .disabled(liquid_soap.disabled),
        NodeDescriptor::new(NodeId::Hls, nodes::hls_node(&hls))
            .with_parents([NodeId::LiquidSoap])
            .disabled(hls.disabled),
        NodeDescriptor::new(NodeId::Db, std::sync::Arc::new(nodes::db_node(bus.clone())))
            .disabled(config.node(NodeId::Db).disabled),
        NodeDescriptor::new(NodeId::Prefetch, nodes::prefetch_node())
            .with_parents([NodeId::Db])
            .disabled(config.node(NodeId::Prefetch).disabled),
        NodeDescriptor::new(NodeId::Search, nodes::search_node())
            .with_parents([NodeId::Db])
            .disabled(config.node(NodeId::Search).disabled),
        NodeDescriptor::new(NodeId::Coordinator, nodes::coordinator_node())
            .with_parents([NodeId::Prefetch, NodeId::Search])
            .disabled(config.node(NodeId::Coordinator).disabled),
        NodeDescriptor::new(NodeId::NowPlaying, nodes::now_playing_node())
            .with_parents([NodeId::LiquidSoap])
            .disabled(config.node(NodeId::NowPlaying).disabled),
        NodeDescriptor::new(NodeId::Api, nodes::api_node())
            .with_parents([NodeId::Db, NodeId::Coordinator, NodeId::NowPlaying])
            .disabled(config.node(NodeId::Api).disabled),
    ]
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;

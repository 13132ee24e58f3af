// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The closed set of supervised node identifiers.

use serde::{Deserialize, Serialize};

/// Stable routing address for a supervised node. Closed set: a new kind of
/// node means a new variant here, not a string key, so an unknown
/// destination is a compile error rather than a silent drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeId {
    LiquidSoap,
    Hls,
    Prefetch,
    Search,
    Coordinator,
    Db,
    NowPlaying,
    Api,
}

impl NodeId {
    /// All known node identifiers, in declaration order.
    pub const ALL: [NodeId; 8] = [
        NodeId::LiquidSoap,
        NodeId::Hls,
        NodeId::Prefetch,
        NodeId::Search,
        NodeId::Coordinator,
        NodeId::Db,
        NodeId::NowPlaying,
        NodeId::Api,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeId::LiquidSoap => "LIQUID_SOAP",
            NodeId::Hls => "HLS",
            NodeId::Prefetch => "PREFETCH",
            NodeId::Search => "SEARCH",
            NodeId::Coordinator => "COORDINATOR",
            NodeId::Db => "DB",
            NodeId::NowPlaying => "NOW_PLAYING",
            NodeId::Api => "API",
        }
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "node_id_tests.rs"]
mod tests;

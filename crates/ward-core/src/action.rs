// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control verbs carried over the bus. The supervisor only ever inspects
//! the destination node and correlation id of a message — never the action
//! payload — so this enum can grow new routing-only verbs without touching
//! the supervisor.

use serde::{Deserialize, Serialize};

/// The closed set of control verbs. Lifecycle verbs (`Start`, `Stop`, ...)
/// are meaningful to the supervisor; the rest are opaque routing labels
/// that concrete nodes assign meaning to on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlAction {
    Start,
    Stop,
    Status,
    StopAll,
    StopNode,
    Queue,
    QueueResponse,
    LoadHot,
    Trigger,
    InsertTracks,
    MissingAudio,
    MissingAudioResponse,
}

impl ControlAction {
    /// Lifecycle verbs are dispatched purely by the supervisor; all other
    /// verbs are routed to the destination node's `receive` unmodified.
    pub fn is_lifecycle(self) -> bool {
        matches!(self, ControlAction::Start | ControlAction::Stop | ControlAction::Status | ControlAction::StopAll | ControlAction::StopNode)
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;

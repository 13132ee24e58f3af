// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The node-operation outcome. Rust expresses the Success/Error sum type
//! as a plain `Result` so `?` composes inside node implementations, while
//! the supervisor always matches both arms explicitly and never lets a
//! node error escape its own boundary.

use thiserror::Error;

/// A node operation's advisory failure. Never fatal to the supervisor by
/// itself — callers decide what a given `NodeError` means for that node's
/// state machine (logged and ignored, counted toward a health threshold,
/// or treated as a fatal start failure).
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct NodeError(pub String);

impl NodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Outcome of a single node operation (`mark_ready`, `check`, `receive`).
pub type Outcome = Result<String, NodeError>;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The one place in the workspace allowed to flatten errors into a single
//! top-level type, since its only job is choosing a process exit code.

use thiserror::Error;
use ward_core::ConfigError;
use ward_supervisor::ConstructionError;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl DaemonError {
    /// Every variant here means nothing ever started: config validation or
    /// graph construction failed before `execute()` was reachable. Per the
    /// exit code contract, that's always non-zero.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

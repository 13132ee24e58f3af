// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The `ward` binary: loads configuration, installs logging, wires the
//! demo dependency graph, and runs the supervisor until shutdown. Split
//! out as a library so `tests/specs.rs` can drive `--dry-run` and the exit
//! code mapping without going through a subprocess for every case.

pub mod cli;
pub mod error;
pub mod graph;
pub mod logging;
pub mod nodes;

pub use cli::Cli;
pub use error::DaemonError;

use ward_bus::ControlBus;
use ward_core::SupervisorConfig;
use ward_supervisor::{HealthSnapshot, Supervisor};

/// Load and validate `SupervisorConfig` from `path`, or fall back to the
/// same validated defaults an empty file would produce when no file
/// exists there yet — a missing config is not a validation failure, only
/// an unreadable or malformed one is.
pub fn load_config(path: &std::path::Path) -> Result<SupervisorConfig, DaemonError> {
    if path.exists() {
        Ok(SupervisorConfig::load(path)?)
    } else {
        Ok(SupervisorConfig::load_from_str("", path)?)
    }
}

/// Construct (but do not run) a `Supervisor` for the demo graph. Shared by
/// `main` and by integration tests that want a real, validated graph
/// without spawning a process.
pub fn build_supervisor(config: &SupervisorConfig) -> Result<Supervisor, DaemonError> {
    let (bus, bus_rx) = ControlBus::new();
    let descriptors = graph::build(config, &bus);
    Ok(Supervisor::new(descriptors, bus_rx)?)
}

/// The shape `--dry-run` prints: a snapshot of a constructed-but-never-run
/// supervisor, which is exactly what a fresh `Supervisor` reports before
/// `execute()` is ever called.
pub fn dry_run_snapshot(config: &SupervisorConfig) -> Result<HealthSnapshot, DaemonError> {
    Ok(build_supervisor(config)?.snapshot())
}

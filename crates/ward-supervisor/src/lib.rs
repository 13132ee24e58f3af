// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The DAG runner: validates a dependency graph of [`Node`](ward_node::Node)
//! implementations, runs one supervision loop per node (parent-readiness
//! gating, health watchdog, exponential backoff with a restart breaker,
//! cascading dependent stop), dispatches the shared control bus, and
//! answers signals and snapshot requests for the lifetime of the process.

mod descriptor;
mod dispatch;
mod error;
mod exit;
mod loop_;
mod runtime;
mod signal;
mod snapshot;
mod supervisor;
mod toposort;
mod watchdog;

pub use descriptor::NodeDescriptor;
pub use error::ConstructionError;
pub use exit::ShutdownReason;
pub use snapshot::{HealthSnapshot, NodeSnapshot};
pub use supervisor::Supervisor;
pub use toposort::toposort;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The node contract every supervised unit implements, plus the two
//! concrete flavors: process-backed nodes wrapping an OS child process,
//! and service-backed nodes wrapping an in-process worker task.

pub mod events;
pub mod node;
pub mod process;
pub mod service;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use events::{ReadyEvent, ShutdownEvent, StopSignal};
pub use node::{Node, NodeHandle};
pub use process::{ProcessCommand, ProcessNode};
pub use service::ServiceNode;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNode;

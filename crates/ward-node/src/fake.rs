// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A scriptable fake [`Node`] for exercising the supervisor without real
//! subprocesses or worker tasks.

use crate::events::{ReadyEvent, ShutdownEvent};
use crate::node::{Node, NodeHandle};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use ward_core::{ControlMessage, NodeError, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
    Start,
    MarkReady,
    Check,
    Receive,
    WaitOrShutdown,
    Stop(String),
}

struct FakeState {
    calls: Vec<FakeCall>,
    start_results: Vec<bool>,
    check_results: Vec<bool>,
    exit_code: Option<i32>,
    run_until_shutdown: bool,
}

/// Fake node whose behavior is scripted up front: how many times `start`
/// should succeed, the sequence of `check` results, and whether a run
/// exits on its own or only via shutdown.
#[derive(Clone)]
pub struct FakeNode {
    state: Arc<Mutex<FakeState>>,
    starts: Arc<AtomicUsize>,
}

impl FakeNode {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                calls: Vec::new(),
                start_results: Vec::new(),
                check_results: Vec::new(),
                exit_code: Some(0),
                run_until_shutdown: false,
            })),
            starts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_start_results(self, results: Vec<bool>) -> Self {
        self.state.lock().start_results = results;
        self
    }

    pub fn with_check_results(self, results: Vec<bool>) -> Self {
        self.state.lock().check_results = results;
        self
    }

    /// Never exit on its own; only shutdown ends the run.
    pub fn run_until_shutdown(self) -> Self {
        self.state.lock().run_until_shutdown = true;
        self
    }

    pub fn with_exit_code(self, code: Option<i32>) -> Self {
        self.state.lock().exit_code = code;
        self
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.state.lock().calls.clone()
    }

    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }
}

impl Default for FakeNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node for FakeNode {
    async fn start(&self) -> Option<NodeHandle> {
        let n = self.starts.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock();
        state.calls.push(FakeCall::Start);
        let ok = state.start_results.get(n).copied().unwrap_or(true);
        drop(state);
        if ok {
            Some(NodeHandle::new(Instant::now(), None))
        } else {
            None
        }
    }

    async fn mark_ready(&self, _handle: &NodeHandle, ready: &ReadyEvent) -> Outcome {
        self.state.lock().calls.push(FakeCall::MarkReady);
        ready.set();
        Ok("ready".to_string())
    }

    async fn check(&self, _handle: &NodeHandle) -> Outcome {
        let mut state = self.state.lock();
        state.calls.push(FakeCall::Check);
        let idx = state.calls.iter().filter(|c| **c == FakeCall::Check).count() - 1;
        let ok = state.check_results.get(idx).copied().unwrap_or(true);
        if ok {
            Ok("healthy".to_string())
        } else {
            Err(NodeError::new("unhealthy"))
        }
    }

    async fn receive(&self, _ready: &ReadyEvent, _message: &ControlMessage) -> Outcome {
        self.state.lock().calls.push(FakeCall::Receive);
        Ok("received".to_string())
    }

    async fn wait_or_shutdown(&self, _handle: &NodeHandle, shutdown: &ShutdownEvent) -> Option<i32> {
        self.state.lock().calls.push(FakeCall::WaitOrShutdown);
        let run_until_shutdown = self.state.lock().run_until_shutdown;
        if run_until_shutdown {
            shutdown.wait().await;
            None
        } else {
            self.state.lock().exit_code
        }
    }

    async fn stop(&self, _handle: &NodeHandle, reason: &str) {
        self.state.lock().calls.push(FakeCall::Stop(reason.to_string()));
    }

    fn health_interval(&self) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

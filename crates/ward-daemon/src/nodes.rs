// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin, clearly-stubbed concrete nodes wiring the DAG end to end. None of
//! the business logic implied by their names (HLS segment layout, yt-dlp
//! invocation, SQLite schema, YouTube search heuristics, Telnet command
//! vocabulary) is a target of this repository — each node here does just
//! enough to exist as a supervised unit and, for [`NodeId::Db`], to
//! demonstrate the request/reply convention over the control bus.

use std::sync::Arc;
use std::time::Duration;
use ward_bus::ControlBus;
use ward_core::{ControlAction, ControlMessage, NodeId, NodeOverride, PayloadEnvelope};
use ward_node::service::WorkerFn;
use ward_node::{Node, ProcessCommand, ProcessNode, ServiceNode};

/// A worker body that does nothing but mark itself ready and wait to be
/// told to stop — the minimum a service node needs to participate in the
/// DAG's readiness gating and shutdown sweep.
fn idle_worker() -> WorkerFn {
    Arc::new(|stop, ready| {
        Box::pin(async move {
            ready.set();
            stop.wait().await;
            None
        })
    })
}

fn service_stub(name: &str) -> ServiceNode {
    ServiceNode::new(name, idle_worker())
}

/// The database gateway. Its only non-stub behavior: answering a
/// `MISSING_AUDIO` request with an (empty, for this demo) item list on the
/// `MISSING_AUDIO_RESPONSE` action, echoing the request's correlation id —
/// the wire shape callers in this repo's tests exercise against a real
/// [`ward_supervisor::Supervisor`]. `node` on a `ControlMessage` is always
/// the *destination*, never the sender, so the requester has to name
/// itself inside the envelope; by convention that's the `requester` field.
pub fn db_node(bus: ControlBus) -> ServiceNode {
    ServiceNode::new("db", idle_worker()).with_receive(Arc::new(move |message: &ControlMessage| {
        let bus = bus.clone();
        let reply = match message.action {
            ControlAction::MissingAudio => requester_of(message).map(|requester| {
                ControlMessage::reply_to(
                    message,
                    ControlAction::MissingAudioResponse,
                    Some(requester),
                    Some(PayloadEnvelope::new(1, "missing_audio_response", serde_json::json!([]))),
                )
            }),
            _ => None,
        };
        Box::pin(async move {
            if let Some(reply) = reply {
                bus.send(reply).await;
            }
            Ok("handled".to_string())
        })
    }))
}

fn requester_of(message: &ControlMessage) -> Option<NodeId> {
    let data = &message.payload.as_ref()?.data;
    serde_json::from_value(data.get("requester")?.clone()).ok()
}

fn process_stub(name: &str, default_exe: &str, overrides: &NodeOverride) -> ProcessNode {
    let exe = overrides.exe_path.clone().unwrap_or_else(|| default_exe.into());
    ProcessNode::new(name, ProcessCommand::new(exe))
        .with_health_interval(Duration::from_secs(30))
}

pub fn liquid_soap_node(overrides: &NodeOverride) -> Arc<dyn Node> {
    Arc::new(process_stub("liquid_soap", "liquidsoap", overrides))
}

pub fn hls_node(overrides: &NodeOverride) -> Arc<dyn Node> {
    Arc::new(process_stub("hls", "ffmpeg", overrides))
}

pub fn prefetch_node() -> Arc<dyn Node> {
    Arc::new(service_stub("prefetch"))
}

pub fn search_node() -> Arc<dyn Node> {
    Arc::new(service_stub("search"))
}

pub fn coordinator_node() -> Arc<dyn Node> {
    Arc::new(service_stub("coordinator"))
}

pub fn now_playing_node() -> Arc<dyn Node> {
    Arc::new(service_stub("now_playing"))
}

pub fn api_node() -> Arc<dyn Node> {
    Arc::new(service_stub("api"))
}

#[cfg(test)]
#[path = "nodes_tests.rs"]
mod tests;

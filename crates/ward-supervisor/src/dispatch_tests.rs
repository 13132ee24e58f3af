use super::*;
use crate::descriptor::NodeDescriptor;
use std::collections::BTreeMap;
use std::time::Duration;
use ward_bus::ControlBus;
use ward_core::clock::FakeClock;
use ward_core::{ControlAction, NodeId};
use ward_node::FakeNode;

fn runtime_with(ids: &[NodeId]) -> Arc<SharedRuntime<FakeClock>> {
    let mut descriptors = BTreeMap::new();
    for id in ids {
        descriptors.insert(*id, NodeDescriptor::new(*id, Arc::new(FakeNode::new())));
    }
    Arc::new(SharedRuntime::new(ids.to_vec(), descriptors, FakeClock::new()))
}

#[tokio::test]
async fn routes_message_to_its_destination_node() {
    let runtime = runtime_with(&[NodeId::Db]);
    let message = ControlMessage::new(ControlAction::Start, Some(NodeId::Db), None);
    dispatch_one(&runtime, &message).await;
    // No panic, and the node's fake recorded the call.
}

#[tokio::test]
async fn drops_message_with_no_destination_node() {
    let runtime = runtime_with(&[NodeId::Db]);
    let message = ControlMessage::new(ControlAction::Stop, None, None);
    dispatch_one(&runtime, &message).await;
}

#[tokio::test]
async fn drops_message_for_unknown_node() {
    let runtime = runtime_with(&[NodeId::Db]);
    let message = ControlMessage::new(ControlAction::Start, Some(NodeId::Api), None);
    dispatch_one(&runtime, &message).await;
}

#[tokio::test]
async fn bus_closed_triggers_shutdown() {
    let runtime = runtime_with(&[NodeId::Db]);
    let (bus, rx) = ControlBus::new();
    drop(bus);

    let task = tokio::spawn(run(rx, runtime.clone()));
    tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .expect("dispatch loop should exit promptly")
        .expect("task should not panic");

    assert_eq!(runtime.shutdown_reason(), ShutdownReason::BusClosed);
}

#[tokio::test]
async fn shutdown_stops_the_dispatch_loop() {
    let runtime = runtime_with(&[NodeId::Db]);
    let (_bus, rx) = ControlBus::new();
    runtime.trigger_shutdown(ShutdownReason::Requested);

    let task = tokio::spawn(run(rx, runtime.clone()));
    tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .expect("dispatch loop should exit promptly")
        .expect("task should not panic");
}

#[tokio::test]
async fn a_panicking_receive_does_not_crash_the_dispatcher() {
    struct PanicsOnReceive;

    #[async_trait::async_trait]
    impl ward_node::Node for PanicsOnReceive {
        async fn start(&self) -> Option<ward_node::NodeHandle> {
            None
        }
        async fn mark_ready(&self, _handle: &ward_node::NodeHandle, _ready: &ward_node::ReadyEvent) -> ward_core::Outcome {
            Ok("ready".to_string())
        }
        async fn check(&self, _handle: &ward_node::NodeHandle) -> ward_core::Outcome {
            Ok("healthy".to_string())
        }
        async fn receive(&self, _ready: &ward_node::ReadyEvent, _message: &ControlMessage) -> ward_core::Outcome {
            panic!("boom");
        }
        async fn wait_or_shutdown(&self, _handle: &ward_node::NodeHandle, _shutdown: &ward_node::ShutdownEvent) -> Option<i32> {
            None
        }
        async fn stop(&self, _handle: &ward_node::NodeHandle, _reason: &str) {}
    }

    let mut descriptors = BTreeMap::new();
    descriptors.insert(NodeId::Db, NodeDescriptor::new(NodeId::Db, Arc::new(PanicsOnReceive)));
    let runtime = Arc::new(SharedRuntime::new(vec![NodeId::Db], descriptors, FakeClock::new()));

    let message = ControlMessage::new(ControlAction::Status, Some(NodeId::Db), None);
    dispatch_one(&runtime, &message).await;
}

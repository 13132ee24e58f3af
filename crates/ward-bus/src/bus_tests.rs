use super::*;
use ward_core::{ControlAction, NodeId};

#[tokio::test]
async fn preserves_fifo_order_from_a_single_producer() {
    let (bus, mut rx) = ControlBus::new();
    for _ in 0..3 {
        bus.send(ControlMessage::new(ControlAction::Status, Some(NodeId::Db), None)).await;
    }
    bus.send(ControlMessage::new(ControlAction::Stop, Some(NodeId::Api), None)).await;

    for _ in 0..3 {
        let msg = rx.receive().await.unwrap();
        assert_eq!(msg.action, ControlAction::Status);
    }
    let last = rx.receive().await.unwrap();
    assert_eq!(last.action, ControlAction::Stop);
}

#[tokio::test]
async fn receive_errors_once_every_producer_is_dropped() {
    let (bus, mut rx) = ControlBus::new();
    drop(bus);
    assert!(matches!(rx.receive().await, Err(RecvError::Closed)));
}

#[tokio::test]
async fn cloned_handles_share_the_same_queue() {
    let (bus, mut rx) = ControlBus::new();
    let bus2 = bus.clone();
    bus2.send(ControlMessage::new(ControlAction::Trigger, Some(NodeId::Coordinator), None)).await;
    let msg = rx.receive().await.unwrap();
    assert_eq!(msg.node, Some(NodeId::Coordinator));
}

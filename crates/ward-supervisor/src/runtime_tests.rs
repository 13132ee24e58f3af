use super::*;
use crate::descriptor::NodeDescriptor;
use std::collections::BTreeMap;
use std::sync::Arc;
use ward_core::clock::FakeClock;
use ward_node::FakeNode;

fn runtime(descriptors: Vec<NodeDescriptor>) -> SharedRuntime<FakeClock> {
    let order = descriptors.iter().map(|d| d.id).collect();
    let map: BTreeMap<NodeId, NodeDescriptor> = descriptors.into_iter().map(|d| (d.id, d)).collect();
    SharedRuntime::new(order, map, FakeClock::new())
}

#[test]
fn children_of_indexes_the_parent_edges_in_both_directions() {
    let rt = runtime(vec![
        NodeDescriptor::new(NodeId::Db, Arc::new(FakeNode::new())),
        NodeDescriptor::new(NodeId::Prefetch, Arc::new(FakeNode::new())).with_parents([NodeId::Db]),
        NodeDescriptor::new(NodeId::Search, Arc::new(FakeNode::new())).with_parents([NodeId::Db]),
    ]);

    let mut children = rt.children_of(NodeId::Db);
    children.sort();
    assert_eq!(children, vec![NodeId::Prefetch, NodeId::Search]);
    assert!(rt.children_of(NodeId::Prefetch).is_empty());
}

#[test]
fn parents_of_resolves_to_live_ready_latch_clones() {
    let rt = runtime(vec![
        NodeDescriptor::new(NodeId::Db, Arc::new(FakeNode::new())),
        NodeDescriptor::new(NodeId::Api, Arc::new(FakeNode::new())).with_parents([NodeId::Db]),
    ]);

    let parents = rt.parents_of(NodeId::Api);
    assert_eq!(parents.len(), 1);
    assert!(!parents[0].is_set());
    rt.ready[&NodeId::Db].set();
    assert!(parents[0].is_set(), "the returned latch must be the same one the runtime tracks");
}

#[test]
fn set_handle_round_trips_through_handle_of() {
    let rt = runtime(vec![NodeDescriptor::new(NodeId::Db, Arc::new(FakeNode::new()))]);
    assert!(rt.handle_of(NodeId::Db).is_none());

    let handle = ward_node::NodeHandle::new(std::time::Instant::now(), Some(42));
    rt.set_handle(NodeId::Db, Some(handle));
    assert_eq!(rt.handle_of(NodeId::Db).and_then(|h| h.pid), Some(42));

    rt.set_handle(NodeId::Db, None);
    assert!(rt.handle_of(NodeId::Db).is_none());
}

#[test]
fn trigger_shutdown_keeps_the_first_reason() {
    let rt = runtime(vec![NodeDescriptor::new(NodeId::Db, Arc::new(FakeNode::new()))]);

    rt.trigger_shutdown(ShutdownReason::StartFailure(NodeId::Db));
    rt.trigger_shutdown(ShutdownReason::Signal);

    assert_eq!(rt.shutdown_reason(), ShutdownReason::StartFailure(NodeId::Db));
    assert!(rt.shutdown.is_triggered());
}

#[test]
fn shutdown_reason_defaults_to_requested_when_never_triggered() {
    let rt = runtime(vec![NodeDescriptor::new(NodeId::Db, Arc::new(FakeNode::new()))]);
    assert_eq!(rt.shutdown_reason(), ShutdownReason::Requested);
}

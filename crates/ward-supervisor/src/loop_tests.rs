use super::*;
use crate::descriptor::NodeDescriptor;
use std::collections::BTreeMap;
use ward_core::clock::FakeClock;
use ward_node::FakeNode;

fn runtime(descriptors: Vec<NodeDescriptor>) -> Arc<SharedRuntime<FakeClock>> {
    let order = descriptors.iter().map(|d| d.id).collect();
    let map = descriptors.into_iter().map(|d| (d.id, d)).collect();
    Arc::new(SharedRuntime::new(order, map, FakeClock::new()))
}

#[tokio::test(start_paused = true)]
async fn a_root_node_that_exits_cleanly_restarts_rather_than_settling() {
    // There is no terminal "done" state (see the open-question decision to
    // keep restart-always): a zero exit code still goes through backoff and
    // starts again, so the only way to end the loop is to trigger shutdown.
    let fake = Arc::new(FakeNode::new().with_exit_code(Some(0)));
    let rt = runtime(vec![NodeDescriptor::new(NodeId::Db, fake.clone())]);

    let task = tokio::spawn(run(NodeId::Db, rt.clone()));
    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
    assert!(fake.start_count() > 1, "a clean exit should still be followed by a restart");

    rt.shutdown.trigger();
    tokio::time::timeout(std::time::Duration::from_secs(2), task)
        .await
        .expect("loop should return promptly once shutdown fires")
        .expect("task should not panic");
}

#[tokio::test]
async fn disabled_node_never_starts_and_waits_for_shutdown() {
    let fake = Arc::new(FakeNode::new());
    let descriptor = NodeDescriptor::new(NodeId::Db, fake.clone()).disabled(true);
    let rt = runtime(vec![descriptor]);

    let shutdown = rt.shutdown.clone();
    let task = tokio::spawn(run(NodeId::Db, rt.clone()));
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(fake.start_count(), 0);

    shutdown.trigger();
    tokio::time::timeout(std::time::Duration::from_secs(2), task)
        .await
        .expect("loop should return once shutdown fires")
        .expect("task should not panic");
}

#[tokio::test(start_paused = true)]
async fn a_child_waits_for_its_parent_to_become_ready() {
    let parent = Arc::new(FakeNode::new().run_until_shutdown());
    let child = Arc::new(FakeNode::new().run_until_shutdown());
    let rt = runtime(vec![
        NodeDescriptor::new(NodeId::Db, parent.clone()),
        NodeDescriptor::new(NodeId::Api, child.clone()).with_parents([NodeId::Db]),
    ]);

    let child_task = tokio::spawn(run(NodeId::Api, rt.clone()));
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(child.start_count(), 0, "child must not start before its parent is ready");

    let parent_task = tokio::spawn(run(NodeId::Db, rt.clone()));
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(child.start_count() >= 1, "child should start once its parent becomes ready");

    rt.shutdown.trigger();
    tokio::time::timeout(std::time::Duration::from_secs(2), parent_task)
        .await
        .expect("parent loop should return promptly once shutdown fires")
        .expect("task should not panic");
    tokio::time::timeout(std::time::Duration::from_secs(2), child_task)
        .await
        .expect("child loop should return promptly once shutdown fires")
        .expect("task should not panic");
}

#[tokio::test]
async fn a_start_failure_triggers_global_shutdown() {
    let fake = Arc::new(FakeNode::new().with_start_results(vec![false]));
    let rt = runtime(vec![NodeDescriptor::new(NodeId::Db, fake.clone())]);

    tokio::time::timeout(std::time::Duration::from_secs(2), run(NodeId::Db, rt.clone()))
        .await
        .expect("loop should return promptly on start failure");

    assert_eq!(rt.shutdown_reason(), ShutdownReason::StartFailure(NodeId::Db));
}

#[tokio::test(start_paused = true)]
async fn exhausting_the_restart_budget_trips_the_breaker() {
    let fake = Arc::new(FakeNode::new().with_exit_code(Some(1)));
    let rt = runtime(vec![NodeDescriptor::new(NodeId::Db, fake.clone())]);

    // Backoff delays use real tokio sleeps; with time paused they advance
    // instantly instead of taking the real ~minutes the growing backoff
    // would otherwise need to exhaust the restart budget.
    tokio::time::timeout(std::time::Duration::from_secs(30), run(NodeId::Db, rt.clone()))
        .await
        .expect("loop should eventually give up rather than restart forever");

    assert_eq!(rt.shutdown_reason(), ShutdownReason::BreakerTrip(NodeId::Db));
    assert!(fake.start_count() > 1);
}

#[tokio::test]
async fn stopping_a_node_clears_its_ready_latch_and_calls_stop() {
    let fake = Arc::new(FakeNode::new().run_until_shutdown());
    let rt = runtime(vec![NodeDescriptor::new(NodeId::Db, fake.clone())]);
    rt.set_handle(NodeId::Db, Some(ward_node::NodeHandle::new(std::time::Instant::now(), None)));
    rt.ready[&NodeId::Db].set();

    stop_node(&rt, NodeId::Db, "test").await;

    assert!(!rt.ready[&NodeId::Db].is_set());
    assert!(fake.calls().contains(&ward_node::fake::FakeCall::Stop("test".to_string())));
}

use super::*;

#[tokio::test]
async fn start_then_mark_ready_sets_the_latch() {
    let node = FakeNode::new();
    let ready = ReadyEvent::new();
    let handle = node.start().await.unwrap();
    node.mark_ready(&handle, &ready).await.unwrap();
    assert!(ready.is_set());
    assert_eq!(node.calls(), vec![FakeCall::Start, FakeCall::MarkReady]);
}

#[tokio::test]
async fn scripted_start_failure_returns_none() {
    let node = FakeNode::new().with_start_results(vec![false, true]);
    assert!(node.start().await.is_none());
    assert!(node.start().await.is_some());
}

#[tokio::test]
async fn scripted_check_results_alternate() {
    let node = FakeNode::new().with_check_results(vec![true, false, true]);
    let handle = NodeHandle::new(std::time::Instant::now(), None);
    assert!(node.check(&handle).await.is_ok());
    assert!(node.check(&handle).await.is_err());
    assert!(node.check(&handle).await.is_ok());
}

use super::*;

#[test]
fn uptime_is_the_difference_from_started_at() {
    let t0 = Instant::now();
    let handle = NodeHandle::new(t0, Some(123));
    let later = t0 + Duration::from_secs(5);
    assert_eq!(handle.uptime(later), Duration::from_secs(5));
}

#[test]
fn uptime_never_goes_negative_for_times_before_start() {
    let t0 = Instant::now();
    let handle = NodeHandle::new(t0, None);
    assert_eq!(handle.uptime(t0 - Duration::from_secs(1)), Duration::ZERO);
}

use super::*;

#[test]
fn fake_clock_advances_monotonic_and_epoch_together() {
    let clock = FakeClock::new();
    let t0 = clock.now();
    let e0 = clock.epoch_ms();
    clock.advance(Duration::from_millis(250));
    assert!(clock.now() > t0);
    assert_eq!(clock.epoch_ms(), e0 + 250);
}

#[test]
fn system_clock_epoch_is_plausible() {
    let clock = SystemClock;
    // any time after this spec was written
    assert!(clock.epoch_ms() > 1_700_000_000_000);
}

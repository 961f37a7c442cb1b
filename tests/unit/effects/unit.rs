use super::*;

#[test]
fn clock_completes_at_duration() {
    let mut c = UnitClock::default();
    c.start(100.0, false);
    assert!(!c.tick(60.0));
    assert_eq!(c.progress(), 0.6);
    assert!(c.tick(40.0));
    assert_eq!(c.state, UnitState::Completed);
    assert!(!c.tick(10.0));
}

#[test]
fn paused_clock_does_not_advance() {
    let mut c = UnitClock::default();
    c.start(100.0, false);
    c.pause();
    assert!(!c.tick(500.0));
    assert_eq!(c.elapsed_ms, 0.0);
    c.resume();
    assert!(c.tick(100.0));
}

#[test]
fn stop_does_not_override_completion() {
    let mut c = UnitClock::default();
    c.start(0.0, false);
    assert!(c.tick(0.0));
    c.stop();
    assert_eq!(c.state, UnitState::Completed);
    c.force_stop();
    assert_eq!(c.state, UnitState::Stopped);
}

#[test]
fn looped_clock_never_completes() {
    let mut c = UnitClock::default();
    c.start(10.0, true);
    assert!(!c.tick(1000.0));
    assert_eq!(c.state, UnitState::Playing);
    assert!(UnitState::Stopped.is_settled());
    assert!(!UnitState::Paused.is_settled());
}

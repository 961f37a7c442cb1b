use super::*;

#[test]
fn virtual_clock_ticks_deltas() {
    let mut clock = VirtualClock::new();
    assert_eq!(clock.tick(), 0.0);
    clock.advance(16.0);
    clock.advance(4.0);
    assert_eq!(clock.now(), TimeMs(20.0));
    assert_eq!(clock.tick(), 20.0);
    assert_eq!(clock.tick(), 0.0);
}

#[test]
fn virtual_clock_ignores_bad_steps() {
    let mut clock = VirtualClock::new();
    clock.advance(-5.0);
    clock.advance(f64::NAN);
    assert_eq!(clock.now(), TimeMs::ZERO);
}

#[test]
fn wall_clock_is_monotonic() {
    let mut clock = WallClock::new();
    let a = clock.now();
    let b = clock.now();
    assert!(b >= a);
    assert!(clock.tick() >= 0.0);
}

use super::*;
use crate::foundation::core::TargetId;
use crate::stage::target::TargetKind;

fn sprite() -> Target {
    Target::new(TargetId(0), TargetKind::Sprite)
}

#[test]
fn opacity_tweens_from_current_value() {
    let mut t = sprite();
    t.alpha = 0.0;
    let mut unit = OpacityUnit::new();
    unit.play(&mut t, &AnimationConfig::to(1.0, 1000.0)).unwrap();
    assert_eq!(unit.state(), UnitState::Playing);
    unit.advance(&mut t, 500.0);
    assert_eq!(t.alpha, 0.5);
    unit.advance(&mut t, 500.0);
    assert_eq!(t.alpha, 1.0);
    assert_eq!(unit.state(), UnitState::Completed);
}

#[test]
fn explicit_start_value_is_applied_immediately() {
    let mut t = sprite();
    let mut unit = PositionUnit::new();
    let cfg = AnimationConfig::to(PropertyValue::point(100.0, 0.0), 100.0)
        .from_value(PropertyValue::point(0.0, 50.0));
    unit.play(&mut t, &cfg).unwrap();
    assert_eq!(t.position, Point::new(0.0, 50.0));
    unit.advance(&mut t, 100.0);
    assert_eq!(t.position, Point::new(100.0, 0.0));
}

#[test]
fn missing_end_value_is_a_hard_error() {
    let mut t = sprite();
    let mut unit = RotationUnit::new();
    let err = unit.play(&mut t, &AnimationConfig::default()).unwrap_err();
    assert!(err.to_string().contains("rotation effect requires endValue"));
    assert_eq!(unit.state(), UnitState::Idle);
}

#[test]
fn stop_freezes_and_reset_restores_neutral() {
    let mut t = sprite();
    let mut unit = ColorUnit::new();
    unit.play(&mut t, &AnimationConfig::to("0x000000", 100.0)).unwrap();
    unit.advance(&mut t, 50.0);
    let mid = t.tint;
    unit.stop(&mut t);
    unit.advance(&mut t, 50.0);
    assert_eq!(t.tint, mid);
    assert_eq!(unit.state(), UnitState::Stopped);

    unit.reset(&mut t);
    assert_eq!(t.tint, None);
}

#[test]
fn pause_and_resume_hold_progress() {
    let mut t = sprite();
    let mut unit = ScaleUnit::new();
    unit.play(&mut t, &AnimationConfig::to(3.0, 100.0)).unwrap();
    unit.advance(&mut t, 50.0);
    unit.pause(&mut t);
    unit.advance(&mut t, 1000.0);
    assert_eq!(t.scale, Vec2::new(2.0, 2.0));
    unit.resume(&mut t);
    unit.advance(&mut t, 50.0);
    assert_eq!(t.scale, Vec2::new(3.0, 3.0));
    unit.reset(&mut t);
    assert_eq!(t.scale, Vec2::new(1.0, 1.0));
}

#[test]
fn zero_duration_completes_on_play() {
    let mut t = sprite();
    let mut unit = OpacityUnit::new();
    unit.play(&mut t, &AnimationConfig::to(0.25, 0.0)).unwrap();
    assert_eq!(t.alpha, 0.25);
    assert_eq!(unit.state(), UnitState::Completed);
}

use super::*;
use crate::stage::target::TargetKind;

fn setup() -> (Stage, AnimationManager, TargetId) {
    let mut stage = Stage::new();
    let id = stage.spawn(TargetKind::Image);
    (stage, AnimationManager::default(), id)
}

#[test]
fn second_animate_of_same_type_stops_the_first() {
    let (mut stage, mut mgr, id) = setup();
    let first = mgr
        .animate(&mut stage, id, PropertyType::Opacity, &AnimationConfig::to(0.0, 1000.0))
        .unwrap();
    let second = mgr
        .animate(&mut stage, id, PropertyType::Opacity, &AnimationConfig::to(0.5, 1000.0))
        .unwrap();

    assert_eq!(mgr.outcome(first), Some(&Outcome::Stopped));
    assert_eq!(mgr.outcome(second), None);
    assert_eq!(mgr.active_types(id), vec![PropertyType::Opacity]);
    assert_eq!(mgr.queued(id).len(), 1);
    assert_eq!(mgr.queued(id)[0].ticket, second);

    mgr.advance(&mut stage, 1000.0);
    assert_eq!(mgr.outcome(second), Some(&Outcome::Completed));
    assert!((stage.get(id).unwrap().alpha - 0.5).abs() < 1e-9);
}

#[test]
fn different_types_run_side_by_side() {
    let (mut stage, mut mgr, id) = setup();
    let _ = mgr
        .animate(&mut stage, id, PropertyType::Rotation, &AnimationConfig::to(90.0, 500.0))
        .unwrap();
    let _ = mgr
        .animate(&mut stage, id, PropertyType::Scale, &AnimationConfig::to(2.0, 1000.0))
        .unwrap();
    assert!(mgr.has_active_animation(id, None));
    assert!(mgr.has_active_animation(id, Some(PropertyType::Rotation)));
    assert!(!mgr.has_active_animation(id, Some(PropertyType::Color)));

    mgr.advance(&mut stage, 500.0);
    assert!(!mgr.has_active_animation(id, Some(PropertyType::Rotation)));
    assert!(mgr.has_active_animation(id, Some(PropertyType::Scale)));
    assert_eq!(stage.get(id).unwrap().rotation_deg, 90.0);
}

#[test]
fn play_failure_leaves_no_entry() {
    let (mut stage, mut mgr, id) = setup();
    let missing_end = AnimationConfig {
        duration: 100.0,
        ..AnimationConfig::default()
    };
    assert!(mgr
        .animate(&mut stage, id, PropertyType::Position, &missing_end)
        .is_err());
    assert!(!mgr.has_active_animation(id, None));
    assert!(mgr.is_idle());
}

#[test]
fn capability_failure_leaves_no_entry() {
    let (mut stage, mut mgr, _) = setup();
    let video = stage.spawn(TargetKind::Video);
    let err = mgr
        .animate(&mut stage, video, PropertyType::Rotation, &AnimationConfig::to(45.0, 10.0))
        .unwrap_err();
    assert!(matches!(err, crate::ReelError::Capability(_)));
    assert!(mgr.is_idle());
}

#[test]
fn zero_duration_settles_immediately() {
    let (mut stage, mut mgr, id) = setup();
    let ticket = mgr
        .animate(&mut stage, id, PropertyType::Opacity, &AnimationConfig::to(0.25, 0.0))
        .unwrap();
    assert_eq!(mgr.take_outcome(ticket), Some(Outcome::Completed));
    assert_eq!(mgr.take_outcome(ticket), None);
    assert_eq!(stage.get(id).unwrap().alpha, 0.25);
    assert!(mgr.is_idle());
}

#[test]
fn pause_is_scoped_to_one_target() {
    let (mut stage, mut mgr, a) = setup();
    let b = stage.spawn(TargetKind::Sprite);
    for id in [a, b] {
        let _ = mgr
            .animate(&mut stage, id, PropertyType::Rotation, &AnimationConfig::to(100.0, 100.0))
            .unwrap();
    }
    mgr.pause_animations(&mut stage, a);
    mgr.advance(&mut stage, 50.0);
    assert_eq!(stage.get(a).unwrap().rotation_deg, 0.0);
    assert_eq!(stage.get(b).unwrap().rotation_deg, 50.0);

    mgr.resume_animations(&mut stage, a);
    mgr.advance(&mut stage, 50.0);
    assert_eq!(stage.get(a).unwrap().rotation_deg, 50.0);
}

#[test]
fn reset_restores_neutral_defaults() {
    let (mut stage, mut mgr, id) = setup();
    let ticket = mgr
        .animate(&mut stage, id, PropertyType::Opacity, &AnimationConfig::to(0.0, 100.0))
        .unwrap();
    mgr.advance(&mut stage, 50.0);
    assert_eq!(stage.get(id).unwrap().alpha, 0.5);

    mgr.reset_animations(&mut stage, id);
    assert_eq!(stage.get(id).unwrap().alpha, 1.0);
    assert_eq!(mgr.outcome(ticket), Some(&Outcome::Stopped));
    assert!(mgr.is_idle());
}

#[test]
fn stop_all_clears_every_map() {
    let (mut stage, mut mgr, a) = setup();
    let b = stage.spawn(TargetKind::Text);
    let _ = mgr
        .animate(&mut stage, a, PropertyType::Scale, &AnimationConfig::to(3.0, 100.0))
        .unwrap();
    let _ = mgr
        .animate(&mut stage, b, PropertyType::Position, &AnimationConfig::to(
            crate::config::value::PropertyValue::point(10.0, 10.0),
            100.0,
        ))
        .unwrap();

    mgr.stop_all(&mut stage);
    assert!(!mgr.has_active_animation(a, None));
    assert!(!mgr.has_active_animation(b, None));
    assert!(mgr.is_idle());
}

#[test]
fn removed_target_fails_its_units() {
    let (mut stage, mut mgr, id) = setup();
    let ticket = mgr
        .animate(&mut stage, id, PropertyType::Scale, &AnimationConfig::to(2.0, 100.0))
        .unwrap();
    let _ = stage.remove(id);
    mgr.advance(&mut stage, 10.0);
    assert!(matches!(mgr.outcome(ticket), Some(Outcome::Failed(_))));
    assert!(mgr.is_idle());
}

#[test]
fn uncollected_outcomes_are_bounded() {
    let (mut stage, mut mgr, id) = setup();
    let tickets: Vec<AnimationTicket> = (0..OUTCOME_LIMIT + 500)
        .map(|_| {
            mgr.animate(&mut stage, id, PropertyType::Opacity, &AnimationConfig::to(0.25, 0.0))
                .unwrap()
        })
        .collect();

    assert_eq!(mgr.retained_outcomes(), OUTCOME_LIMIT);
    assert_eq!(mgr.outcome(tickets[0]), None);
    assert_eq!(mgr.outcome(tickets[tickets.len() - 1]), Some(&Outcome::Completed));
    assert!(mgr.is_idle());
}

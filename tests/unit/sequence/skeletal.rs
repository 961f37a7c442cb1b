use super::*;
use crate::config::model::{AnimationConfig, PropertyType};

fn skeleton() -> SkeletonState {
    SkeletonState::with_clips([("idle", 2.0), ("wave", 1.0)])
}

fn named(name: &str, delay_ms: f64) -> SequenceItem {
    let mut item = SequenceItem::new(
        PropertyType::Skeletal,
        AnimationConfig {
            animation_name: Some(name.to_owned()),
            ..AnimationConfig::default()
        },
    );
    item.delay = Some(delay_ms);
    item
}

fn clip(name: &str, start: f64, end: f64) -> SequenceItem {
    SequenceItem::new(
        PropertyType::Skeletal,
        AnimationConfig {
            animation_name: Some(name.to_owned()),
            start_time: Some(start),
            end_time: Some(end),
            ..AnimationConfig::default()
        },
    )
}

#[test]
fn tracks_follow_declaration_order() {
    let sk = skeleton();
    let mut plan = SkeletalTrackPlan::new();
    let a = plan.assign(&clip("idle", 0.0, 2.0), &sk).unwrap();
    let b = plan.assign(&clip("wave", 2.0, 3.0), &sk).unwrap();
    assert_eq!((a.track, b.track), (0, 1));
    assert_eq!(plan.track_of("wave"), Some(1));
    assert_eq!(plan.next_track(), 2);
}

#[test]
fn mix_only_when_start_precedes_previous_end() {
    let sk = skeleton();
    let mut plan = SkeletalTrackPlan::new();
    let _ = plan.assign(&clip("idle", 0.0, 2.0), &sk).unwrap();
    let touching = plan.assign(&clip("walk", 2.0, 4.0), &sk).unwrap();
    assert_eq!(touching.mix_from, None);
    let overlapping = plan.assign(&clip("run", 3.5, 5.0), &sk).unwrap();
    assert_eq!(overlapping.mix_from.as_deref(), Some("walk"));
}

#[test]
fn nameless_items_are_not_assigned() {
    let sk = skeleton();
    let mut plan = SkeletalTrackPlan::new();
    let item = SequenceItem::new(PropertyType::Skeletal, AnimationConfig::default());
    assert!(plan.assign(&item, &sk).is_none());
    assert_eq!(plan.next_track(), 0);
}

#[test]
fn named_clip_without_timing_overlaps_for_its_full_length() {
    let sk = skeleton();
    let mut plan = SkeletalTrackPlan::new();
    let _ = plan.assign(&named("idle", 0.0), &sk).unwrap();
    let wave = plan.assign(&named("wave", 500.0), &sk).unwrap();
    assert_eq!(wave.mix_from.as_deref(), Some("idle"));

    let after = plan.assign(&named("idle", 1500.0), &sk).unwrap();
    assert_eq!(after.mix_from, None);
}

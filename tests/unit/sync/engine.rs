use super::*;
use crate::sequence::engine::FINISHED_RUN_LIMIT;
use crate::stage::target::TargetKind;
use serde_json::json;

fn fade(to: f64, dur: f64) -> SequenceItem {
    SequenceItem::new(PropertyType::Opacity, AnimationConfig::to(to, dur))
}

#[test]
fn classify_handles_arrays_audio_objects_and_junk() {
    let arr = json!([
        {"type": "opacity", "config": {"endValue": 0.5, "duration": 100}},
        {"type": "no-such-type", "config": {}},
        {"type": "scale", "config": {"endValue": 2, "duration": 10}, "delay": 50}
    ]);
    let GroupSequence::Items(items) = GroupSequence::classify(&arr) else {
        panic!("expected items");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].delay, Some(50.0));

    let audio = json!({"audioKey": "music", "duration": 3000});
    let GroupSequence::Items(items) = GroupSequence::classify(&audio) else {
        panic!("expected audio item");
    };
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].property_type, PropertyType::Audio);
    assert_eq!(items[0].config.audio_key.as_deref(), Some("music"));

    assert_eq!(GroupSequence::classify(&json!({"foo": 1})), GroupSequence::Empty);
    assert_eq!(GroupSequence::classify(&json!("nope")), GroupSequence::Empty);
}

#[test]
fn sync_group_settles_when_all_targets_settle() {
    let mut stage = Stage::new();
    let a = stage.spawn(TargetKind::Image);
    let b = stage.spawn(TargetKind::Sprite);
    let mut sync = SyncEngine::default();
    let handle = sync.play_sync(
        &stage,
        vec![
            SyncGroup::new(a, vec![fade(0.0, 100.0)]),
            SyncGroup::new(b, vec![fade(0.0, 300.0)]),
            SyncGroup {
                target: b,
                sequence: GroupSequence::Empty,
            },
        ],
    );

    sync.advance(&mut stage, 150.0);
    assert!(!sync.is_settled(handle));
    let elapsed = sync.run_until_settled(&mut stage, handle, 50.0, 10_000.0).unwrap();
    assert_eq!(elapsed, 150.0);
    assert_eq!(stage.get(a).unwrap().alpha, 0.0);
    assert_eq!(stage.get(b).unwrap().alpha, 0.0);
}

#[test]
fn run_until_settled_enforces_limit_and_step() {
    let mut stage = Stage::new();
    let a = stage.spawn(TargetKind::Image);
    let mut sync = SyncEngine::default();
    let mut looped = fade(0.0, 100.0);
    looped.config.looped = true;
    let handle = sync.play_sync(&stage, vec![SyncGroup::new(a, vec![looped])]);

    assert!(sync.run_until_settled(&mut stage, handle, 0.0, 100.0).is_err());
    assert!(matches!(
        sync.run_until_settled(&mut stage, handle, 100.0, 1000.0),
        Err(ReelError::Animation(_))
    ));
}

#[test]
fn animate_multiple_fans_out_independently() {
    let mut stage = Stage::new();
    let img = stage.spawn(TargetKind::Image);
    let video = stage.spawn(TargetKind::Video);
    let mut sync = SyncEngine::default();
    let results = sync.animate_multiple(
        &mut stage,
        &[img, video],
        PropertyType::Rotation,
        &AnimationConfig::to(30.0, 0.0),
    );
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert_eq!(stage.get(img).unwrap().rotation_deg, 30.0);
}

#[test]
fn bulk_controls_are_per_target() {
    let mut stage = Stage::new();
    let a = stage.spawn(TargetKind::Image);
    let b = stage.spawn(TargetKind::Image);
    let mut sync = SyncEngine::default();
    let _ = sync.play_sync(
        &stage,
        vec![
            SyncGroup::new(a, vec![fade(0.0, 100.0)]),
            SyncGroup::new(b, vec![fade(0.0, 100.0)]),
        ],
    );
    sync.advance(&mut stage, 0.0);

    sync.pause_all(&mut stage, &[a]);
    sync.advance(&mut stage, 50.0);
    assert_eq!(stage.get(a).unwrap().alpha, 1.0);
    assert_eq!(stage.get(b).unwrap().alpha, 0.5);

    sync.resume_all(&mut stage, &[a]);
    sync.advance(&mut stage, 50.0);
    assert_eq!(stage.get(a).unwrap().alpha, 0.5);

    sync.reset_all(&mut stage, &[a]);
    assert_eq!(stage.get(a).unwrap().alpha, 1.0);
    assert!(!sync.manager().has_active_animation(a, None));

    sync.stop_all(&mut stage, &[b]);
    assert!(sync.manager().is_idle());
}

#[test]
fn reset_tears_everything_down() {
    let mut stage = Stage::new();
    let a = stage.spawn(TargetKind::Image);
    let mut sync = SyncEngine::default();
    let mut delayed = fade(0.0, 100.0);
    delayed.delay = Some(1000.0);
    let handle = sync.play_sync(&stage, vec![SyncGroup::new(a, vec![fade(0.5, 500.0), delayed])]);
    sync.advance(&mut stage, 10.0);

    sync.reset(&mut stage);
    assert!(sync.is_settled(handle));
    assert!(sync.manager().is_idle());
    assert_eq!(sync.sequences().pending_timers(), 0);
}

#[test]
fn settled_groups_are_forgotten() {
    let mut stage = Stage::new();
    let a = stage.spawn(TargetKind::Image);
    let mut sync = SyncEngine::default();
    for _ in 0..500 {
        let handle = sync.play_sync(&stage, vec![SyncGroup::new(a, vec![fade(0.0, 10.0)])]);
        sync.advance(&mut stage, 20.0);
        assert!(sync.is_settled(handle));
    }
    assert_eq!(sync.live_groups(), 0);
    assert_eq!(sync.sequences().live_runs(), 0);
    assert!(sync.sequences().finished_runs() <= FINISHED_RUN_LIMIT);

    let pending = sync.play_sync(&stage, vec![SyncGroup::new(a, vec![fade(1.0, 100.0)])]);
    sync.advance(&mut stage, 50.0);
    assert_eq!(sync.live_groups(), 1);
    assert!(!sync.is_settled(pending));
}

use super::*;

#[test]
fn video_lacks_rotation_and_tint() {
    let caps = Capabilities::for_kind(TargetKind::Video);
    assert!(caps.supports(Capability::Position));
    assert!(caps.supports(Capability::Alpha));
    assert!(!caps.supports(Capability::Rotation));
    assert!(!caps.supports(Capability::Tint));
}

#[test]
fn particles_only_take_transform_subset() {
    let caps = Capabilities::for_kind(TargetKind::Particles);
    for ok in [
        Capability::Position,
        Capability::Alpha,
        Capability::Scale,
        Capability::Visibility,
        Capability::Particles,
    ] {
        assert!(caps.supports(ok), "{ok:?}");
    }
    for no in [Capability::Rotation, Capability::Tint, Capability::Text] {
        assert!(!caps.supports(no), "{no:?}");
    }
}

#[test]
fn sound_is_audio_only_and_unknown_is_empty() {
    let caps = Capabilities::for_kind(TargetKind::Sound);
    assert!(caps.supports(Capability::Audio));
    assert!(!caps.supports(Capability::Position));
    assert!(Capabilities::for_kind(TargetKind::Unknown).is_empty());
}

#[test]
fn new_target_starts_neutral() {
    let t = Target::new(TargetId(3), TargetKind::Sprite);
    assert_eq!(t.alpha, 1.0);
    assert_eq!(t.scale, Vec2::new(1.0, 1.0));
    assert!(t.visible);
    assert!(t.tint.is_none());
    assert_eq!(t.label(), "#3");
}

#[test]
fn skeleton_tracks_use_configured_mix() {
    let mut sk = SkeletonState::with_clips([("walk", 1.0), ("run", 0.5)]);
    assert!(sk.set_animation(0, "walk", true));
    sk.set_mix("walk", "run", 0.2);
    assert!(sk.set_animation(0, "run", false));
    assert_eq!(sk.current(0), Some("run"));
    assert_eq!(sk.tracks[&0].mix_secs, 0.2);
    assert!(!sk.set_animation(1, "fly", false));
    sk.set_empty_animation(0, 0.0);
    assert_eq!(sk.current(0), None);
}

#[test]
fn particle_params_reject_inverted_speed() {
    let p = ParticleParams {
        speed_min: 10.0,
        speed_max: 1.0,
        ..ParticleParams::default()
    };
    assert!(!p.is_valid());
    assert!(ParticleParams::default().is_valid());
}

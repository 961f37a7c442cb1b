use crate::{
    config::model::{AnimationConfig, PropertyType},
    effects::unit::{AnimatableUnit, UnitClock, UnitState},
    foundation::error::{ReelError, ReelResult},
    stage::target::Target,
};

/// Cross-fade configured between overlapping clips on consecutive tracks.
pub const SKELETAL_MIX_SECONDS: f64 = 0.2;

/// Clip length in ms: `endTime - startTime` when both are set, else `duration`.
pub fn calculated_duration_ms(config: &AnimationConfig) -> Option<f64> {
    match (config.start_time, config.end_time) {
        (Some(start), Some(end)) if end.is_finite() && start.is_finite() && end > start => {
            Some((end - start) * 1000.0)
        }
        _ if config.duration > 0.0 => Some(config.duration),
        _ => None,
    }
}

/// Plays a named clip on one skeletal track and empties the track when the clip ends.
///
/// Clip time runs at the skeleton's `time_scale`, so a skeleton paused via
/// its time scale freezes every track.
#[derive(Debug, Default)]
pub struct SkeletalUnit {
    clock: UnitClock,
    track: u32,
    mix_from: Option<String>,
}

impl SkeletalUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit bound to `track`, cross-fading from `mix_from` when set.
    pub fn on_track(track: u32, mix_from: Option<String>) -> Self {
        Self {
            clock: UnitClock::default(),
            track,
            mix_from,
        }
    }

    pub fn track(&self) -> u32 {
        self.track
    }
}

impl AnimatableUnit for SkeletalUnit {
    fn property_type(&self) -> PropertyType {
        PropertyType::Skeletal
    }

    fn play(&mut self, target: &mut Target, config: &AnimationConfig) -> ReelResult<()> {
        config.validate()?;
        let name = config
            .animation_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ReelError::config("skeletal effect requires animationName"))?;

        let Some(clip_secs) = target.skeleton.clip_duration_secs(name) else {
            tracing::warn!(
                obj = %target.label(),
                animation = name,
                "skeletal clip not found, skipping"
            );
            self.clock.start(0.0, false);
            self.clock.complete();
            return Ok(());
        };

        if let Some(from) = self.mix_from.as_deref() {
            target.skeleton.set_mix(from, name, SKELETAL_MIX_SECONDS);
        }
        let _ = target
            .skeleton
            .set_animation(self.track, name, config.looped);

        let duration = calculated_duration_ms(config).unwrap_or(clip_secs * 1000.0);
        let open_ended = config.looped && calculated_duration_ms(config).is_none();
        self.clock.start(duration, open_ended);
        if self.clock.tick(0.0) {
            target.skeleton.set_empty_animation(self.track, 0.0);
        }
        Ok(())
    }

    fn advance(&mut self, target: &mut Target, dt_ms: f64) {
        let scaled = dt_ms * target.skeleton.time_scale.max(0.0);
        if self.clock.tick(scaled) {
            target.skeleton.set_empty_animation(self.track, 0.0);
        }
    }

    fn pause(&mut self, _target: &mut Target) {
        self.clock.pause();
    }

    fn resume(&mut self, _target: &mut Target) {
        self.clock.resume();
    }

    fn stop(&mut self, target: &mut Target) {
        if !self.clock.state.is_settled() {
            target.skeleton.set_empty_animation(self.track, 0.0);
        }
        self.clock.stop();
    }

    fn reset(&mut self, target: &mut Target) {
        self.clock.force_stop();
        target.skeleton.set_empty_animation(self.track, 0.0);
        target.skeleton.time_scale = 1.0;
    }

    fn state(&self) -> UnitState {
        self.clock.state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/skeletal.rs"]
mod tests;

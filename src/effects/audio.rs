use crate::{
    animation::tween::Tween,
    config::model::{AnimationConfig, PropertyType},
    effects::unit::{AnimatableUnit, UnitClock, UnitState},
    foundation::error::{ReelError, ReelResult},
    stage::target::Target,
};

/// Plays a sound handle, fading its volume from `startValue` to `endValue`.
///
/// The playback window is `duration` when set, else the clip length reported
/// by the sound handle. A clip of unknown length is started and left running;
/// the unit completes at once.
#[derive(Debug, Default)]
pub struct AudioUnit {
    clock: UnitClock,
    volume: Option<Tween<f64>>,
}

impl AudioUnit {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnimatableUnit for AudioUnit {
    fn property_type(&self) -> PropertyType {
        PropertyType::Audio
    }

    fn play(&mut self, target: &mut Target, config: &AnimationConfig) -> ReelResult<()> {
        config.validate()?;
        let key = config
            .audio_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ReelError::config("audio effect requires audioKey"))?;

        let from = match &config.start_value {
            Some(v) => v.as_number()?,
            None => 1.0,
        };
        let to = match &config.end_value {
            Some(v) => v.as_number()?,
            None => from,
        };

        let window = if config.duration > 0.0 {
            Some(config.duration)
        } else {
            target.audio.clip_duration_ms
        };

        target.audio.key = Some(key.to_owned());
        target.audio.playing = true;
        target.audio.paused = false;
        target.audio.position_ms = 0.0;
        target.audio.volume = from.max(0.0);

        match window {
            Some(ms) => {
                let fade = Tween::new(from, to, ms, config.ease());
                self.clock.start(ms, config.looped);
                self.volume = Some(fade.looped(config.looped));
                if self.clock.tick(0.0) {
                    target.audio.playing = false;
                }
            }
            None => {
                tracing::debug!(key, "audio clip length unknown, playing untracked");
                target.audio.volume = to.max(0.0);
                self.clock.start(0.0, false);
                self.clock.complete();
            }
        }
        Ok(())
    }

    fn advance(&mut self, target: &mut Target, dt_ms: f64) {
        if self.clock.state != UnitState::Playing {
            return;
        }
        target.audio.position_ms += dt_ms.max(0.0);
        if let Some(fade) = self.volume.as_mut() {
            target.audio.volume = fade.advance(dt_ms).max(0.0);
        }
        if self.clock.tick(dt_ms) {
            target.audio.playing = false;
        }
    }

    fn pause(&mut self, target: &mut Target) {
        if self.clock.state == UnitState::Playing {
            target.audio.paused = true;
        }
        self.clock.pause();
    }

    fn resume(&mut self, target: &mut Target) {
        if self.clock.state == UnitState::Paused {
            target.audio.paused = false;
        }
        self.clock.resume();
    }

    fn stop(&mut self, target: &mut Target) {
        if !self.clock.state.is_settled() {
            target.audio.playing = false;
            target.audio.paused = false;
        }
        self.clock.stop();
    }

    fn reset(&mut self, target: &mut Target) {
        self.clock.force_stop();
        target.audio.playing = false;
        target.audio.paused = false;
        target.audio.position_ms = 0.0;
        target.audio.volume = 1.0;
    }

    fn state(&self) -> UnitState {
        self.clock.state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/audio.rs"]
mod tests;

use crate::{
    config::model::{AnimationConfig, PropertyType},
    effects::unit::{AnimatableUnit, UnitClock, UnitState},
    foundation::error::{ReelError, ReelResult},
    stage::target::Target,
};

/// Reconfigures a particle emitter and turns emission on or off.
///
/// `endValue: false` switches emission off. Otherwise the emitter runs for
/// `duration` and is switched off on completion; a zero duration leaves it
/// emitting.
#[derive(Debug, Default)]
pub struct ParticleUnit {
    clock: UnitClock,
    timed: bool,
}

impl ParticleUnit {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnimatableUnit for ParticleUnit {
    fn property_type(&self) -> PropertyType {
        PropertyType::Particle
    }

    fn play(&mut self, target: &mut Target, config: &AnimationConfig) -> ReelResult<()> {
        config.validate()?;
        if let Some(params) = &config.particle {
            if !params.is_valid() {
                return Err(ReelError::config(
                    "particle params must be finite with speedMin <= speedMax",
                ));
            }
            target.emitter.params = params.clone();
        }
        let emit = match &config.end_value {
            Some(v) => v.as_bool()?,
            None => true,
        };
        target.emitter.emitting = emit;

        self.timed = emit && config.duration > 0.0;
        self.clock.start(config.duration, config.looped && self.timed);
        if !self.timed {
            self.clock.complete();
        }
        Ok(())
    }

    fn advance(&mut self, target: &mut Target, dt_ms: f64) {
        if self.clock.tick(dt_ms) && self.timed {
            target.emitter.emitting = false;
        }
    }

    fn pause(&mut self, target: &mut Target) {
        if self.clock.state == UnitState::Playing {
            target.emitter.emitting = false;
        }
        self.clock.pause();
    }

    fn resume(&mut self, target: &mut Target) {
        if self.clock.state == UnitState::Paused {
            target.emitter.emitting = true;
        }
        self.clock.resume();
    }

    fn stop(&mut self, target: &mut Target) {
        if !self.clock.state.is_settled() {
            target.emitter.emitting = false;
        }
        self.clock.stop();
    }

    fn reset(&mut self, target: &mut Target) {
        self.clock.force_stop();
        target.emitter.emitting = false;
    }

    fn state(&self) -> UnitState {
        self.clock.state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/particle.rs"]
mod tests;

use crate::{
    config::model::{AnimationConfig, PropertyType},
    effects::unit::{AnimatableUnit, UnitClock, UnitState},
    foundation::error::ReelResult,
    stage::target::Target,
};

/// Shows or hides a target.
///
/// With a `startValue` the start state holds for `duration` and the end state
/// is applied on completion; without one the end state applies immediately.
#[derive(Debug, Default)]
pub struct VisibilityUnit {
    clock: UnitClock,
    end: bool,
}

impl VisibilityUnit {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnimatableUnit for VisibilityUnit {
    fn property_type(&self) -> PropertyType {
        PropertyType::Visibility
    }

    fn play(&mut self, target: &mut Target, config: &AnimationConfig) -> ReelResult<()> {
        config.validate()?;
        self.end = config
            .require_end_value(PropertyType::Visibility)?
            .as_bool()?;
        match &config.start_value {
            Some(start) => target.visible = start.as_bool()?,
            None => target.visible = self.end,
        }
        self.clock.start(config.duration, false);
        if self.clock.tick(0.0) {
            target.visible = self.end;
        }
        Ok(())
    }

    fn advance(&mut self, target: &mut Target, dt_ms: f64) {
        if self.clock.tick(dt_ms) {
            target.visible = self.end;
        }
    }

    fn pause(&mut self, _target: &mut Target) {
        self.clock.pause();
    }

    fn resume(&mut self, _target: &mut Target) {
        self.clock.resume();
    }

    fn stop(&mut self, _target: &mut Target) {
        self.clock.stop();
    }

    fn reset(&mut self, target: &mut Target) {
        self.clock.force_stop();
        target.visible = true;
    }

    fn state(&self) -> UnitState {
        self.clock.state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/visibility.rs"]
mod tests;

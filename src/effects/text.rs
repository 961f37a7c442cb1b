use crate::{
    config::{
        model::{AnimationConfig, PropertyType},
        value::PropertyValue,
    },
    effects::unit::{AnimatableUnit, UnitClock, UnitState},
    foundation::error::{ReelError, ReelResult},
    stage::target::Target,
};

/// Replaces text content and style, optionally revealing it character by character.
#[derive(Debug, Default)]
pub struct TextUnit {
    clock: UnitClock,
    typewriter: bool,
    total_chars: usize,
}

impl TextUnit {
    pub fn new() -> Self {
        Self::default()
    }

    fn reveal(&self, target: &mut Target) {
        if !self.typewriter {
            return;
        }
        let shown = (self.clock.progress() * self.total_chars as f64).floor() as usize;
        target.text.revealed = if shown >= self.total_chars {
            None
        } else {
            Some(shown)
        };
    }
}

impl AnimatableUnit for TextUnit {
    fn property_type(&self) -> PropertyType {
        PropertyType::Text
    }

    fn play(&mut self, target: &mut Target, config: &AnimationConfig) -> ReelResult<()> {
        config.validate()?;
        let content = match (&config.text_value, &config.end_value) {
            (Some(s), _) => s.clone(),
            (None, Some(PropertyValue::Text(s))) => s.clone(),
            _ => return Err(ReelError::config("text effect requires textValue")),
        };
        if let Some(style) = &config.text_style {
            target.text.style = style.clone();
        }
        self.total_chars = content.chars().count();
        self.typewriter = config.typewriter && config.duration > 0.0;
        target.text.content = content;
        target.text.revealed = None;

        self.clock.start(config.duration, false);
        let _ = self.clock.tick(0.0);
        self.reveal(target);
        Ok(())
    }

    fn advance(&mut self, target: &mut Target, dt_ms: f64) {
        if self.clock.state != UnitState::Playing {
            return;
        }
        let _ = self.clock.tick(dt_ms);
        self.reveal(target);
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
        target.text.revealed = None;
    }

    fn state(&self) -> UnitState {
        self.clock.state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/text.rs"]
mod tests;

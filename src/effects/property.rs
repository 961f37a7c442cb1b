use std::fmt;
use std::marker::PhantomData;

use crate::{
    animation::tween::{Lerp, Tween},
    config::{
        model::{AnimationConfig, PropertyType},
        value::PropertyValue,
    },
    effects::unit::{AnimatableUnit, UnitState},
    foundation::{
        core::{Point, Rgb, Vec2},
        error::ReelResult,
    },
    stage::target::Target,
};

/// Accessor for one tweenable scalar/vector property of a target.
pub trait TweenProperty: 'static {
    type Value: Lerp + Clone + fmt::Debug;

    const TYPE: PropertyType;

    fn read(target: &Target) -> Self::Value;

    fn write(target: &mut Target, value: Self::Value);

    fn parse(value: &PropertyValue) -> ReelResult<Self::Value>;

    fn neutral(target: &mut Target);
}

#[derive(Debug)]
pub struct PositionProp;

impl TweenProperty for PositionProp {
    type Value = Point;
    const TYPE: PropertyType = PropertyType::Position;

    fn read(target: &Target) -> Point {
        target.position
    }

    fn write(target: &mut Target, value: Point) {
        target.position = value;
    }

    fn parse(value: &PropertyValue) -> ReelResult<Point> {
        value.as_point()
    }

    // Position has no neutral value; reset leaves it where the effect stopped.
    fn neutral(_target: &mut Target) {}
}

#[derive(Debug)]
pub struct ScaleProp;

impl TweenProperty for ScaleProp {
    type Value = Vec2;
    const TYPE: PropertyType = PropertyType::Scale;

    fn read(target: &Target) -> Vec2 {
        target.scale
    }

    fn write(target: &mut Target, value: Vec2) {
        target.scale = value;
    }

    fn parse(value: &PropertyValue) -> ReelResult<Vec2> {
        value.as_scale()
    }

    fn neutral(target: &mut Target) {
        target.scale = Vec2::new(1.0, 1.0);
    }
}

#[derive(Debug)]
pub struct RotationProp;

impl TweenProperty for RotationProp {
    type Value = f64;
    const TYPE: PropertyType = PropertyType::Rotation;

    fn read(target: &Target) -> f64 {
        target.rotation_deg
    }

    fn write(target: &mut Target, value: f64) {
        target.rotation_deg = value;
    }

    fn parse(value: &PropertyValue) -> ReelResult<f64> {
        value.as_number()
    }

    fn neutral(target: &mut Target) {
        target.rotation_deg = 0.0;
    }
}

#[derive(Debug)]
pub struct OpacityProp;

impl TweenProperty for OpacityProp {
    type Value = f64;
    const TYPE: PropertyType = PropertyType::Opacity;

    fn read(target: &Target) -> f64 {
        target.alpha
    }

    fn write(target: &mut Target, value: f64) {
        target.alpha = value.clamp(0.0, 1.0);
    }

    fn parse(value: &PropertyValue) -> ReelResult<f64> {
        value.as_number()
    }

    fn neutral(target: &mut Target) {
        target.alpha = 1.0;
    }
}

#[derive(Debug)]
pub struct ColorProp;

impl TweenProperty for ColorProp {
    type Value = Rgb;
    const TYPE: PropertyType = PropertyType::Color;

    fn read(target: &Target) -> Rgb {
        target.tint.unwrap_or(Rgb::WHITE)
    }

    fn write(target: &mut Target, value: Rgb) {
        target.tint = Some(value);
    }

    fn parse(value: &PropertyValue) -> ReelResult<Rgb> {
        value.as_color()
    }

    fn neutral(target: &mut Target) {
        target.tint = None;
    }
}

/// Interpolating unit shared by the position/scale/rotation/opacity/colour effects.
pub struct TweenUnit<P: TweenProperty> {
    tween: Option<Tween<P::Value>>,
    state: UnitState,
    _prop: PhantomData<P>,
}

pub type PositionUnit = TweenUnit<PositionProp>;
pub type ScaleUnit = TweenUnit<ScaleProp>;
pub type RotationUnit = TweenUnit<RotationProp>;
pub type OpacityUnit = TweenUnit<OpacityProp>;
pub type ColorUnit = TweenUnit<ColorProp>;

impl<P: TweenProperty> TweenUnit<P> {
    pub fn new() -> Self {
        Self {
            tween: None,
            state: UnitState::Idle,
            _prop: PhantomData,
        }
    }
}

impl<P: TweenProperty> Default for TweenUnit<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TweenProperty> fmt::Debug for TweenUnit<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenUnit")
            .field("type", &P::TYPE)
            .field("state", &self.state)
            .field("tween", &self.tween)
            .finish()
    }
}

impl<P: TweenProperty> AnimatableUnit for TweenUnit<P> {
    fn property_type(&self) -> PropertyType {
        P::TYPE
    }

    fn play(&mut self, target: &mut Target, config: &AnimationConfig) -> ReelResult<()> {
        config.validate()?;
        let end = P::parse(config.require_end_value(P::TYPE)?)?;
        let start = match &config.start_value {
            Some(v) => P::parse(v)?,
            None => P::read(target),
        };

        let tween = Tween::new(start, end, config.duration, config.ease()).looped(config.looped);
        P::write(target, tween.sample());
        self.state = if tween.is_finished() {
            UnitState::Completed
        } else {
            UnitState::Playing
        };
        self.tween = Some(tween);
        Ok(())
    }

    fn advance(&mut self, target: &mut Target, dt_ms: f64) {
        if self.state != UnitState::Playing {
            return;
        }
        let Some(tween) = self.tween.as_mut() else {
            return;
        };
        P::write(target, tween.advance(dt_ms));
        if tween.is_finished() {
            self.state = UnitState::Completed;
        }
    }

    fn pause(&mut self, _target: &mut Target) {
        if self.state == UnitState::Playing {
            if let Some(tween) = self.tween.as_mut() {
                tween.pause();
            }
            self.state = UnitState::Paused;
        }
    }

    fn resume(&mut self, _target: &mut Target) {
        if self.state == UnitState::Paused {
            if let Some(tween) = self.tween.as_mut() {
                tween.resume();
            }
            self.state = UnitState::Playing;
        }
    }

    fn stop(&mut self, _target: &mut Target) {
        if !self.state.is_settled() {
            self.state = UnitState::Stopped;
        }
        self.tween = None;
    }

    fn reset(&mut self, target: &mut Target) {
        self.state = UnitState::Stopped;
        self.tween = None;
        P::neutral(target);
    }

    fn state(&self) -> UnitState {
        self.state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/property.rs"]
mod tests;

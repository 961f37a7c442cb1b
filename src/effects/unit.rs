use std::fmt;

use crate::{
    config::model::{AnimationConfig, PropertyType},
    foundation::error::ReelResult,
    stage::target::Target,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Lifecycle position of an animatable unit.
pub enum UnitState {
    /// Constructed, `play` not called yet.
    Idle,
    /// Running; `advance` moves it forward.
    Playing,
    /// Frozen by `pause`.
    Paused,
    /// Reached its natural end.
    Completed,
    /// Cancelled by `stop` or `reset`; never completes.
    Stopped,
}

impl UnitState {
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Completed | Self::Stopped)
    }
}

/// One property type's play/pause/resume/stop/reset implementation for a single target.
///
/// A unit is single-use: the manager constructs a fresh one per `animate` call.
pub trait AnimatableUnit: fmt::Debug {
    fn property_type(&self) -> PropertyType;

    /// Start the effect. Hard precondition failures are returned as errors;
    /// soft ones are logged and the unit completes as a no-op.
    fn play(&mut self, target: &mut Target, config: &AnimationConfig) -> ReelResult<()>;

    /// Move the effect forward by `dt_ms` of engine time.
    fn advance(&mut self, target: &mut Target, dt_ms: f64);

    fn pause(&mut self, target: &mut Target);

    fn resume(&mut self, target: &mut Target);

    /// Hard cancel. Takes effect immediately.
    fn stop(&mut self, target: &mut Target);

    /// Stop and restore the type's neutral default on the target.
    fn reset(&mut self, target: &mut Target);

    fn state(&self) -> UnitState;
}

/// Shared clock for units that are bounded by a plain duration.
#[derive(Clone, Copy, Debug)]
pub(crate) struct UnitClock {
    pub(crate) state: UnitState,
    pub(crate) elapsed_ms: f64,
    pub(crate) duration_ms: f64,
    pub(crate) looped: bool,
}

impl Default for UnitClock {
    fn default() -> Self {
        Self {
            state: UnitState::Idle,
            elapsed_ms: 0.0,
            duration_ms: 0.0,
            looped: false,
        }
    }
}

impl UnitClock {
    pub(crate) fn start(&mut self, duration_ms: f64, looped: bool) {
        self.state = UnitState::Playing;
        self.elapsed_ms = 0.0;
        self.duration_ms = duration_ms.max(0.0);
        self.looped = looped;
    }

    /// Advance while playing; returns `true` on the step that reaches the end.
    pub(crate) fn tick(&mut self, dt_ms: f64) -> bool {
        if self.state != UnitState::Playing {
            return false;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        if !self.looped && self.elapsed_ms >= self.duration_ms {
            self.state = UnitState::Completed;
            return true;
        }
        false
    }

    pub(crate) fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        if self.looped {
            return (self.elapsed_ms % self.duration_ms) / self.duration_ms;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub(crate) fn complete(&mut self) {
        self.state = UnitState::Completed;
    }

    pub(crate) fn pause(&mut self) {
        if self.state == UnitState::Playing {
            self.state = UnitState::Paused;
        }
    }

    pub(crate) fn resume(&mut self) {
        if self.state == UnitState::Paused {
            self.state = UnitState::Playing;
        }
    }

    pub(crate) fn stop(&mut self) {
        if !self.state.is_settled() {
            self.state = UnitState::Stopped;
        }
    }

    pub(crate) fn force_stop(&mut self) {
        self.state = UnitState::Stopped;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/unit.rs"]
mod tests;

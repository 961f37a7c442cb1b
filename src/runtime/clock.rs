use std::time::Instant;

use crate::foundation::core::TimeMs;

/// Source of engine time. `tick` yields the milliseconds elapsed since the previous tick.
pub trait Clock {
    fn now(&self) -> TimeMs;

    fn tick(&mut self) -> f64;
}

/// Manually advanced clock for deterministic runs and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct VirtualClock {
    now: TimeMs,
    last_tick: TimeMs,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward; negative or non-finite steps are ignored.
    pub fn advance(&mut self, ms: f64) {
        if ms.is_finite() && ms > 0.0 {
            self.now = self.now.add_ms(ms);
        }
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> TimeMs {
        self.now
    }

    fn tick(&mut self) -> f64 {
        let dt = self.now.since(self.last_tick);
        self.last_tick = self.now;
        dt
    }
}

/// Monotonic wall clock backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct WallClock {
    origin: Instant,
    last_tick: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            origin: now,
            last_tick: now,
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&self) -> TimeMs {
        TimeMs(self.origin.elapsed().as_secs_f64() * 1000.0)
    }

    fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f64() * 1000.0;
        self.last_tick = now;
        dt
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/clock.rs"]
mod tests;

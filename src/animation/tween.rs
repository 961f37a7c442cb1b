use crate::{
    animation::ease::Ease,
    foundation::core::{Point, Rgb, Vec2},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgb {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

/// Time-boxed interpolation between two values.
///
/// A tween only tracks its own clock; writing the sampled value onto a target
/// is the caller's job.
#[derive(Clone, Debug)]
pub struct Tween<T> {
    from: T,
    to: T,
    duration_ms: f64,
    ease: Ease,
    looped: bool,
    elapsed_ms: f64,
    paused: bool,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    pub fn new(from: T, to: T, duration_ms: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            ease,
            looped: false,
            elapsed_ms: 0.0,
            paused: false,
        }
    }

    pub fn looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        !self.looped && self.elapsed_ms >= self.duration_ms
    }

    pub fn end_value(&self) -> &T {
        &self.to
    }

    /// Progress in `[0, 1]` before easing.
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        if self.looped {
            return (self.elapsed_ms % self.duration_ms) / self.duration_ms;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn sample(&self) -> T {
        if self.is_finished() {
            return self.to.clone();
        }
        T::lerp(&self.from, &self.to, self.ease.apply(self.progress()))
    }

    /// Step the tween clock and return the value at the new position.
    pub fn advance(&mut self, dt_ms: f64) -> T {
        if !self.paused && dt_ms > 0.0 {
            self.elapsed_ms += dt_ms;
            if self.looped && self.duration_ms <= 0.0 {
                self.elapsed_ms = 0.0;
            }
        }
        self.sample()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;

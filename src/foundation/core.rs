use std::cmp::Ordering;
use std::fmt;

use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Point, Vec2};

/// Stable identifier of a renderable target inside a [`crate::Stage`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point on the engine timeline, in milliseconds.
///
/// Ordered with `f64::total_cmp` so it can key timer queues.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct TimeMs(pub f64);

impl TimeMs {
    pub const ZERO: Self = Self(0.0);

    pub fn from_secs(secs: f64) -> Self {
        Self(secs * 1000.0)
    }

    pub fn as_secs(self) -> f64 {
        self.0 / 1000.0
    }

    pub fn add_ms(self, ms: f64) -> Self {
        Self(self.0 + ms)
    }

    pub fn since(self, earlier: Self) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

impl PartialEq for TimeMs {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TimeMs {}

impl PartialOrd for TimeMs {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeMs {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// 24-bit RGB colour (`0xRRGGBB`), the tint format used by renderable targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Self = Self(0xFF_FF_FF);

    pub fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Self((u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b))
    }

    pub fn channels(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }

    /// Parse `"0xRRGGBB"`, `"#RRGGBB"` or bare `"RRGGBB"`.
    pub fn parse_hex(s: &str) -> ReelResult<Self> {
        let t = s.trim();
        let digits = t
            .strip_prefix("0x")
            .or_else(|| t.strip_prefix("0X"))
            .or_else(|| t.strip_prefix('#'))
            .unwrap_or(t);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ReelError::validation(format!("invalid colour '{s}'")));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ReelError::validation(format!("invalid colour '{s}'")))
    }

    /// Accept an integer in `0..=0xFFFFFF`.
    pub fn from_number(n: f64) -> ReelResult<Self> {
        if !n.is_finite() || n < 0.0 || n > f64::from(0xFF_FF_FF_u32) || n.fract() != 0.0 {
            return Err(ReelError::validation(format!(
                "colour {n} must be an integer in 0..=0xFFFFFF"
            )));
        }
        Ok(Self(n as u32))
    }

    pub fn lerp(self, to: Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        let (r0, g0, b0) = self.channels();
        let (r1, g1, b1) = to.channels();
        Self::from_channels(lerp_u8(r0, r1, t), lerp_u8(g0, g1, t), lerp_u8(b0, b1, t))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:06X}", self.0)
    }
}

/// Pixel dimensions of a canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    pub width: f64,
    pub height: f64,
}

impl Resolution {
    pub fn new(width: f64, height: f64) -> ReelResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ReelError::validation(
                "resolution width/height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

/// Maps timeline coordinates authored at `design` resolution onto the `output` canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoordinateSpace {
    pub design: Resolution,
    pub output: Resolution,
}

impl CoordinateSpace {
    pub fn identity(res: Resolution) -> Self {
        Self {
            design: res,
            output: res,
        }
    }

    pub fn factor(&self) -> Vec2 {
        Vec2::new(
            self.output.width / self.design.width,
            self.output.height / self.design.height,
        )
    }

    pub fn remap_point(&self, p: Point) -> Point {
        let k = self.factor();
        Point::new(p.x * k.x, p.y * k.y)
    }
}

impl Default for CoordinateSpace {
    fn default() -> Self {
        Self::identity(Resolution {
            width: 1920.0,
            height: 1080.0,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

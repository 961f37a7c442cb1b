use std::f64::consts::PI;
use std::fmt;

use crate::foundation::error::{ReelError, ReelResult};

/// Curve family of a named easing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EaseFamily {
    Quad,
    Cubic,
    Quart,
    Quint,
    Sine,
    Expo,
    Circ,
    Back,
    Bounce,
    Elastic,
}

impl EaseFamily {
    pub const ALL: [Self; 10] = [
        Self::Quad,
        Self::Cubic,
        Self::Quart,
        Self::Quint,
        Self::Sine,
        Self::Expo,
        Self::Circ,
        Self::Back,
        Self::Bounce,
        Self::Elastic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Quad => "Quad",
            Self::Cubic => "Cubic",
            Self::Quart => "Quart",
            Self::Quint => "Quint",
            Self::Sine => "Sine",
            Self::Expo => "Expo",
            Self::Circ => "Circ",
            Self::Back => "Back",
            Self::Bounce => "Bounce",
            Self::Elastic => "Elastic",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
    }

    /// The ease-in form of the curve on `[0, 1]`.
    fn ease_in(self, t: f64) -> f64 {
        match self {
            Self::Quad => t * t,
            Self::Cubic => t * t * t,
            Self::Quart => t.powi(4),
            Self::Quint => t.powi(5),
            Self::Sine => 1.0 - (t * PI / 2.0).cos(),
            Self::Expo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Self::Circ => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Self::Back => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                c3 * t * t * t - c1 * t * t
            }
            Self::Bounce => 1.0 - bounce_out(1.0 - t),
            Self::Elastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    let c4 = (2.0 * PI) / 3.0;
                    -(2f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * c4).sin()
                }
            }
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    let n1 = 7.5625;
    let d1 = 2.75;
    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

/// Which end(s) of the curve are eased.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EaseDir {
    In,
    Out,
    InOut,
}

impl EaseDir {
    fn suffix(self) -> &'static str {
        match self {
            Self::In => "easeIn",
            Self::Out => "easeOut",
            Self::InOut => "easeInOut",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easein" | "in" => Some(Self::In),
            "easeout" | "out" => Some(Self::Out),
            "easeinout" | "inout" => Some(Self::InOut),
            _ => None,
        }
    }
}

/// A named easing curve from the closed whitelist.
///
/// Names are `Linear` or `<Family>.<easeIn|easeOut|easeInOut>`; a bare family
/// name means its `easeOut` form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    #[default]
    Linear,
    Curve(EaseFamily, EaseDir),
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::Curve(family, EaseDir::In) => family.ease_in(t),
            Self::Curve(family, EaseDir::Out) => 1.0 - family.ease_in(1.0 - t),
            Self::Curve(family, EaseDir::InOut) => {
                if t < 0.5 {
                    family.ease_in(2.0 * t) / 2.0
                } else {
                    1.0 - family.ease_in(2.0 - 2.0 * t) / 2.0
                }
            }
        }
    }

    pub fn from_name(name: &str) -> ReelResult<Self> {
        let trimmed = name.trim();
        if trimmed.eq_ignore_ascii_case("linear") {
            return Ok(Self::Linear);
        }
        let (family, dir) = match trimmed.split_once('.') {
            Some((f, d)) => (f, Some(d)),
            None => (trimmed, None),
        };
        let family = EaseFamily::parse(family)
            .ok_or_else(|| ReelError::validation(format!("unknown easing '{name}'")))?;
        let dir = match dir {
            None => EaseDir::Out,
            Some(d) => EaseDir::parse(d)
                .ok_or_else(|| ReelError::validation(format!("unknown easing '{name}'")))?,
        };
        Ok(Self::Curve(family, dir))
    }

    pub fn is_known_name(name: &str) -> bool {
        Self::from_name(name).is_ok()
    }

    /// Combine a timeline entry's separate `easeIn` / `easeOut` names into one curve.
    ///
    /// Linear on both ends stays linear; a single eased end selects that
    /// direction; two eased ends use the `easeIn` family in its `easeInOut` form.
    pub fn from_in_out(ease_in: &str, ease_out: &str) -> ReelResult<Self> {
        let a = Self::from_name(ease_in)?;
        let b = Self::from_name(ease_out)?;
        Ok(match (a, b) {
            (Self::Linear, Self::Linear) => Self::Linear,
            (Self::Linear, Self::Curve(f, _)) => Self::Curve(f, EaseDir::Out),
            (Self::Curve(f, _), Self::Linear) => Self::Curve(f, EaseDir::In),
            (Self::Curve(f, _), Self::Curve(_, _)) => Self::Curve(f, EaseDir::InOut),
        })
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("Linear"),
            Self::Curve(family, dir) => write!(f, "{}.{}", family.name(), dir.suffix()),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = ReelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value)
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;

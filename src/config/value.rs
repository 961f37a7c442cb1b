use crate::foundation::{
    core::{Point, Rgb, Vec2},
    error::{ReelError, ReelResult},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// `{x, y, z?}` literal as written in configs and timelines.
pub struct PointValue {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Start/end value of an effect. The effect type decides how it is read.
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    Point(PointValue),
    Text(String),
}

impl PropertyValue {
    pub fn point(x: f64, y: f64) -> Self {
        Self::Point(PointValue { x, y, z: None })
    }

    pub fn as_number(&self) -> ReelResult<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Ok(*n),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| ReelError::config(format!("expected a number, got '{s}'"))),
            other => Err(ReelError::config(format!(
                "expected a number, got {other:?}"
            ))),
        }
    }

    pub fn as_point(&self) -> ReelResult<Point> {
        match self {
            Self::Point(p) => Ok(Point::new(p.x, p.y)),
            other => Err(ReelError::config(format!(
                "expected an {{x, y}} point, got {other:?}"
            ))),
        }
    }

    /// Scale accepts a uniform number or an `{x, y}` pair.
    pub fn as_scale(&self) -> ReelResult<Vec2> {
        match self {
            Self::Point(p) => Ok(Vec2::new(p.x, p.y)),
            other => {
                let k = other.as_number()?;
                Ok(Vec2::new(k, k))
            }
        }
    }

    pub fn as_color(&self) -> ReelResult<Rgb> {
        match self {
            Self::Number(n) => Rgb::from_number(*n),
            Self::Text(s) => Rgb::parse_hex(s),
            other => Err(ReelError::config(format!(
                "expected a colour, got {other:?}"
            ))),
        }
    }

    pub fn as_bool(&self) -> ReelResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Number(n) => Ok(*n != 0.0),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "visible" | "show" => Ok(true),
                "false" | "hidden" | "hide" => Ok(false),
                _ => Err(ReelError::config(format!("expected a boolean, got '{s}'"))),
            },
            Self::Point(_) => Err(ReelError::config("expected a boolean, got a point")),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/value.rs"]
mod tests;

use std::fmt;

use crate::{
    animation::ease::Ease,
    config::value::PropertyValue,
    foundation::error::{ReelError, ReelResult},
    stage::target::{ParticleParams, TextStyle},
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Property-type tag of an effect; one live effect per `(target, type)`.
pub enum PropertyType {
    Position,
    Scale,
    Rotation,
    #[serde(alias = "alpha")]
    Opacity,
    #[serde(alias = "tint")]
    Color,
    Visibility,
    Text,
    Audio,
    Particle,
    #[serde(alias = "spine")]
    Skeletal,
}

impl PropertyType {
    pub const ALL: [Self; 10] = [
        Self::Position,
        Self::Scale,
        Self::Rotation,
        Self::Opacity,
        Self::Color,
        Self::Visibility,
        Self::Text,
        Self::Audio,
        Self::Particle,
        Self::Skeletal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Scale => "scale",
            Self::Rotation => "rotation",
            Self::Opacity => "opacity",
            Self::Color => "color",
            Self::Visibility => "visibility",
            Self::Text => "text",
            Self::Audio => "audio",
            Self::Particle => "particle",
            Self::Skeletal => "skeletal",
        }
    }

    /// Types whose state comes from external files rather than an `endValue`.
    pub fn needs_end_value(self) -> bool {
        !matches!(
            self,
            Self::Skeletal | Self::Audio | Self::Text | Self::Particle
        )
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One scheduled effect instance.
pub struct AnimationConfig {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_value: Option<PropertyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_value: Option<PropertyValue>,
    /// Milliseconds.
    #[serde(default)]
    pub duration: f64,
    /// Curve id; unknown ids fall back to `Linear` with a warning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
    /// Milliseconds.
    #[serde(default)]
    pub delay: f64,
    #[serde(rename = "loop", default)]
    pub looped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
    #[serde(default)]
    pub typewriter: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particle: Option<ParticleParams>,
    /// Seconds on the timeline (skeletal clips).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    /// Seconds on the timeline (skeletal clips).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
}

impl AnimationConfig {
    /// Config tweening towards `end` over `duration_ms`.
    pub fn to(end: impl Into<PropertyValue>, duration_ms: f64) -> Self {
        Self {
            end_value: Some(end.into()),
            duration: duration_ms,
            ..Self::default()
        }
    }

    pub fn from_value(mut self, start: impl Into<PropertyValue>) -> Self {
        self.start_value = Some(start.into());
        self
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay = delay_ms;
        self
    }

    pub fn with_easing(mut self, easing: &str) -> Self {
        self.easing = Some(easing.to_owned());
        self
    }

    pub fn validate(&self) -> ReelResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ReelError::config("duration must be finite and >= 0"));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(ReelError::config("delay must be finite and >= 0"));
        }
        Ok(())
    }

    /// Resolve the easing id, falling back to `Linear` for unknown names.
    pub fn ease(&self) -> Ease {
        match self.easing.as_deref() {
            None => Ease::Linear,
            Some(name) => Ease::from_name(name).unwrap_or_else(|_| {
                tracing::warn!(easing = name, "unknown easing, falling back to Linear");
                Ease::Linear
            }),
        }
    }

    pub fn require_end_value(&self, ty: PropertyType) -> ReelResult<&PropertyValue> {
        self.end_value
            .as_ref()
            .ok_or_else(|| ReelError::config(format!("{ty} effect requires endValue")))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// An entry of a per-target sequence.
pub struct SequenceItem {
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub config: AnimationConfig,
    /// Overrides `config.delay` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
}

impl SequenceItem {
    pub fn new(property_type: PropertyType, config: AnimationConfig) -> Self {
        Self {
            property_type,
            config,
            delay: None,
        }
    }

    pub fn effective_delay_ms(&self) -> f64 {
        self.delay.unwrap_or(self.config.delay)
    }

    /// Check the effective delay and fold it into `config.delay`, so the unit
    /// validates the delay that actually applies.
    pub fn resolve_delay(&mut self) -> ReelResult<f64> {
        let delay = self.effective_delay_ms();
        if !delay.is_finite() || delay < 0.0 {
            return Err(ReelError::config(format!(
                "delay must be finite and >= 0, got {delay}"
            )));
        }
        self.config.delay = delay;
        Ok(delay)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;

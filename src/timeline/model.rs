use std::collections::BTreeMap;

use crate::{
    config::{model::PropertyType, value::PropertyValue},
    stage::target::TargetKind,
};

/// Top-level key holding the element array of a timeline document.
pub const TIMELINE_KEY: &str = "template video json";

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Property track of a timeline element.
pub enum TrackName {
    Scale,
    Position,
    Color,
    Opacity,
    Rotation,
}

impl TrackName {
    pub const ALL: [Self; 5] = [
        Self::Scale,
        Self::Position,
        Self::Color,
        Self::Opacity,
        Self::Rotation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Scale => "scale",
            Self::Position => "position",
            Self::Color => "color",
            Self::Opacity => "opacity",
            Self::Rotation => "rotation",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == s)
    }

    pub fn property_type(self) -> PropertyType {
        match self {
            Self::Scale => PropertyType::Scale,
            Self::Position => PropertyType::Position,
            Self::Color => PropertyType::Color,
            Self::Opacity => PropertyType::Opacity,
            Self::Rotation => PropertyType::Rotation,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One time-boxed animation on a track. Times are seconds.
pub struct TimelineAnimation {
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_value: Option<PropertyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_value: Option<PropertyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease_out: Option<String>,
}

impl TimelineAnimation {
    /// Finite, non-negative start and `end > start`.
    pub fn has_valid_range(&self) -> bool {
        self.start_time.is_finite()
            && self.end_time.is_finite()
            && self.start_time >= 0.0
            && self.end_time > self.start_time
    }

    /// Half-open interval overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InitialPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InitialScale {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Element state before any animation runs, after defaulting.
pub struct InitialState {
    pub position: InitialPosition,
    pub scale: InitialScale,
    pub opacity: f64,
    pub rotation: f64,
    pub color: String,
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            position: InitialPosition {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
            scale: InitialScale { x: 1.0, y: 1.0 },
            opacity: 1.0,
            rotation: 0.0,
            color: "0xFFFFFF".to_owned(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Interval (seconds) during which the element is visible.
pub struct OnScreenWindow {
    pub start_time: f64,
    pub end_time: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A normalized timeline element. Read-only once validated.
pub struct TimelineElement {
    pub element_name: String,
    pub asset_type: String,
    pub asset_name: String,
    pub initial_state: InitialState,
    #[serde(default)]
    pub timeline: BTreeMap<TrackName, Vec<TimelineAnimation>>,
    #[serde(default)]
    pub on_screen: Vec<OnScreenWindow>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    #[serde(alias = "audio")]
    Sound,
    Video,
    #[serde(alias = "particles")]
    Particle,
    #[serde(alias = "sprite")]
    Spritesheet,
    #[serde(alias = "spine")]
    Skeleton,
    Text,
}

impl AssetKind {
    /// Parse an element's `assetType`, accepting the same aliases as the asset map.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Some(Self::Image),
            "sound" | "audio" => Some(Self::Sound),
            "video" => Some(Self::Video),
            "particle" | "particles" => Some(Self::Particle),
            "spritesheet" | "sprite" => Some(Self::Spritesheet),
            "skeleton" | "spine" => Some(Self::Skeleton),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn target_kind(self) -> TargetKind {
        match self {
            Self::Image => TargetKind::Image,
            Self::Sound => TargetKind::Sound,
            Self::Video => TargetKind::Video,
            Self::Particle => TargetKind::Particles,
            Self::Spritesheet => TargetKind::Sprite,
            Self::Skeleton => TargetKind::Skeleton,
            Self::Text => TargetKind::Text,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A pre-validated asset reference.
pub struct AssetRef {
    pub url: String,
    pub kind: AssetKind,
}

pub type AssetMap = BTreeMap<String, AssetRef>;

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;

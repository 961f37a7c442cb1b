use std::collections::BTreeMap;

use crate::foundation::core::{Point, Rgb, TargetId, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Concrete renderable kind a target was created as.
pub enum TargetKind {
    /// Static raster image.
    Image,
    /// Animated sprite sheet.
    Sprite,
    /// Video-backed surface (no tint, no rotation).
    Video,
    /// Styled text block.
    Text,
    /// Particle emitter.
    Particles,
    /// Sound handle.
    Sound,
    /// Skeletal (track-based) character.
    Skeleton,
    /// Anything the engine does not know how to drive.
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A single capability an effect type requires of its target.
pub enum Capability {
    /// Position can be written.
    Position,
    /// Scale can be written.
    Scale,
    /// Rotation can be written.
    Rotation,
    /// Alpha can be written.
    Alpha,
    /// Tint can be written.
    Tint,
    /// Visibility can be toggled.
    Visibility,
    /// Text content/style can be written.
    Text,
    /// Audio playback can be driven.
    Audio,
    /// Particle emission can be configured.
    Particles,
    /// Skeletal tracks can be driven.
    Skeletal,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Capability flags attached to a target when it is registered on a stage.
pub struct Capabilities {
    pub position: bool,
    pub scale: bool,
    pub rotation: bool,
    pub alpha: bool,
    pub tint: bool,
    pub visibility: bool,
    pub text: bool,
    pub audio: bool,
    pub particles: bool,
    pub skeletal: bool,
}

impl Capabilities {
    pub fn none() -> Self {
        Self::default()
    }

    fn display_object() -> Self {
        Self {
            position: true,
            scale: true,
            rotation: true,
            alpha: true,
            tint: true,
            visibility: true,
            ..Self::default()
        }
    }

    pub fn for_kind(kind: TargetKind) -> Self {
        match kind {
            TargetKind::Image | TargetKind::Sprite => Self::display_object(),
            TargetKind::Video => Self {
                rotation: false,
                tint: false,
                ..Self::display_object()
            },
            TargetKind::Text => Self {
                text: true,
                ..Self::display_object()
            },
            TargetKind::Particles => Self {
                position: true,
                scale: true,
                alpha: true,
                visibility: true,
                particles: true,
                ..Self::default()
            },
            TargetKind::Sound => Self {
                audio: true,
                ..Self::default()
            },
            TargetKind::Skeleton => Self {
                skeletal: true,
                ..Self::display_object()
            },
            TargetKind::Unknown => Self::none(),
        }
    }

    pub fn supports(&self, cap: Capability) -> bool {
        match cap {
            Capability::Position => self.position,
            Capability::Scale => self.scale,
            Capability::Rotation => self.rotation,
            Capability::Alpha => self.alpha,
            Capability::Tint => self.tint,
            Capability::Visibility => self.visibility,
            Capability::Text => self.text,
            Capability::Audio => self.audio,
            Capability::Particles => self.particles,
            Capability::Skeletal => self.skeletal,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Font styling applied to text targets.
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub color: Rgb,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_owned(),
            font_size: 32.0,
            color: Rgb::WHITE,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct TextState {
    pub content: String,
    /// Number of leading characters shown; `None` shows everything.
    pub revealed: Option<usize>,
    pub style: TextStyle,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AudioState {
    pub key: Option<String>,
    pub playing: bool,
    pub paused: bool,
    pub volume: f64,
    pub position_ms: f64,
    /// Length of the loaded clip, when the sound handle knows it.
    pub clip_duration_ms: Option<f64>,
}

impl Default for AudioState {
    fn default() -> Self {
        Self {
            key: None,
            playing: false,
            paused: false,
            volume: 1.0,
            position_ms: 0.0,
            clip_duration_ms: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Emitter parameters of a particle target.
pub struct ParticleParams {
    pub frequency_ms: f64,
    pub quantity: u32,
    pub speed_min: f64,
    pub speed_max: f64,
    pub lifespan_ms: f64,
    pub scale_start: f64,
    pub scale_end: f64,
    pub alpha_start: f64,
    pub alpha_end: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tint: Option<Rgb>,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            frequency_ms: 100.0,
            quantity: 1,
            speed_min: 0.0,
            speed_max: 100.0,
            lifespan_ms: 1000.0,
            scale_start: 1.0,
            scale_end: 0.0,
            alpha_start: 1.0,
            alpha_end: 0.0,
            tint: None,
        }
    }
}

impl ParticleParams {
    pub fn is_valid(&self) -> bool {
        self.frequency_ms.is_finite()
            && self.frequency_ms >= 0.0
            && self.lifespan_ms.is_finite()
            && self.lifespan_ms >= 0.0
            && self.speed_min.is_finite()
            && self.speed_max.is_finite()
            && self.speed_min <= self.speed_max
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct EmitterState {
    pub emitting: bool,
    pub params: ParticleParams,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// What a skeletal track is currently playing.
pub struct TrackEntry {
    /// `None` is the empty animation.
    pub animation: Option<String>,
    pub looped: bool,
    /// Cross-fade applied when this entry was set, in seconds.
    pub mix_secs: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SkeletonState {
    /// Clip name -> clip length in seconds, as loaded from the skeleton data.
    pub clips: BTreeMap<String, f64>,
    pub tracks: BTreeMap<u32, TrackEntry>,
    #[serde(skip)]
    pub mixes: BTreeMap<(String, String), f64>,
    pub time_scale: f64,
}

impl Default for SkeletonState {
    fn default() -> Self {
        Self {
            clips: BTreeMap::new(),
            tracks: BTreeMap::new(),
            mixes: BTreeMap::new(),
            time_scale: 1.0,
        }
    }
}

impl SkeletonState {
    pub fn with_clips<I, S>(clips: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            clips: clips.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Self::default()
        }
    }

    pub fn clip_duration_secs(&self, name: &str) -> Option<f64> {
        self.clips.get(name).copied()
    }

    pub fn set_mix(&mut self, from: &str, to: &str, secs: f64) {
        let _ = self
            .mixes
            .insert((from.to_owned(), to.to_owned()), secs.max(0.0));
    }

    pub fn mix_secs(&self, from: &str, to: &str) -> Option<f64> {
        self.mixes.get(&(from.to_owned(), to.to_owned())).copied()
    }

    /// Play `name` on `track`; returns `false` when the skeleton has no such clip.
    pub fn set_animation(&mut self, track: u32, name: &str, looped: bool) -> bool {
        if !self.clips.contains_key(name) {
            return false;
        }
        let previous = self
            .tracks
            .get(&track)
            .and_then(|e| e.animation.clone());
        let mix_secs = previous
            .and_then(|prev| self.mix_secs(&prev, name))
            .unwrap_or(0.0);
        let _ = self.tracks.insert(
            track,
            TrackEntry {
                animation: Some(name.to_owned()),
                looped,
                mix_secs,
            },
        );
        true
    }

    pub fn set_empty_animation(&mut self, track: u32, mix_secs: f64) {
        let _ = self.tracks.insert(
            track,
            TrackEntry {
                animation: None,
                looped: false,
                mix_secs,
            },
        );
    }

    pub fn current(&self, track: u32) -> Option<&str> {
        self.tracks.get(&track).and_then(|e| e.animation.as_deref())
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Live property record of one renderable.
///
/// Effects write here; a renderer mirrors these values onto its scene graph.
pub struct Target {
    pub id: TargetId,
    pub name: Option<String>,
    pub kind: TargetKind,
    pub caps: Capabilities,
    pub position: Point,
    pub depth: f64,
    pub scale: Vec2,
    pub rotation_deg: f64,
    pub alpha: f64,
    pub tint: Option<Rgb>,
    pub visible: bool,
    pub text: TextState,
    pub audio: AudioState,
    pub emitter: EmitterState,
    pub skeleton: SkeletonState,
}

impl Target {
    pub fn new(id: TargetId, kind: TargetKind) -> Self {
        Self::with_caps(id, kind, Capabilities::for_kind(kind))
    }

    pub fn with_caps(id: TargetId, kind: TargetKind, caps: Capabilities) -> Self {
        Self {
            id,
            name: None,
            kind,
            caps,
            position: Point::ZERO,
            depth: 0.0,
            scale: Vec2::new(1.0, 1.0),
            rotation_deg: 0.0,
            alpha: 1.0,
            tint: None,
            visible: true,
            text: TextState::default(),
            audio: AudioState::default(),
            emitter: EmitterState::default(),
            skeleton: SkeletonState::default(),
        }
    }

    /// Log label: the stable name when present, else the arena id.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.id.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/target.rs"]
mod tests;

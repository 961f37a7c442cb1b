//! reeltime is the animation timeline engine behind data-driven video compositions.
//!
//! A timeline document lists elements, each with an initial state and per-property
//! tracks. The engine validates it, turns every element into a sequence of effect
//! units and drives them against plain target records held in a [`Stage`]:
//!
//! - Validate a document with [`validate_timeline_json`]
//! - Load it into a [`Scene`], or drive a [`SyncEngine`] directly
//! - Advance time explicitly with `advance(dt)` and read target state back
//!
//! Everything is single-threaded and deterministic; time only moves when the
//! caller advances it.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod effects;
pub(crate) mod manager;
pub(crate) mod runtime;
pub(crate) mod scene;
pub(crate) mod sequence;
pub(crate) mod stage;
pub(crate) mod sync;
pub(crate) mod timeline;

pub use crate::foundation::core::{
    CoordinateSpace, Point, Resolution, Rgb, TargetId, TimeMs, Vec2,
};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::{Ease, EaseDir, EaseFamily};
pub use crate::animation::tween::{Lerp, Tween};
pub use crate::config::model::{AnimationConfig, PropertyType, SequenceItem};
pub use crate::config::value::{PointValue, PropertyValue};
pub use crate::effects::audio::AudioUnit;
pub use crate::effects::particle::ParticleUnit;
pub use crate::effects::property::{
    ColorUnit, OpacityUnit, PositionUnit, RotationUnit, ScaleUnit, TweenProperty, TweenUnit,
};
pub use crate::effects::registry::{EffectRegistry, UnitCtor};
pub use crate::effects::skeletal::{SKELETAL_MIX_SECONDS, SkeletalUnit, calculated_duration_ms};
pub use crate::effects::text::TextUnit;
pub use crate::effects::visibility::VisibilityUnit;
pub use crate::effects::unit::{AnimatableUnit, UnitState};
pub use crate::manager::animation_manager::{
    AnimationManager, AnimationTicket, OUTCOME_LIMIT, Outcome, QueueItem,
};
pub use crate::runtime::clock::{Clock, VirtualClock, WallClock};
pub use crate::runtime::timers::{TimerKey, TimerQueue};
pub use crate::scene::orchestrator::{RunOpts, Scene};
pub use crate::sequence::engine::{
    FINISHED_RUN_LIMIT, ItemOutcome, SequenceEngine, SequenceHandle,
};
pub use crate::sequence::skeletal::MAX_SKELETAL_TRACKS;
pub use crate::stage::arena::Stage;
pub use crate::stage::target::{
    AudioState, Capabilities, Capability, EmitterState, ParticleParams, SkeletonState, Target,
    TargetKind, TextState, TextStyle, TrackEntry,
};
pub use crate::sync::engine::{GroupSequence, SyncEngine, SyncGroup, SyncHandle};
pub use crate::timeline::convert::{apply_initial_state, element_to_sequence};
pub use crate::timeline::model::{
    AssetKind, AssetMap, AssetRef, InitialPosition, InitialScale, InitialState, OnScreenWindow,
    TIMELINE_KEY, TimelineAnimation, TimelineElement, TrackName,
};
pub use crate::timeline::normalize::normalize_document;
pub use crate::timeline::validate::{
    ValidationReport, validate_timeline_json, validate_timeline_with_assets,
};

use std::collections::BTreeMap;

use crate::{
    config::model::SequenceItem, effects::skeletal::calculated_duration_ms,
    stage::target::SkeletonState,
};

/// Stopping a skeletal target empties at least this many tracks, more when its
/// latest plan handed out more.
pub const MAX_SKELETAL_TRACKS: u32 = 10;

/// Where one skeletal item plays and what it cross-fades from.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackAssignment {
    pub track: u32,
    pub animation: String,
    pub mix_from: Option<String>,
}

#[derive(Clone, Debug)]
struct PlannedClip {
    animation: String,
    end_ms: f64,
}

/// Track bookkeeping for one `play_sequence` call against a skeletal target.
///
/// Built fresh per call, so the first skeletal item always lands on track 0.
#[derive(Clone, Debug, Default)]
pub struct SkeletalTrackPlan {
    next_track: u32,
    tracks: BTreeMap<String, u32>,
    previous: Option<PlannedClip>,
}

impl SkeletalTrackPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next track to `item` in declaration order.
    ///
    /// A clip without `endTime`/`duration` is planned to run for its full
    /// length on `skeleton`. Returns `None` for items without an animation
    /// name; those fail when played.
    pub fn assign(
        &mut self,
        item: &SequenceItem,
        skeleton: &SkeletonState,
    ) -> Option<TrackAssignment> {
        let animation = item
            .config
            .animation_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())?
            .to_owned();

        let start_ms = item
            .config
            .start_time
            .filter(|s| s.is_finite())
            .map_or_else(|| item.effective_delay_ms(), |s| s * 1000.0);
        let length_ms = calculated_duration_ms(&item.config)
            .or_else(|| skeleton.clip_duration_secs(&animation).map(|s| s * 1000.0))
            .unwrap_or(0.0);
        let end_ms = start_ms + length_ms;

        let mix_from = self
            .previous
            .as_ref()
            .filter(|prev| start_ms < prev.end_ms)
            .map(|prev| prev.animation.clone());

        let track = self.next_track;
        self.next_track += 1;
        let _ = self.tracks.insert(animation.clone(), track);
        self.previous = Some(PlannedClip {
            animation: animation.clone(),
            end_ms,
        });

        Some(TrackAssignment {
            track,
            animation,
            mix_from,
        })
    }

    pub fn track_of(&self, animation: &str) -> Option<u32> {
        self.tracks.get(animation).copied()
    }

    pub fn next_track(&self) -> u32 {
        self.next_track
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/skeletal.rs"]
mod tests;

use std::collections::BTreeMap;

use crate::{
    config::model::{AnimationConfig, PropertyType, SequenceItem},
    foundation::{
        core::TargetId,
        error::{ReelError, ReelResult},
    },
    manager::animation_manager::{AnimationManager, AnimationTicket},
    sequence::engine::{SequenceEngine, SequenceHandle},
    stage::arena::Stage,
};

/// A group's sequence after classifying its raw JSON form.
#[derive(Clone, Debug, PartialEq)]
pub enum GroupSequence {
    Items(Vec<SequenceItem>),
    /// Nothing playable; the group settles immediately.
    Empty,
}

impl GroupSequence {
    /// Arrays pass through item by item (malformed entries are skipped with a
    /// warning); a single audio-shaped object becomes a one-item audio
    /// sequence; anything else is a no-op.
    pub fn classify(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Array(entries) => {
                let mut items = Vec::with_capacity(entries.len());
                for (index, entry) in entries.iter().enumerate() {
                    match serde_json::from_value::<SequenceItem>(entry.clone()) {
                        Ok(item) => items.push(item),
                        Err(err) => {
                            tracing::warn!(index, error = %err, "skipping malformed sequence item");
                        }
                    }
                }
                Self::Items(items)
            }
            serde_json::Value::Object(map) if is_audio_shaped(map) => {
                match audio_item(value) {
                    Ok(item) => Self::Items(vec![item]),
                    Err(err) => {
                        tracing::warn!(error = %err, "skipping malformed audio group");
                        Self::Empty
                    }
                }
            }
            _ => Self::Empty,
        }
    }

    pub fn into_items(self) -> Vec<SequenceItem> {
        match self {
            Self::Items(items) => items,
            Self::Empty => Vec::new(),
        }
    }
}

fn is_audio_shaped(map: &serde_json::Map<String, serde_json::Value>) -> bool {
    let is_audio_type = |v: &serde_json::Value| v.as_str() == Some("audio");
    map.contains_key("audioKey")
        || map.get("type").is_some_and(is_audio_type)
        || map
            .get("config")
            .and_then(|c| c.get("audioKey"))
            .is_some()
}

fn audio_item(value: &serde_json::Value) -> ReelResult<SequenceItem> {
    if value.get("config").is_some() {
        let mut item: SequenceItem = serde_json::from_value(value.clone())?;
        item.property_type = PropertyType::Audio;
        return Ok(item);
    }
    let config: AnimationConfig = serde_json::from_value(value.clone())?;
    Ok(SequenceItem::new(PropertyType::Audio, config))
}

/// One target's sequence inside a `play_sync` call.
#[derive(Clone, Debug)]
pub struct SyncGroup {
    pub target: TargetId,
    pub sequence: GroupSequence,
}

impl SyncGroup {
    pub fn new(target: TargetId, items: Vec<SequenceItem>) -> Self {
        Self {
            target,
            sequence: GroupSequence::Items(items),
        }
    }
}

/// Handle of one `play_sync` call; settled once every group has settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SyncHandle(u64);

/// Whole-scene fan-out over the sequence engine.
///
/// A group is forgotten once all its runs settle; unknown handles read as settled.
#[derive(Debug, Default)]
pub struct SyncEngine {
    sequences: SequenceEngine,
    groups: BTreeMap<SyncHandle, Vec<SequenceHandle>>,
    next_handle: u64,
}

impl SyncEngine {
    pub fn new(sequences: SequenceEngine) -> Self {
        Self {
            sequences,
            ..Self::default()
        }
    }

    pub fn sequences(&self) -> &SequenceEngine {
        &self.sequences
    }

    pub fn sequences_mut(&mut self) -> &mut SequenceEngine {
        &mut self.sequences
    }

    pub fn manager(&self) -> &AnimationManager {
        self.sequences.manager()
    }

    #[tracing::instrument(level = "debug", skip(self, stage, groups), fields(groups = groups.len()))]
    pub fn play_sync(&mut self, stage: &Stage, groups: Vec<SyncGroup>) -> SyncHandle {
        let handle = SyncHandle(self.next_handle);
        self.next_handle += 1;

        let mut runs = Vec::with_capacity(groups.len());
        for group in groups {
            let items = group.sequence.into_items();
            if items.is_empty() {
                continue;
            }
            runs.push(self.sequences.play_sequence(stage, group.target, items));
        }
        let _ = self.groups.insert(handle, runs);
        handle
    }

    /// Same config on every target, each through the animation manager.
    pub fn animate_multiple(
        &mut self,
        stage: &mut Stage,
        targets: &[TargetId],
        ty: PropertyType,
        config: &AnimationConfig,
    ) -> Vec<ReelResult<AnimationTicket>> {
        targets
            .iter()
            .map(|&target| {
                self.sequences
                    .manager_mut()
                    .animate(stage, target, ty, config)
            })
            .collect()
    }

    pub fn stop_all(&mut self, stage: &mut Stage, targets: &[TargetId]) {
        for &target in targets {
            self.sequences.stop_sequence(stage, target);
        }
        self.prune_settled();
    }

    pub fn pause_all(&mut self, stage: &mut Stage, targets: &[TargetId]) {
        for &target in targets {
            self.sequences.pause_sequence(stage, target);
        }
    }

    pub fn resume_all(&mut self, stage: &mut Stage, targets: &[TargetId]) {
        for &target in targets {
            self.sequences.resume_sequence(stage, target);
        }
    }

    pub fn reset_all(&mut self, stage: &mut Stage, targets: &[TargetId]) {
        for &target in targets {
            self.sequences.reset_sequence(stage, target);
        }
        self.prune_settled();
    }

    /// Full teardown of sequences, skeletal plans and group bookkeeping.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn reset(&mut self, stage: &mut Stage) {
        self.sequences.stop_all_sequences(stage);
        self.sequences.clear_all_sequences(stage);
        self.groups.clear();
    }

    pub fn is_settled(&self, handle: SyncHandle) -> bool {
        self.groups
            .get(&handle)
            .is_none_or(|runs| runs.iter().all(|&r| self.sequences.is_settled(r)))
    }

    pub fn advance(&mut self, stage: &mut Stage, dt_ms: f64) {
        self.sequences.advance(stage, dt_ms);
        self.prune_settled();
    }

    /// Groups with at least one unsettled run.
    pub fn live_groups(&self) -> usize {
        self.groups.len()
    }

    fn prune_settled(&mut self) {
        let sequences = &self.sequences;
        self.groups
            .retain(|_, runs| !runs.iter().all(|&r| sequences.is_settled(r)));
    }

    /// Drive the engine in `step_ms` increments until `handle` settles.
    ///
    /// Returns the engine time spent; errors once `limit_ms` is exceeded.
    pub fn run_until_settled(
        &mut self,
        stage: &mut Stage,
        handle: SyncHandle,
        step_ms: f64,
        limit_ms: f64,
    ) -> ReelResult<f64> {
        if !step_ms.is_finite() || step_ms <= 0.0 {
            return Err(ReelError::config("step must be finite and > 0"));
        }
        let mut elapsed = 0.0;
        while !self.is_settled(handle) {
            if elapsed >= limit_ms {
                return Err(ReelError::animation(format!(
                    "sync group did not settle within {limit_ms} ms"
                )));
            }
            self.advance(stage, step_ms);
            elapsed += step_ms;
        }
        Ok(elapsed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/engine.rs"]
mod tests;

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    config::model::{PropertyType, SequenceItem},
    effects::{registry::EffectRegistry, skeletal::SkeletalUnit, unit::AnimatableUnit},
    foundation::core::{TargetId, TimeMs},
    manager::animation_manager::{AnimationManager, AnimationTicket, Outcome},
    runtime::timers::{TimerKey, TimerQueue},
    sequence::skeletal::{MAX_SKELETAL_TRACKS, SkeletalTrackPlan, TrackAssignment},
    stage::arena::Stage,
};

/// Handle of one `play_sequence` invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a single sequence item settled. Failures never propagate past the item.
pub enum ItemOutcome {
    Completed,
    Stopped,
    Failed,
}

impl From<Outcome> for ItemOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Completed => Self::Completed,
            Outcome::Stopped => Self::Stopped,
            Outcome::Failed(_) => Self::Failed,
        }
    }
}

#[derive(Debug)]
enum Slot {
    /// Waiting for its delay timer.
    Waiting(TimerKey),
    /// Delay timer frozen by `pause_sequence`.
    Frozen { remaining_ms: f64 },
    /// Running through the animation manager.
    Managed(AnimationTicket),
    /// Skeletal clip driven directly on its track.
    Skeletal(SkeletalUnit),
    Settled(ItemOutcome),
}

#[derive(Debug)]
struct ScheduledItem {
    item: SequenceItem,
    track: Option<TrackAssignment>,
    slot: Slot,
}

#[derive(Debug)]
struct SequenceRun {
    target: TargetId,
    items: Vec<ScheduledItem>,
}

impl SequenceRun {
    fn is_settled(&self) -> bool {
        self.items
            .iter()
            .all(|s| matches!(s.slot, Slot::Settled(_)))
    }
}

/// Settled runs whose item outcomes stay readable; older ones are forgotten.
pub const FINISHED_RUN_LIMIT: usize = 256;

#[derive(Clone, Copy, Debug)]
struct Fire {
    run: SequenceHandle,
    index: usize,
}

/// Schedules per-target item lists on the engine clock.
///
/// Each item fires `animate` once its effective delay elapses; item errors
/// are logged and counted as settled, so one bad item never blocks its
/// siblings. Skeletal items bypass the manager and play on numbered tracks.
/// A run leaves the live set once every item has settled.
#[derive(Debug, Default)]
pub struct SequenceEngine {
    manager: AnimationManager,
    timers: TimerQueue<Fire>,
    now: TimeMs,
    runs: BTreeMap<SequenceHandle, SequenceRun>,
    finished: BTreeMap<SequenceHandle, Vec<ItemOutcome>>,
    plans: BTreeMap<TargetId, SkeletalTrackPlan>,
    next_handle: u64,
}

impl SequenceEngine {
    pub fn new(manager: AnimationManager) -> Self {
        Self {
            manager,
            ..Self::default()
        }
    }

    pub fn manager(&self) -> &AnimationManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut AnimationManager {
        &mut self.manager
    }

    /// Engine time: the sum of every `advance` step so far.
    pub fn now(&self) -> TimeMs {
        self.now
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Runs with at least one unsettled item.
    pub fn live_runs(&self) -> usize {
        self.runs.len()
    }

    pub fn finished_runs(&self) -> usize {
        self.finished.len()
    }

    /// Schedule `items` against `target`. Items fire on a later `advance`,
    /// including those with zero delay.
    #[tracing::instrument(level = "debug", skip(self, stage, items), fields(items = items.len()))]
    pub fn play_sequence(
        &mut self,
        stage: &Stage,
        target: TargetId,
        items: Vec<SequenceItem>,
    ) -> SequenceHandle {
        let handle = SequenceHandle(self.next_handle);
        self.next_handle += 1;

        let skeleton = stage
            .get(target)
            .filter(|t| t.caps.skeletal)
            .map(|t| &t.skeleton);
        let mut plan = skeleton.map(|_| SkeletalTrackPlan::new());

        let mut scheduled = Vec::with_capacity(items.len());
        for (index, mut item) in items.into_iter().enumerate() {
            let delay = match item.resolve_delay() {
                Ok(delay) => delay,
                Err(err) => {
                    tracing::warn!(
                        obj = %target,
                        index,
                        property_type = %item.property_type,
                        error = %err,
                        "sequence item rejected"
                    );
                    scheduled.push(ScheduledItem {
                        item,
                        track: None,
                        slot: Slot::Settled(ItemOutcome::Failed),
                    });
                    continue;
                }
            };
            let track = match (&mut plan, skeleton, item.property_type) {
                (Some(plan), Some(skeleton), PropertyType::Skeletal) => {
                    plan.assign(&item, skeleton)
                }
                _ => None,
            };
            let key = self
                .timers
                .schedule(self.now.add_ms(delay), Fire { run: handle, index });
            tracing::debug!(
                obj = %target,
                index,
                property_type = %item.property_type,
                delay_ms = delay,
                "sequence item scheduled"
            );
            scheduled.push(ScheduledItem {
                item,
                track,
                slot: Slot::Waiting(key),
            });
        }

        if let Some(plan) = plan {
            let _ = self.plans.insert(target, plan);
        }
        let _ = self.runs.insert(
            handle,
            SequenceRun {
                target,
                items: scheduled,
            },
        );
        handle
    }

    /// Advance engine time by `dt_ms`, firing due items at their exact due time.
    pub fn advance(&mut self, stage: &mut Stage, dt_ms: f64) {
        let dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        let end = self.now.add_ms(dt);

        while let Some(due) = self.timers.next_due().filter(|due| *due <= end) {
            let step = due.since(self.now);
            self.step_units(stage, step);
            self.now = self.now.max(due);
            while let Some((_, fire)) = self.timers.pop_due(self.now) {
                self.fire(stage, fire);
            }
            self.collect_outcomes();
        }

        let rest = end.since(self.now);
        self.step_units(stage, rest);
        self.now = self.now.max(end);
        self.collect_outcomes();
        self.retire_settled();
    }

    pub fn is_settled(&self, handle: SequenceHandle) -> bool {
        self.runs.get(&handle).is_none_or(SequenceRun::is_settled)
    }

    /// Outcome of item `index` once it has settled. Runs that finished more
    /// than [`FINISHED_RUN_LIMIT`] runs ago read as `None`.
    pub fn item_outcome(&self, handle: SequenceHandle, index: usize) -> Option<ItemOutcome> {
        if let Some(outcomes) = self.finished.get(&handle) {
            return outcomes.get(index).copied();
        }
        match self.runs.get(&handle)?.items.get(index)?.slot {
            Slot::Settled(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Track assigned to `animation` by the latest skeletal plan for `target`.
    pub fn skeletal_track(&self, target: TargetId, animation: &str) -> Option<u32> {
        self.plans.get(&target)?.track_of(animation)
    }

    pub fn stop_sequence(&mut self, stage: &mut Stage, target: TargetId) {
        for run in self.runs.values_mut().filter(|r| r.target == target) {
            for entry in &mut run.items {
                match &mut entry.slot {
                    Slot::Waiting(key) => {
                        let _ = self.timers.cancel(*key);
                    }
                    Slot::Frozen { .. } => {}
                    Slot::Skeletal(unit) => {
                        if let Some(obj) = stage.get_mut(target) {
                            unit.stop(obj);
                        }
                    }
                    Slot::Managed(_) | Slot::Settled(_) => continue,
                }
                entry.slot = Slot::Settled(ItemOutcome::Stopped);
            }
        }
        if let Some(obj) = stage.get_mut(target).filter(|t| t.caps.skeletal) {
            let planned = self
                .plans
                .get(&target)
                .map_or(0, SkeletalTrackPlan::next_track);
            for track in 0..planned.max(MAX_SKELETAL_TRACKS) {
                obj.skeleton.set_empty_animation(track, 0.0);
            }
        }
        self.manager.stop_animations(stage, target);
        self.collect_outcomes();
        self.retire_settled();
    }

    pub fn pause_sequence(&mut self, stage: &mut Stage, target: TargetId) {
        let now = self.now;
        for run in self.runs.values_mut().filter(|r| r.target == target) {
            for entry in &mut run.items {
                match &mut entry.slot {
                    Slot::Waiting(key) => {
                        let remaining_ms = key.due().since(now);
                        let _ = self.timers.cancel(*key);
                        entry.slot = Slot::Frozen { remaining_ms };
                    }
                    Slot::Skeletal(unit) => {
                        if let Some(obj) = stage.get_mut(target) {
                            unit.pause(obj);
                        }
                    }
                    _ => {}
                }
            }
        }
        if let Some(obj) = stage.get_mut(target).filter(|t| t.caps.skeletal) {
            obj.skeleton.time_scale = 0.0;
        }
        self.manager.pause_animations(stage, target);
    }

    pub fn resume_sequence(&mut self, stage: &mut Stage, target: TargetId) {
        let now = self.now;
        for (&handle, run) in self.runs.iter_mut().filter(|(_, r)| r.target == target) {
            for (index, entry) in run.items.iter_mut().enumerate() {
                match &mut entry.slot {
                    Slot::Frozen { remaining_ms } => {
                        let key = self
                            .timers
                            .schedule(now.add_ms(*remaining_ms), Fire { run: handle, index });
                        entry.slot = Slot::Waiting(key);
                    }
                    Slot::Skeletal(unit) => {
                        if let Some(obj) = stage.get_mut(target) {
                            unit.resume(obj);
                        }
                    }
                    _ => {}
                }
            }
        }
        if let Some(obj) = stage.get_mut(target).filter(|t| t.caps.skeletal) {
            obj.skeleton.time_scale = 1.0;
        }
        self.manager.resume_animations(stage, target);
    }

    /// Cancel pending items and restore neutral defaults on `target`.
    pub fn reset_sequence(&mut self, stage: &mut Stage, target: TargetId) {
        for run in self.runs.values_mut().filter(|r| r.target == target) {
            for entry in &mut run.items {
                match &mut entry.slot {
                    Slot::Waiting(key) => {
                        let _ = self.timers.cancel(*key);
                    }
                    Slot::Frozen { .. } => {}
                    Slot::Skeletal(unit) => {
                        if let Some(obj) = stage.get_mut(target) {
                            unit.reset(obj);
                        }
                    }
                    Slot::Managed(_) | Slot::Settled(_) => continue,
                }
                entry.slot = Slot::Settled(ItemOutcome::Stopped);
            }
        }
        self.manager.reset_animations(stage, target);
        self.collect_outcomes();
        self.retire_settled();
    }

    /// Stop every tracked sequence and every live unit.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn stop_all_sequences(&mut self, stage: &mut Stage) {
        let targets: BTreeSet<TargetId> = self
            .runs
            .values()
            .map(|r| r.target)
            .chain(self.plans.keys().copied())
            .collect();
        for target in targets {
            self.stop_sequence(stage, target);
        }
        self.manager.stop_all(stage);
        self.collect_outcomes();
    }

    /// Full teardown: stop everything and forget all runs and skeletal plans.
    pub fn clear_all_sequences(&mut self, stage: &mut Stage) {
        self.stop_all_sequences(stage);
        self.runs.clear();
        self.finished.clear();
        self.plans.clear();
        self.timers.clear();
    }

    fn fire(&mut self, stage: &mut Stage, fire: Fire) {
        let Some(run) = self.runs.get_mut(&fire.run) else {
            return;
        };
        let target = run.target;
        let Some(entry) = run.items.get_mut(fire.index) else {
            return;
        };
        if !matches!(entry.slot, Slot::Waiting(_)) {
            return;
        }

        let ty = entry.item.property_type;
        entry.slot = if ty == PropertyType::Skeletal {
            start_skeletal(self.manager.registry(), stage, target, entry)
        } else {
            match self.manager.animate(stage, target, ty, &entry.item.config) {
                Ok(ticket) => Slot::Managed(ticket),
                Err(err) => {
                    tracing::warn!(
                        obj = %target,
                        index = fire.index,
                        property_type = %ty,
                        error = %err,
                        "sequence item failed"
                    );
                    Slot::Settled(ItemOutcome::Failed)
                }
            }
        };
    }

    fn step_units(&mut self, stage: &mut Stage, dt_ms: f64) {
        self.manager.advance(stage, dt_ms);
        for run in self.runs.values_mut() {
            for entry in &mut run.items {
                let Slot::Skeletal(unit) = &mut entry.slot else {
                    continue;
                };
                let Some(obj) = stage.get_mut(run.target) else {
                    entry.slot = Slot::Settled(ItemOutcome::Failed);
                    continue;
                };
                unit.advance(obj, dt_ms);
                if unit.state().is_settled() {
                    entry.slot = Slot::Settled(ItemOutcome::Completed);
                }
            }
        }
    }

    fn collect_outcomes(&mut self) {
        for run in self.runs.values_mut() {
            for entry in &mut run.items {
                if let Slot::Managed(ticket) = entry.slot {
                    if let Some(outcome) = self.manager.take_outcome(ticket) {
                        entry.slot = Slot::Settled(outcome.into());
                    }
                }
            }
        }
    }

    fn retire_settled(&mut self) {
        let done: Vec<SequenceHandle> = self
            .runs
            .iter()
            .filter(|(_, run)| run.is_settled())
            .map(|(&handle, _)| handle)
            .collect();
        for handle in done {
            let Some(run) = self.runs.remove(&handle) else {
                continue;
            };
            let outcomes = run
                .items
                .iter()
                .filter_map(|entry| match entry.slot {
                    Slot::Settled(outcome) => Some(outcome),
                    _ => None,
                })
                .collect();
            let _ = self.finished.insert(handle, outcomes);
        }
        while self.finished.len() > FINISHED_RUN_LIMIT {
            let _ = self.finished.pop_first();
        }
    }
}

fn start_skeletal(
    registry: &EffectRegistry,
    stage: &mut Stage,
    target: TargetId,
    entry: &ScheduledItem,
) -> Slot {
    let failed = |err: &dyn std::fmt::Display| {
        tracing::warn!(obj = %target, error = %err, "skeletal item failed");
        Slot::Settled(ItemOutcome::Failed)
    };

    let obj = match stage.target_mut(target) {
        Ok(obj) => obj,
        Err(err) => return failed(&err),
    };
    if let Err(err) = registry.check(PropertyType::Skeletal, &obj.caps) {
        return failed(&err);
    }

    let mut unit = match &entry.track {
        Some(assign) => SkeletalUnit::on_track(assign.track, assign.mix_from.clone()),
        None => SkeletalUnit::new(),
    };
    match unit.play(obj, &entry.item.config) {
        Ok(()) if unit.state().is_settled() => Slot::Settled(ItemOutcome::Completed),
        Ok(()) => Slot::Skeletal(unit),
        Err(err) => failed(&err),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/engine.rs"]
mod tests;

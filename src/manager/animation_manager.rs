use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::{
    config::model::{AnimationConfig, PropertyType},
    effects::{
        registry::EffectRegistry,
        unit::{AnimatableUnit, UnitState},
    },
    foundation::{core::TargetId, error::ReelResult},
    stage::arena::Stage,
};

/// Handle returned by [`AnimationManager::animate`]; its outcome becomes
/// observable once the unit settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationTicket(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
/// How a unit settled.
pub enum Outcome {
    /// Reached its natural end.
    Completed,
    /// Cancelled by `stop`/`reset`, or replaced by a newer unit of the same type.
    Stopped,
    /// Could not keep running (its target left the stage).
    Failed(String),
}

/// Uncollected outcomes kept per manager; the oldest settlements are dropped first.
pub const OUTCOME_LIMIT: usize = 1024;

/// Advisory record of what was requested for a target; not a scheduler.
#[derive(Clone, Debug)]
pub struct QueueItem {
    pub ticket: AnimationTicket,
    pub property_type: PropertyType,
    pub config: AnimationConfig,
}

#[derive(Debug)]
struct ActiveUnit {
    ticket: AnimationTicket,
    unit: Box<dyn AnimatableUnit>,
}

/// Per-target bookkeeping of live effects.
///
/// At most one unit is live per `(target, property type)`; starting another
/// stops the previous one first.
#[derive(Debug)]
pub struct AnimationManager {
    registry: EffectRegistry,
    active: BTreeMap<TargetId, BTreeMap<PropertyType, ActiveUnit>>,
    queue: BTreeMap<TargetId, Vec<QueueItem>>,
    outcomes: HashMap<AnimationTicket, Outcome>,
    settled_order: VecDeque<AnimationTicket>,
    next_ticket: u64,
}

impl Default for AnimationManager {
    fn default() -> Self {
        Self::new(EffectRegistry::builtin())
    }
}

impl AnimationManager {
    pub fn new(registry: EffectRegistry) -> Self {
        Self {
            registry,
            active: BTreeMap::new(),
            queue: BTreeMap::new(),
            outcomes: HashMap::new(),
            settled_order: VecDeque::new(),
            next_ticket: 0,
        }
    }

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EffectRegistry {
        &mut self.registry
    }

    /// Start `ty` on `target`, replacing any live unit of the same type.
    ///
    /// Registry and `play` failures leave no entry behind and are returned
    /// to the caller.
    #[tracing::instrument(level = "debug", skip(self, stage, config))]
    pub fn animate(
        &mut self,
        stage: &mut Stage,
        target: TargetId,
        ty: PropertyType,
        config: &AnimationConfig,
    ) -> ReelResult<AnimationTicket> {
        let obj = stage.target_mut(target)?;

        if let Some(mut prev) = self
            .active
            .get_mut(&target)
            .and_then(|bucket| bucket.remove(&ty))
        {
            prev.unit.stop(obj);
            self.settle(target, prev.ticket, Outcome::Stopped);
            tracing::debug!(obj = %obj.label(), property_type = %ty, "replaced live unit");
        }

        let unit = match self.registry.create(ty, &obj.caps) {
            Ok(unit) => unit,
            Err(err) => {
                self.prune(target);
                return Err(err);
            }
        };

        let ticket = AnimationTicket(self.next_ticket);
        self.next_ticket += 1;
        let bucket = self.active.entry(target).or_default();
        let _ = bucket.insert(ty, ActiveUnit { ticket, unit });
        self.queue.entry(target).or_default().push(QueueItem {
            ticket,
            property_type: ty,
            config: config.clone(),
        });

        let played = match bucket.get_mut(&ty) {
            Some(entry) => entry.unit.play(obj, config).map(|()| entry.unit.state()),
            None => Ok(UnitState::Completed),
        };

        match played {
            Ok(state) if state.is_settled() => {
                let _ = self.take_unit(target, ty);
                self.settle(target, ticket, outcome_for(state));
                Ok(ticket)
            }
            Ok(_) => Ok(ticket),
            Err(err) => {
                let _ = self.take_unit(target, ty);
                self.drop_queued(target, ticket);
                self.prune(target);
                Err(err)
            }
        }
    }

    /// Advance every live unit by `dt_ms` and settle the ones that finished.
    pub fn advance(&mut self, stage: &mut Stage, dt_ms: f64) {
        let mut settled = Vec::new();
        for (&id, bucket) in self.active.iter_mut() {
            let Some(obj) = stage.get_mut(id) else {
                for (&ty, entry) in bucket.iter() {
                    settled.push((
                        id,
                        ty,
                        entry.ticket,
                        Outcome::Failed(format!("target {id} left the stage")),
                    ));
                }
                continue;
            };
            for (&ty, entry) in bucket.iter_mut() {
                entry.unit.advance(obj, dt_ms);
                let state = entry.unit.state();
                if state.is_settled() {
                    settled.push((id, ty, entry.ticket, outcome_for(state)));
                }
            }
        }

        for (id, ty, ticket, outcome) in settled {
            let _ = self.take_unit(id, ty);
            self.settle(id, ticket, outcome);
        }
    }

    /// Stop every unit on `target` and drop its bookkeeping.
    pub fn stop_animations(&mut self, stage: &mut Stage, target: TargetId) {
        let Some(bucket) = self.active.remove(&target) else {
            let _ = self.queue.remove(&target);
            return;
        };
        for (_, mut entry) in bucket {
            if let Some(obj) = stage.get_mut(target) {
                entry.unit.stop(obj);
            }
            self.record_outcome(entry.ticket, Outcome::Stopped);
        }
        let _ = self.queue.remove(&target);
    }

    pub fn pause_animations(&mut self, stage: &mut Stage, target: TargetId) {
        let (Some(bucket), Some(obj)) = (self.active.get_mut(&target), stage.get_mut(target))
        else {
            return;
        };
        for entry in bucket.values_mut() {
            entry.unit.pause(obj);
        }
    }

    pub fn resume_animations(&mut self, stage: &mut Stage, target: TargetId) {
        let (Some(bucket), Some(obj)) = (self.active.get_mut(&target), stage.get_mut(target))
        else {
            return;
        };
        for entry in bucket.values_mut() {
            entry.unit.resume(obj);
        }
    }

    /// Reset every unit on `target` to its neutral default. Terminal, unlike pause.
    pub fn reset_animations(&mut self, stage: &mut Stage, target: TargetId) {
        if let Some(bucket) = self.active.remove(&target) {
            for (_, mut entry) in bucket {
                if let Some(obj) = stage.get_mut(target) {
                    entry.unit.reset(obj);
                }
                self.record_outcome(entry.ticket, Outcome::Stopped);
            }
        }
        let _ = self.queue.remove(&target);
    }

    pub fn has_active_animation(&self, target: TargetId, ty: Option<PropertyType>) -> bool {
        match (self.active.get(&target), ty) {
            (None, _) => false,
            (Some(bucket), None) => !bucket.is_empty(),
            (Some(bucket), Some(ty)) => bucket.contains_key(&ty),
        }
    }

    pub fn active_types(&self, target: TargetId) -> Vec<PropertyType> {
        self.active
            .get(&target)
            .map(|b| b.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Stop everything on every tracked target and clear all state.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn stop_all(&mut self, stage: &mut Stage) {
        let targets: Vec<TargetId> = self.active.keys().copied().collect();
        for target in targets {
            self.stop_animations(stage, target);
        }
        self.active.clear();
        self.queue.clear();
    }

    pub fn queued(&self, target: TargetId) -> &[QueueItem] {
        self.queue.get(&target).map(Vec::as_slice).unwrap_or(&[])
    }

    /// No live units and no queued requests.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty() && self.queue.is_empty()
    }

    pub fn outcome(&self, ticket: AnimationTicket) -> Option<&Outcome> {
        self.outcomes.get(&ticket)
    }

    pub fn take_outcome(&mut self, ticket: AnimationTicket) -> Option<Outcome> {
        self.outcomes.remove(&ticket)
    }

    /// Outcomes recorded but not yet taken.
    pub fn retained_outcomes(&self) -> usize {
        self.outcomes.len()
    }

    fn take_unit(&mut self, target: TargetId, ty: PropertyType) -> Option<ActiveUnit> {
        let removed = self.active.get_mut(&target)?.remove(&ty);
        self.prune(target);
        removed
    }

    fn settle(&mut self, target: TargetId, ticket: AnimationTicket, outcome: Outcome) {
        self.drop_queued(target, ticket);
        self.prune(target);
        self.record_outcome(ticket, outcome);
    }

    fn record_outcome(&mut self, ticket: AnimationTicket, outcome: Outcome) {
        let _ = self.outcomes.insert(ticket, outcome);
        self.settled_order.push_back(ticket);
        while self.settled_order.len() > OUTCOME_LIMIT {
            if let Some(old) = self.settled_order.pop_front() {
                let _ = self.outcomes.remove(&old);
            }
        }
    }

    fn drop_queued(&mut self, target: TargetId, ticket: AnimationTicket) {
        if let Some(items) = self.queue.get_mut(&target) {
            items.retain(|q| q.ticket != ticket);
            if items.is_empty() {
                let _ = self.queue.remove(&target);
            }
        }
    }

    fn prune(&mut self, target: TargetId) {
        if self.active.get(&target).is_some_and(BTreeMap::is_empty) {
            let _ = self.active.remove(&target);
        }
    }
}

fn outcome_for(state: UnitState) -> Outcome {
    match state {
        UnitState::Stopped => Outcome::Stopped,
        _ => Outcome::Completed,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/manager/animation_manager.rs"]
mod tests;

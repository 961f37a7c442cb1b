use std::collections::{BTreeMap, HashMap};

use crate::{
    foundation::core::TargetId,
    foundation::error::{ReelError, ReelResult},
    stage::target::{Capabilities, Target, TargetKind},
};

/// Arena of renderable targets owned by the scene orchestrator.
///
/// The animation core only ever holds [`TargetId`]s and borrows targets from
/// the stage for the duration of a call.
#[derive(Debug, Default)]
pub struct Stage {
    targets: BTreeMap<TargetId, Target>,
    names: HashMap<String, TargetId>,
    next_id: u32,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, kind: TargetKind) -> TargetId {
        self.spawn_with_caps(kind, Capabilities::for_kind(kind))
    }

    pub fn spawn_with_caps(&mut self, kind: TargetKind, caps: Capabilities) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        let _ = self.targets.insert(id, Target::with_caps(id, kind, caps));
        id
    }

    /// Spawn a target addressable by a stable name; names must be unique per stage.
    pub fn spawn_named(&mut self, name: &str, kind: TargetKind) -> ReelResult<TargetId> {
        if name.trim().is_empty() {
            return Err(ReelError::validation("target name must be non-empty"));
        }
        if self.names.contains_key(name) {
            return Err(ReelError::validation(format!(
                "duplicate target name '{name}'"
            )));
        }
        let id = self.spawn(kind);
        if let Some(t) = self.targets.get_mut(&id) {
            t.name = Some(name.to_owned());
        }
        let _ = self.names.insert(name.to_owned(), id);
        Ok(id)
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(&id)
    }

    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut Target> {
        self.targets.get_mut(&id)
    }

    pub fn target_mut(&mut self, id: TargetId) -> ReelResult<&mut Target> {
        self.targets
            .get_mut(&id)
            .ok_or_else(|| ReelError::animation(format!("unknown target {id}")))
    }

    pub fn find_by_name(&self, name: &str) -> Option<TargetId> {
        self.names.get(name).copied()
    }

    pub fn remove(&mut self, id: TargetId) -> Option<Target> {
        let removed = self.targets.remove(&id)?;
        if let Some(name) = &removed.name {
            let _ = self.names.remove(name);
        }
        Some(removed)
    }

    pub fn ids(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.targets.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/arena.rs"]
mod tests;

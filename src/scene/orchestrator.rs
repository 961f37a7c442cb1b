use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    foundation::{
        core::{CoordinateSpace, TargetId},
        error::{ReelError, ReelResult},
    },
    stage::{
        arena::Stage,
        target::{Target, TargetKind},
    },
    sync::engine::{SyncEngine, SyncGroup, SyncHandle},
    timeline::{
        convert::{apply_initial_state, element_to_sequence},
        model::{AssetKind, AssetMap},
        normalize::normalize_document,
        validate::validate_timeline_with_assets,
    },
};

/// How [`Scene::run`] drives time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RunOpts {
    /// Engine step per tick, in milliseconds.
    pub step_ms: f64,
    /// Give up once this much engine time has passed without settling.
    pub limit_ms: f64,
}

impl Default for RunOpts {
    fn default() -> Self {
        Self {
            step_ms: 1000.0 / 60.0,
            limit_ms: 10.0 * 60.0 * 1000.0,
        }
    }
}

/// A loaded timeline: one target per element plus the engine driving them.
///
/// Loading is all-or-nothing: any validation error rejects the document
/// before a single target is spawned.
#[derive(Debug)]
pub struct Scene {
    stage: Stage,
    engine: SyncEngine,
    groups: Vec<SyncGroup>,
    handle: Option<SyncHandle>,
    elements: BTreeMap<String, TargetId>,
    warnings: Vec<String>,
}

impl Scene {
    #[tracing::instrument(level = "info", skip_all)]
    pub fn load(doc: &Value, assets: &AssetMap, space: CoordinateSpace) -> ReelResult<Self> {
        let report = validate_timeline_with_assets(doc, assets);
        if !report.is_ok() {
            return Err(ReelError::validation(report.errors.join("\n")));
        }

        let mut stage = Stage::new();
        let mut groups = Vec::new();
        let mut elements = BTreeMap::new();
        for element in normalize_document(doc)? {
            let kind = AssetKind::parse(&element.asset_type)
                .or_else(|| assets.get(&element.asset_name).map(|a| a.kind))
                .map(AssetKind::target_kind)
                .unwrap_or(TargetKind::Unknown);
            let id = stage.spawn_named(&element.element_name, kind)?;
            apply_initial_state(stage.target_mut(id)?, &element, &space);

            let items = element_to_sequence(&element, &space);
            tracing::debug!(
                element = %element.element_name,
                ?kind,
                items = items.len(),
                "element loaded"
            );
            groups.push(SyncGroup::new(id, items));
            let _ = elements.insert(element.element_name, id);
        }

        Ok(Self {
            stage,
            engine: SyncEngine::default(),
            groups,
            handle: None,
            elements,
            warnings: report.warnings,
        })
    }

    /// Schedule every element's sequence; a scene may be replayed after `teardown`.
    pub fn play(&mut self) -> SyncHandle {
        let handle = self.engine.play_sync(&self.stage, self.groups.clone());
        self.handle = Some(handle);
        handle
    }

    pub fn advance(&mut self, dt_ms: f64) {
        self.engine.advance(&mut self.stage, dt_ms);
    }

    /// Played, and every element's sequence has settled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_some_and(|h| self.engine.is_settled(h))
    }

    /// Play if needed, then step until settled. Returns the engine time spent.
    pub fn run(&mut self, opts: &RunOpts) -> ReelResult<f64> {
        let handle = match self.handle {
            Some(handle) => handle,
            None => self.play(),
        };
        self.engine
            .run_until_settled(&mut self.stage, handle, opts.step_ms, opts.limit_ms)
    }

    /// Stop everything and drop all engine bookkeeping; targets stay on the stage.
    pub fn teardown(&mut self) {
        self.engine.reset(&mut self.stage);
        self.handle = None;
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    pub fn target(&self, element_name: &str) -> Option<&Target> {
        self.elements
            .get(element_name)
            .and_then(|&id| self.stage.get(id))
    }

    /// Asset warnings collected at load time.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/orchestrator.rs"]
mod tests;

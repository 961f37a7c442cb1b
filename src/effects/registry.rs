use std::collections::BTreeMap;

use crate::{
    config::model::PropertyType,
    effects::{
        audio::AudioUnit,
        particle::ParticleUnit,
        property::{ColorUnit, OpacityUnit, PositionUnit, RotationUnit, ScaleUnit},
        skeletal::SkeletalUnit,
        text::TextUnit,
        unit::AnimatableUnit,
        visibility::VisibilityUnit,
    },
    foundation::error::{ReelError, ReelResult},
    stage::target::{Capabilities, Capability},
};

/// Constructor for a fresh, idle unit.
pub type UnitCtor = fn() -> Box<dyn AnimatableUnit>;

#[derive(Clone, Copy)]
struct Registration {
    requires: Capability,
    ctor: UnitCtor,
}

/// Property-type to unit-constructor lookup with capability gating.
///
/// One registry per running engine; the animation manager owns it.
#[derive(Clone, Default)]
pub struct EffectRegistry {
    entries: BTreeMap<PropertyType, Registration>,
}

impl std::fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectRegistry")
            .field("types", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl EffectRegistry {
    /// Empty registry; every lookup misses until types are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with all ten built-in effect types.
    pub fn builtin() -> Self {
        let mut reg = Self::new();
        reg.register(PropertyType::Position, Capability::Position, || {
            Box::new(PositionUnit::new())
        });
        reg.register(PropertyType::Scale, Capability::Scale, || {
            Box::new(ScaleUnit::new())
        });
        reg.register(PropertyType::Rotation, Capability::Rotation, || {
            Box::new(RotationUnit::new())
        });
        reg.register(PropertyType::Opacity, Capability::Alpha, || {
            Box::new(OpacityUnit::new())
        });
        reg.register(PropertyType::Color, Capability::Tint, || {
            Box::new(ColorUnit::new())
        });
        reg.register(PropertyType::Visibility, Capability::Visibility, || {
            Box::new(VisibilityUnit::new())
        });
        reg.register(PropertyType::Text, Capability::Text, || {
            Box::new(TextUnit::new())
        });
        reg.register(PropertyType::Audio, Capability::Audio, || {
            Box::new(AudioUnit::new())
        });
        reg.register(PropertyType::Particle, Capability::Particles, || {
            Box::new(ParticleUnit::new())
        });
        reg.register(PropertyType::Skeletal, Capability::Skeletal, || {
            Box::new(SkeletalUnit::new())
        });
        reg
    }

    /// Register (or replace) the constructor for `ty`.
    pub fn register(&mut self, ty: PropertyType, requires: Capability, ctor: UnitCtor) {
        if self
            .entries
            .insert(ty, Registration { requires, ctor })
            .is_some()
        {
            tracing::debug!(property_type = %ty, "effect constructor replaced");
        }
    }

    pub fn is_registered(&self, ty: PropertyType) -> bool {
        self.entries.contains_key(&ty)
    }

    /// Check that a target with `caps` can carry `ty`, without constructing anything.
    pub fn check(&self, ty: PropertyType, caps: &Capabilities) -> ReelResult<()> {
        let reg = self
            .entries
            .get(&ty)
            .ok_or(ReelError::UnregisteredEffect(ty))?;
        if caps.is_empty() {
            return Err(ReelError::capability(format!(
                "target is not an animatable kind; cannot apply {ty}"
            )));
        }
        if !caps.supports(reg.requires) {
            return Err(ReelError::capability(format!(
                "target does not support {ty} effects (missing {:?})",
                reg.requires
            )));
        }
        Ok(())
    }

    /// Construct a unit for `ty` once `caps` has passed the capability gate.
    pub fn create(
        &self,
        ty: PropertyType,
        caps: &Capabilities,
    ) -> ReelResult<Box<dyn AnimatableUnit>> {
        self.check(ty, caps)?;
        let reg = self
            .entries
            .get(&ty)
            .ok_or(ReelError::UnregisteredEffect(ty))?;
        Ok((reg.ctor)())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/registry.rs"]
mod tests;

//! Resource readiness preflight
//!
//! Before mutating a target, the engine gives an injected checker the chance
//! to flip whatever flag the target's associated resource needs (the
//! canonical case: a mesh that is not flagged readable). Failures here are
//! warnings; the batch always proceeds.

use crate::core::types::EntityId;
use crate::scene::Scene;

/// Outcome of the readiness check
#[derive(Debug, Clone, Default)]
pub struct ReadinessReport {
    pub needs_fix: bool,
    pub detail: Option<String>,
}

impl ReadinessReport {
    pub fn ready() -> Self {
        Self::default()
    }

    pub fn fix_needed(detail: impl Into<String>) -> Self {
        Self {
            needs_fix: true,
            detail: Some(detail.into()),
        }
    }
}

/// Injected preflight collaborator
pub trait ReadinessChecker {
    fn check(&self, scene: &Scene, target: EntityId) -> ReadinessReport;

    /// Make the target's resource mutation-ready
    fn fix(&self, scene: &mut Scene, target: EntityId) -> Result<(), String>;
}

/// Checker that never asks for a fix
#[derive(Debug, Default)]
pub struct NoopChecker;

impl ReadinessChecker for NoopChecker {
    fn check(&self, _scene: &Scene, _target: EntityId) -> ReadinessReport {
        ReadinessReport::ready()
    }

    fn fix(&self, _scene: &mut Scene, _target: EntityId) -> Result<(), String> {
        Ok(())
    }
}

/// Checker for entities carrying a mesh resource with a readable flag
#[derive(Debug, Default)]
pub struct MeshReadChecker;

impl ReadinessChecker for MeshReadChecker {
    fn check(&self, scene: &Scene, target: EntityId) -> ReadinessReport {
        match scene.get(target).and_then(|e| e.resource.as_ref()) {
            Some(resource) if !resource.readable => ReadinessReport::fix_needed(format!(
                "Mesh '{}' is not readable, enabling read/write",
                resource.name
            )),
            _ => ReadinessReport::ready(),
        }
    }

    fn fix(&self, scene: &mut Scene, target: EntityId) -> Result<(), String> {
        let resource = scene
            .get_mut(target)
            .and_then(|e| e.resource.as_mut())
            .ok_or_else(|| format!("Entity {:?} has no mesh resource to fix", target))?;
        resource.readable = true;
        Ok(())
    }
}

//! Target registry - the ordered batch of entities a template applies to

use std::collections::HashSet;

use crate::catalog::InteractionCatalog;
use crate::core::error::{AssignError, Result};
use crate::core::types::{EntityId, SelectionMask};

/// One registered target: an entity plus its tag selection
///
/// `resolved_tags` is derived state only; it is recomputed from the catalog
/// whenever the mask changes and must never be mutated independently.
#[derive(Debug, Clone)]
pub struct Target {
    pub entity: EntityId,
    pub selection: SelectionMask,
    resolved_tags: HashSet<String>,
}

impl Target {
    fn new(entity: EntityId) -> Self {
        Self {
            entity,
            selection: 0,
            resolved_tags: HashSet::new(),
        }
    }

    pub fn resolved_tags(&self) -> &HashSet<String> {
        &self.resolved_tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.resolved_tags.contains(tag)
    }
}

/// Ordered, deduplicated list of targets
///
/// Session-only state: the registry is never persisted. Targets keep the
/// order they were added in, which is also the order the apply engine
/// processes them in.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Target> {
        self.targets.get(index)
    }

    /// Add an entity as a target with an empty selection
    ///
    /// Adding an already-registered entity is a no-op; returns whether a new
    /// target was appended.
    pub fn add(&mut self, entity: EntityId) -> bool {
        if self.targets.iter().any(|t| t.entity == entity) {
            return false;
        }
        self.targets.push(Target::new(entity));
        true
    }

    /// Remove the target at `index`
    pub fn remove(&mut self, index: usize) -> Result<Target> {
        if index >= self.targets.len() {
            return Err(AssignError::IndexOutOfRange {
                index,
                len: self.targets.len(),
            });
        }
        Ok(self.targets.remove(index))
    }

    /// Overwrite the selection mask at `index` and rederive its tag set
    pub fn set_selection(
        &mut self,
        index: usize,
        mask: SelectionMask,
        catalog: &InteractionCatalog,
    ) -> Result<()> {
        let len = self.targets.len();
        let target = self
            .targets
            .get_mut(index)
            .ok_or(AssignError::IndexOutOfRange { index, len })?;
        target.selection = mask;
        target.resolved_tags = catalog.decode(mask);
        Ok(())
    }

    /// Rederive every target's tag set from the current catalog
    ///
    /// Masks store bit positions, not tag names: if the catalog was reordered
    /// or shrunk since a mask was set, the selection silently drifts to
    /// whatever tags now occupy those positions. Callers that edit the
    /// catalog mid-session must call this and accept that drift.
    pub fn refresh(&mut self, catalog: &InteractionCatalog) {
        for target in &mut self.targets {
            target.resolved_tags = catalog.decode(target.selection);
        }
    }
}

//! Compensating-action log for one batch apply run
//!
//! Every attachment the engine performs pushes a matching detach action onto
//! the current unit. The sealed unit is one named group: rolling it back
//! reverses the whole batch in a single external call, in reverse order of
//! attachment. Handler-internal side effects are not compensated.

use crate::core::error::Result;
use crate::core::types::{EntityId, HandlerTypeId};
use crate::scene::Scene;

/// One compensating action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoAction {
    Detach {
        entity: EntityId,
        handler: HandlerTypeId,
    },
}

/// Named, ordered group of compensating actions
#[derive(Debug)]
pub struct UndoUnit {
    name: String,
    actions: Vec<UndoAction>,
    sealed: bool,
}

impl UndoUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
            sealed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actions(&self) -> &[UndoAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Record the compensation for an attach that just happened
    pub fn record_attach(&mut self, entity: EntityId, handler: HandlerTypeId) {
        debug_assert!(!self.sealed, "recording into a sealed undo unit");
        self.actions.push(UndoAction::Detach { entity, handler });
    }

    /// Close the unit; it now stands as one reversible group
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Apply every compensating action in reverse order
    ///
    /// Consumes the unit; a batch can only be rolled back once. Returns the
    /// number of handlers actually detached (already-detached handlers are
    /// counted out, not errors).
    pub fn rollback(self, scene: &mut Scene) -> Result<usize> {
        let mut detached = 0;
        for action in self.actions.into_iter().rev() {
            match action {
                UndoAction::Detach { entity, handler } => {
                    if scene.detach(entity, handler)? {
                        detached += 1;
                    }
                }
            }
        }
        Ok(detached)
    }
}

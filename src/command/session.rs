//! Session state - everything one editing session works against

use std::collections::BTreeSet;

use crate::catalog::InteractionCatalog;
use crate::core::error::Result;
use crate::engine::apply::{ApplyEngine, ApplyWarning};
use crate::engine::progress::ProgressSink;
use crate::engine::readiness::ReadinessChecker;
use crate::engine::undo::UndoUnit;
use crate::handler::HandlerCatalog;
use crate::registry::TargetRegistry;
use crate::scene::Scene;
use crate::template::conflict::find_duplicates;
use crate::template::document::TemplateDocument;
use crate::template::store::TemplateStore;

/// What one batch run did, minus the undo unit the session keeps
#[derive(Debug)]
pub struct ApplySummary {
    pub targets_processed: usize,
    pub attached: usize,
    pub warnings: Vec<ApplyWarning>,
}

/// One editing session: scene, loaded template, handlers, targets, history
///
/// The undo history holds the sealed unit of every batch run, newest last;
/// `undo_last` pops and rolls back exactly one unit. None of this state is
/// persisted.
pub struct Session {
    pub scene: Scene,
    pub catalog: InteractionCatalog,
    pub store: Option<TemplateStore>,
    pub handlers: HandlerCatalog,
    pub registry: TargetRegistry,
    undo_history: Vec<UndoUnit>,
}

impl Session {
    pub fn new(
        catalog: InteractionCatalog,
        store: Option<TemplateStore>,
        handlers: HandlerCatalog,
    ) -> Self {
        Self {
            scene: Scene::new(),
            catalog,
            store,
            handlers,
            registry: TargetRegistry::new(),
            undo_history: Vec::new(),
        }
    }

    /// Build a session from a loaded template document
    pub fn from_document(document: TemplateDocument, handlers: HandlerCatalog) -> Result<Self> {
        let (catalog, store) = document.into_parts()?;
        Ok(Self::new(catalog, Some(store), handlers))
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_history.len()
    }

    /// Indices of template entries whose tag an earlier entry already owns
    pub fn conflicts(&self) -> BTreeSet<usize> {
        self.store
            .as_ref()
            .map(|s| find_duplicates(s.entries()))
            .unwrap_or_default()
    }

    /// Run the batch apply and keep its undo unit in the history
    pub fn apply_template(
        &mut self,
        checker: &dyn ReadinessChecker,
        progress: &mut dyn ProgressSink,
    ) -> Result<ApplySummary> {
        let result = ApplyEngine::apply(
            &mut self.scene,
            self.store.as_ref(),
            &self.handlers,
            &self.registry,
            checker,
            progress,
        )?;

        self.undo_history.push(result.undo);
        Ok(ApplySummary {
            targets_processed: result.targets_processed,
            attached: result.attached,
            warnings: result.warnings,
        })
    }

    /// Roll back the most recent batch run as one group
    ///
    /// Returns the number of handlers detached, or None if there is
    /// nothing left to undo.
    pub fn undo_last(&mut self) -> Result<Option<usize>> {
        match self.undo_history.pop() {
            Some(unit) => Ok(Some(unit.rollback(&mut self.scene)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::progress::NullProgress;
    use crate::engine::readiness::NoopChecker;
    use crate::handler::HandlerKind;
    use crate::template::store::{HandlerRef, TemplateEntry};

    fn grab_session() -> Session {
        let catalog = InteractionCatalog::new(vec!["Grab".into()]);
        let store = TemplateStore::new(vec![TemplateEntry::with_handlers(
            "Grab",
            vec![HandlerRef("grab_handler".into())],
        )]);
        let mut handlers = HandlerCatalog::new();
        handlers.register("grab_handler", HandlerKind::Behavior);
        Session::new(catalog, Some(store), handlers)
    }

    #[test]
    fn test_apply_then_undo_roundtrip() {
        let mut session = grab_session();
        let id = session.scene.spawn("Crate");
        session.registry.add(id);
        session.registry.set_selection(0, 1, &session.catalog).unwrap();

        let summary = session
            .apply_template(&NoopChecker, &mut NullProgress)
            .unwrap();
        assert_eq!(summary.attached, 1);
        assert_eq!(session.undo_depth(), 1);
        assert_eq!(session.scene.get(id).unwrap().handlers().len(), 1);

        let detached = session.undo_last().unwrap().unwrap();
        assert_eq!(detached, 1);
        assert_eq!(session.undo_depth(), 0);
        assert!(session.scene.get(id).unwrap().handlers().is_empty());
    }

    #[test]
    fn test_undo_with_empty_history() {
        let mut session = grab_session();
        assert!(session.undo_last().unwrap().is_none());
    }

    #[test]
    fn test_conflicts_without_store() {
        let session = Session::new(InteractionCatalog::default(), None, HandlerCatalog::new());
        assert!(session.conflicts().is_empty());
    }
}

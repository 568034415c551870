//! The batch apply operation
//!
//! Walks the target registry in order, resolves each target's selected tags
//! through the template store, and attaches the matching handler types.
//! Fatal preconditions abort before any mutation; everything after that is
//! collected as warnings so one bad handler never sinks the batch.

use crate::core::error::{AssignError, Result};
use crate::engine::progress::{ProgressScope, ProgressSink};
use crate::engine::readiness::ReadinessChecker;
use crate::engine::undo::UndoUnit;
use crate::handler::HandlerCatalog;
use crate::registry::TargetRegistry;
use crate::scene::Scene;
use crate::template::store::TemplateStore;

/// Per-step warning categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Handler descriptor did not resolve, or resolved to a type that is
    /// not attachable
    InvalidHandlerType,
    /// Target already carries an equivalent handler
    DuplicateAttachment,
    /// Readiness fix failed; the target was processed anyway
    ReadinessCheckFailure,
}

/// One collected warning
#[derive(Debug, Clone)]
pub struct ApplyWarning {
    pub kind: WarningKind,
    pub message: String,
}

/// Outcome of one batch run
#[derive(Debug)]
pub struct ApplyResult {
    pub targets_processed: usize,
    pub attached: usize,
    pub warnings: Vec<ApplyWarning>,
    pub undo: UndoUnit,
}

impl ApplyResult {
    pub fn warning_count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }
}

/// Executes batch template application against a scene
pub struct ApplyEngine;

impl ApplyEngine {
    /// Attach every handler matching each target's selected tags
    ///
    /// Preconditions are checked before any mutation and before the undo
    /// unit is opened: a missing store fails with `MissingTemplate`, an
    /// empty registry with `EmptyTargetList`. After that the batch runs to
    /// completion; per-step problems are logged, collected into the result
    /// and never unwind the run. Runs synchronously on the calling thread
    /// and assumes exclusive access to the scene, store and registry.
    pub fn apply(
        scene: &mut Scene,
        store: Option<&TemplateStore>,
        handlers: &HandlerCatalog,
        registry: &TargetRegistry,
        checker: &dyn ReadinessChecker,
        progress: &mut dyn ProgressSink,
    ) -> Result<ApplyResult> {
        let store = store.ok_or(AssignError::MissingTemplate)?;
        if registry.is_empty() {
            return Err(AssignError::EmptyTargetList);
        }

        let mut undo = UndoUnit::new("Batch Attach Handlers");
        let mut warnings = Vec::new();
        let mut attached = 0;
        let mut targets_processed = 0;
        let total = registry.len();
        let mut scope = ProgressScope::new(progress);

        for (index, target) in registry.targets().iter().enumerate() {
            let name = match scene.get(target.entity) {
                Some(entity) => entity.name.clone(),
                None => {
                    tracing::debug!("Skipping vanished target {:?}", target.entity);
                    continue;
                }
            };
            targets_processed += 1;
            scope.report(index, total, &format!("Checking {}", name));

            let report = checker.check(scene, target.entity);
            if report.needs_fix {
                if let Some(detail) = &report.detail {
                    tracing::warn!("{}: {}", name, detail);
                }
                if let Err(reason) = checker.fix(scene, target.entity) {
                    let message = format!("Readiness fix failed for {}: {}", name, reason);
                    tracing::warn!("{}", message);
                    warnings.push(ApplyWarning {
                        kind: WarningKind::ReadinessCheckFailure,
                        message,
                    });
                }
            }

            for entry in store.entries() {
                if !entry.use_custom_handler || entry.handlers.is_empty() {
                    continue;
                }
                if entry.tag.is_empty() || !target.has_tag(&entry.tag) {
                    continue;
                }

                for handler_ref in &entry.handlers {
                    let handler_type = match handlers.resolve(handler_ref) {
                        Some(t) if t.attachable() => t,
                        _ => {
                            let message = format!(
                                "Handler '{}' for tag '{}' is not an attachable type, skipped",
                                handler_ref.key(),
                                entry.tag
                            );
                            tracing::warn!("{}", message);
                            warnings.push(ApplyWarning {
                                kind: WarningKind::InvalidHandlerType,
                                message,
                            });
                            continue;
                        }
                    };

                    if scene
                        .get(target.entity)
                        .is_some_and(|e| e.has_handler(handler_type.id))
                    {
                        let message = format!(
                            "{} already has {}, skipped",
                            name,
                            handler_type.key
                        );
                        tracing::warn!("{}", message);
                        warnings.push(ApplyWarning {
                            kind: WarningKind::DuplicateAttachment,
                            message,
                        });
                        continue;
                    }

                    scene.attach(target.entity, handler_type.id)?;
                    undo.record_attach(target.entity, handler_type.id);
                    attached += 1;
                    scope.report(
                        index,
                        total,
                        &format!("Attached {} to {}", handler_type.key, name),
                    );
                    tracing::info!("Attached {} to {}", handler_type.key, name);
                }
            }
        }

        undo.seal();
        Ok(ApplyResult {
            targets_processed,
            attached,
            warnings,
            undo,
        })
    }
}

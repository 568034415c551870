//! Command execution - applies front-end actions to a session

use crate::command::session::Session;
use crate::core::error::Result;
use crate::core::types::{EntityId, SelectionMask};
use crate::engine::progress::ProgressSink;
use crate::engine::readiness::ReadinessChecker;

/// An action the front end can request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTarget(EntityId),
    RemoveTarget(usize),
    SetSelection { index: usize, mask: SelectionMask },
    ApplyTemplate,
    Undo,
}

/// Result of executing one command
#[derive(Debug)]
pub struct ExecutionResult {
    pub attached: usize,
    pub warnings: usize,
    pub message: String,
}

impl ExecutionResult {
    fn note(message: impl Into<String>) -> Self {
        Self {
            attached: 0,
            warnings: 0,
            message: message.into(),
        }
    }
}

/// Executes commands against a session
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn execute(
        session: &mut Session,
        command: Command,
        checker: &dyn ReadinessChecker,
        progress: &mut dyn ProgressSink,
    ) -> Result<ExecutionResult> {
        match command {
            Command::AddTarget(entity) => {
                let added = session.registry.add(entity);
                Ok(ExecutionResult::note(if added {
                    format!("Added target ({} total)", session.registry.len())
                } else {
                    "Target already registered".to_string()
                }))
            }
            Command::RemoveTarget(index) => {
                session.registry.remove(index)?;
                Ok(ExecutionResult::note(format!(
                    "Removed target {} ({} remain)",
                    index,
                    session.registry.len()
                )))
            }
            Command::SetSelection { index, mask } => {
                session.registry.set_selection(index, mask, &session.catalog)?;
                let tags: Vec<&str> = session
                    .registry
                    .get(index)
                    .map(|t| t.resolved_tags().iter().map(String::as_str).collect())
                    .unwrap_or_default();
                Ok(ExecutionResult::note(format!(
                    "Target {} selects: {}",
                    index,
                    if tags.is_empty() { "nothing".to_string() } else { tags.join(", ") }
                )))
            }
            Command::ApplyTemplate => {
                let summary = session.apply_template(checker, progress)?;
                Ok(ExecutionResult {
                    attached: summary.attached,
                    warnings: summary.warnings.len(),
                    message: format!(
                        "Processed {} target(s), attached {} handler(s), {} warning(s)",
                        summary.targets_processed,
                        summary.attached,
                        summary.warnings.len()
                    ),
                })
            }
            Command::Undo => match session.undo_last()? {
                Some(detached) => Ok(ExecutionResult::note(format!(
                    "Rolled back last batch: detached {} handler(s)",
                    detached
                ))),
                None => Ok(ExecutionResult::note("Nothing to undo")),
            },
        }
    }
}

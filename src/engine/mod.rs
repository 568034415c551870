//! Batch apply engine
//!
//! Consumes the interaction catalog, template store and target registry,
//! attaches matching handlers to scene entities, and records every
//! attachment as a compensating action in a single undo unit.

pub mod apply;
pub mod progress;
pub mod readiness;
pub mod undo;

pub use apply::{ApplyEngine, ApplyResult, ApplyWarning, WarningKind};
pub use progress::{NullProgress, ProgressSink, TracingProgress};
pub use readiness::{MeshReadChecker, NoopChecker, ReadinessChecker, ReadinessReport};
pub use undo::{UndoAction, UndoUnit};

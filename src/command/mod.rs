//! Command surface - the abstract actions a front end drives the tool with

pub mod executor;
pub mod session;

pub use executor::{Command, CommandExecutor, ExecutionResult};
pub use session::{ApplySummary, Session};

//! Declarative field visibility
//!
//! A visibility rule names a boolean condition somewhere in an object graph
//! by a dotted path; a generic evaluator walks the graph and decides whether
//! the field carrying the rule should be shown. The walk never fails hard:
//! anything unreachable defaults to visible.

pub mod path;
pub mod rule;

pub use path::{resolve, FieldValue, Inspect, Resolution};
pub use rule::{visible_fields, FieldSpec, VisibilityRule};

//! Conditional visibility rules
//!
//! A rule is data attached to a field, not code: `{condition_path,
//! expected}`. One generic evaluator interprets every rule; fields whose
//! condition cannot be reached default to visible so a broken path never
//! hides configuration from the user.

use serde::{Deserialize, Serialize};

use super::path::{resolve, Inspect, Resolution};

/// Declarative show-this-field-if marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityRule {
    pub condition_path: String,
    pub expected: bool,
}

impl VisibilityRule {
    pub fn new(condition_path: impl Into<String>, expected: bool) -> Self {
        Self {
            condition_path: condition_path.into(),
            expected,
        }
    }

    /// Shorthand for the common "show when the flag is set" case
    pub fn when_true(condition_path: impl Into<String>) -> Self {
        Self::new(condition_path, true)
    }

    /// Visible iff the condition resolves to a boolean equal to `expected`;
    /// unresolved or non-boolean conditions default to visible
    pub fn evaluate(&self, root: &dyn Inspect) -> bool {
        match resolve(root, &self.condition_path) {
            resolution @ Resolution::Resolved(_) => match resolution.as_bool() {
                Some(b) => b == self.expected,
                None => true,
            },
            Resolution::Unresolved => true,
        }
    }
}

/// Field metadata: a name plus an optional visibility rule
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rule: Option<VisibilityRule>,
}

impl FieldSpec {
    pub fn always(name: &'static str) -> Self {
        Self { name, rule: None }
    }

    pub fn gated(name: &'static str, rule: VisibilityRule) -> Self {
        Self {
            name,
            rule: Some(rule),
        }
    }
}

/// Evaluate every spec against `root`, returning the visible field names
pub fn visible_fields<'a>(specs: &'a [FieldSpec], root: &dyn Inspect) -> Vec<&'a str> {
    specs
        .iter()
        .filter(|spec| spec.rule.as_ref().map_or(true, |r| r.evaluate(root)))
        .map(|spec| spec.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::path::FieldValue;

    struct Flags {
        use_custom_handler: bool,
    }

    impl Inspect for Flags {
        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "use_custom_handler" => Some(FieldValue::Bool(self.use_custom_handler)),
                _ => None,
            }
        }
    }

    #[test]
    fn test_rule_matches_expected_value() {
        let rule = VisibilityRule::when_true("use_custom_handler");
        assert!(rule.evaluate(&Flags { use_custom_handler: true }));
        assert!(!rule.evaluate(&Flags { use_custom_handler: false }));
    }

    #[test]
    fn test_rule_with_inverted_expectation() {
        let rule = VisibilityRule::new("use_custom_handler", false);
        assert!(rule.evaluate(&Flags { use_custom_handler: false }));
        assert!(!rule.evaluate(&Flags { use_custom_handler: true }));
    }

    #[test]
    fn test_unresolved_condition_defaults_to_visible() {
        let rule = VisibilityRule::when_true("no_such_flag");
        assert!(rule.evaluate(&Flags { use_custom_handler: false }));
    }

    #[test]
    fn test_visible_fields_filters_gated_specs() {
        let specs = vec![
            FieldSpec::always("tag"),
            FieldSpec::always("use_custom_handler"),
            FieldSpec::gated("handlers", VisibilityRule::when_true("use_custom_handler")),
        ];

        let shown = visible_fields(&specs, &Flags { use_custom_handler: true });
        assert_eq!(shown, vec!["tag", "use_custom_handler", "handlers"]);

        let hidden = visible_fields(&specs, &Flags { use_custom_handler: false });
        assert_eq!(hidden, vec!["tag", "use_custom_handler"]);
    }
}

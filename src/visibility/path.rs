//! Nested-path value resolution over an object graph
//!
//! Paths are `.`-separated segments; a segment may carry a trailing bracket
//! index, e.g. `entries[2].use_custom_handler`. Objects participate by
//! implementing `Inspect`: given a field name, hand back the value or say
//! it is absent. No runtime introspection, just declared lookups.

/// A value handed back by a field lookup
pub enum FieldValue<'a> {
    Bool(bool),
    /// A nested object the walk can continue into
    Node(&'a dyn Inspect),
    /// A sequence, consumed lazily one element at a time
    Seq(Box<dyn Iterator<Item = FieldValue<'a>> + 'a>),
}

impl std::fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "Bool({})", b),
            FieldValue::Node(_) => write!(f, "Node"),
            FieldValue::Seq(_) => write!(f, "Seq"),
        }
    }
}

/// Field lookup capability: return the named member's value or absent
pub trait Inspect {
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// Outcome of a path walk
///
/// Tri-state by design: the resolver reports what it found (or that it
/// found nothing); fallback policy belongs to the caller.
#[derive(Debug)]
pub enum Resolution<'a> {
    Resolved(FieldValue<'a>),
    Unresolved,
}

impl<'a> Resolution<'a> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    /// The resolved boolean, if the walk landed on one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Resolution::Resolved(FieldValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }
}

struct Segment<'p> {
    name: &'p str,
    index: Option<usize>,
}

fn parse_segment(raw: &str) -> Option<Segment<'_>> {
    match raw.find('[') {
        Some(open) => {
            if !raw.ends_with(']') || open == 0 {
                return None;
            }
            let index = raw[open + 1..raw.len() - 1].parse().ok()?;
            Some(Segment {
                name: &raw[..open],
                index: Some(index),
            })
        }
        None if raw.is_empty() => None,
        None => Some(Segment {
            name: raw,
            index: None,
        }),
    }
}

/// Walk `path` from `root`
///
/// Every miss resolves to `Unresolved` rather than an error: absent member,
/// malformed segment, indexing into a non-sequence, a sequence with too few
/// elements, or a non-node value before the final segment.
pub fn resolve<'a>(root: &'a dyn Inspect, path: &str) -> Resolution<'a> {
    let mut current: &'a dyn Inspect = root;
    let mut segments = path.split('.').peekable();

    while let Some(raw) = segments.next() {
        let segment = match parse_segment(raw) {
            Some(s) => s,
            None => return Resolution::Unresolved,
        };

        let mut value = match current.field(segment.name) {
            Some(v) => v,
            None => return Resolution::Unresolved,
        };

        if let Some(index) = segment.index {
            let mut iter = match value {
                FieldValue::Seq(iter) => iter,
                _ => return Resolution::Unresolved,
            };
            value = match iter.nth(index) {
                Some(v) => v,
                None => return Resolution::Unresolved,
            };
        }

        if segments.peek().is_none() {
            return Resolution::Resolved(value);
        }

        current = match value {
            FieldValue::Node(node) => node,
            _ => return Resolution::Unresolved,
        };
    }

    Resolution::Unresolved
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        active: bool,
    }

    impl Inspect for Item {
        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "active" => Some(FieldValue::Bool(self.active)),
                _ => None,
            }
        }
    }

    struct Root {
        enabled: bool,
        items: Vec<Item>,
    }

    impl Inspect for Root {
        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "enabled" => Some(FieldValue::Bool(self.enabled)),
                "items" => Some(FieldValue::Seq(Box::new(
                    self.items.iter().map(|i| FieldValue::Node(i as &dyn Inspect)),
                ))),
                _ => None,
            }
        }
    }

    fn sample_root() -> Root {
        Root {
            enabled: true,
            items: vec![
                Item { active: true },
                Item { active: false },
                Item { active: true },
            ],
        }
    }

    #[test]
    fn test_resolve_top_level_bool() {
        let root = sample_root();
        assert_eq!(resolve(&root, "enabled").as_bool(), Some(true));
    }

    #[test]
    fn test_resolve_indexed_path() {
        let root = sample_root();
        assert_eq!(resolve(&root, "items[0].active").as_bool(), Some(true));
        assert_eq!(resolve(&root, "items[1].active").as_bool(), Some(false));
        assert_eq!(resolve(&root, "items[2].active").as_bool(), Some(true));
    }

    #[test]
    fn test_index_past_end_is_unresolved() {
        let root = sample_root();
        assert!(!resolve(&root, "items[5].active").is_resolved());
    }

    #[test]
    fn test_missing_member_is_unresolved() {
        let root = sample_root();
        assert!(!resolve(&root, "missing").is_resolved());
        assert!(!resolve(&root, "items[0].missing").is_resolved());
    }

    #[test]
    fn test_indexing_a_non_sequence_is_unresolved() {
        let root = sample_root();
        assert!(!resolve(&root, "enabled[0]").is_resolved());
    }

    #[test]
    fn test_continuing_through_a_leaf_is_unresolved() {
        let root = sample_root();
        assert!(!resolve(&root, "enabled.anything").is_resolved());
    }

    #[test]
    fn test_malformed_segments_are_unresolved() {
        let root = sample_root();
        assert!(!resolve(&root, "").is_resolved());
        assert!(!resolve(&root, "items[x].active").is_resolved());
        assert!(!resolve(&root, "items[0.active").is_resolved());
        assert!(!resolve(&root, "[0].active").is_resolved());
        assert!(!resolve(&root, "items..active").is_resolved());
    }

    #[test]
    fn test_resolved_non_bool_has_no_bool_value() {
        let root = sample_root();
        let resolution = resolve(&root, "items[0]");
        assert!(resolution.is_resolved());
        assert_eq!(resolution.as_bool(), None);
    }
}

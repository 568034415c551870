//! Template entries binding interaction tags to handler descriptors

use serde::{Deserialize, Serialize};

use crate::visibility::path::{FieldValue, Inspect};
use crate::visibility::rule::{FieldSpec, VisibilityRule};

/// Reference to an attachable handler type, resolved against the
/// `HandlerCatalog` at apply time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerRef(pub String);

impl HandlerRef {
    pub fn key(&self) -> &str {
        &self.0
    }
}

/// One tag-to-handlers binding
///
/// At most one entry should own a given non-empty tag. Violations are
/// surfaced by `conflict::find_duplicates` but never block mutation; the
/// first entry in store order stays authoritative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub tag: String,
    pub use_custom_handler: bool,
    pub handlers: Vec<HandlerRef>,
}

impl TemplateEntry {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            use_custom_handler: false,
            handlers: Vec::new(),
        }
    }

    pub fn with_handlers(tag: impl Into<String>, handlers: Vec<HandlerRef>) -> Self {
        Self {
            tag: tag.into(),
            use_custom_handler: true,
            handlers,
        }
    }

    /// Presentation metadata: the handler list is only shown while the
    /// custom-handler flag is set
    pub fn field_specs() -> Vec<FieldSpec> {
        vec![
            FieldSpec::always("tag"),
            FieldSpec::always("use_custom_handler"),
            FieldSpec::gated("handlers", VisibilityRule::when_true("use_custom_handler")),
        ]
    }
}

impl Inspect for TemplateEntry {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "use_custom_handler" => Some(FieldValue::Bool(self.use_custom_handler)),
            _ => None,
        }
    }
}

/// Ordered list of template entries
///
/// Entry order is load order and is significant: it decides which entry
/// wins when a tag is duplicated, and the order handlers attach in.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    entries: Vec<TemplateEntry>,
}

impl TemplateStore {
    pub fn new(entries: Vec<TemplateEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: TemplateEntry) {
        self.entries.push(entry);
    }

    /// First entry owning the tag, per the first-wins rule
    pub fn entry_for_tag(&self, tag: &str) -> Option<&TemplateEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }
}

impl Inspect for TemplateStore {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "entries" => Some(FieldValue::Seq(Box::new(
                self.entries.iter().map(|e| FieldValue::Node(e as &dyn Inspect)),
            ))),
            _ => None,
        }
    }
}

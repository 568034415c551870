//! Template document loading
//!
//! A template document carries the interaction catalog and the template
//! entries in one file. TOML is the primary format; the same shape is
//! accepted as JSON, dispatched on file extension.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::InteractionCatalog;
use crate::core::error::{AssignError, Result};
use crate::template::store::{HandlerRef, TemplateEntry, TemplateStore};

/// On-disk shape of a template document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateDocument {
    #[serde(default)]
    pub catalog: Vec<String>,
    #[serde(default)]
    pub entries: Vec<EntryDoc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryDoc {
    pub tag: String,
    #[serde(default)]
    pub use_custom_handler: bool,
    #[serde(default)]
    pub handler_refs: Vec<String>,
}

impl TemplateDocument {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AssignError::DocumentError(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(AssignError::from)
    }

    /// Load a document from a .toml or .json file
    pub fn load_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            other => Err(AssignError::DocumentError(format!(
                "{}: unsupported extension {:?}",
                path.display(),
                other
            ))),
        }
    }

    /// Split the document into its catalog and store halves
    ///
    /// The catalog is validated (non-empty, unique tags); entry order in the
    /// document becomes store order.
    pub fn into_parts(self) -> Result<(InteractionCatalog, TemplateStore)> {
        let catalog = InteractionCatalog::new(self.catalog);
        catalog.validate().map_err(AssignError::DocumentError)?;

        let entries = self
            .entries
            .into_iter()
            .map(|doc| TemplateEntry {
                tag: doc.tag,
                use_custom_handler: doc.use_custom_handler,
                handlers: doc.handler_refs.into_iter().map(HandlerRef).collect(),
            })
            .collect();

        Ok((catalog, TemplateStore::new(entries)))
    }
}

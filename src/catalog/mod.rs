//! Interaction catalog - the ordered list of selectable interaction tags
//!
//! The catalog is the authoritative index space for selection bitmasks:
//! bit i of a target's selection mask refers to the i-th tag. Tag-to-index
//! mapping is only valid while the catalog is unchanged; reordering or
//! shrinking the catalog re-aims existing masks (see `TargetRegistry::refresh`).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::types::SelectionMask;

/// Ordered list of unique interaction tag names
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionCatalog {
    tags: Vec<String>,
}

impl InteractionCatalog {
    pub fn new(tags: Vec<String>) -> Self {
        Self { tags }
    }

    /// The ordered tag sequence
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Bit position of a tag, if present
    pub fn index_of(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|t| t == tag)
    }

    /// Decode a selection mask into the set of selected tag names
    ///
    /// Bits beyond the catalog length are ignored.
    pub fn decode(&self, mask: SelectionMask) -> HashSet<String> {
        self.tags
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, tag)| tag.clone())
            .collect()
    }

    /// Check the catalog for empty or duplicated tag names
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for (i, tag) in self.tags.iter().enumerate() {
            if tag.is_empty() {
                return Err(format!("Tag at index {} is empty", i));
            }
            if !seen.insert(tag.as_str()) {
                return Err(format!("Tag '{}' appears more than once", tag));
            }
        }
        Ok(())
    }
}

//! Handler catalog - resolves handler descriptors to attachable types
//!
//! A `HandlerRef` in a template entry is just a string key; whether it names
//! a real handler type, and whether that type satisfies the attachable
//! capability contract, is only decided here at apply time.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::HandlerTypeId;
use crate::template::store::HandlerRef;

/// What kind of capability a handler type is
///
/// Only `Behavior` satisfies the contract for attachment to scene entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerKind {
    /// Runtime behavior, attachable to entities
    Behavior,
    /// Tooling-side extension, never attachable
    EditorExtension,
    /// Data asset, never attachable
    Asset,
}

/// A registered handler type
#[derive(Debug, Clone)]
pub struct HandlerType {
    pub id: HandlerTypeId,
    pub key: String,
    pub kind: HandlerKind,
}

impl HandlerType {
    /// Whether this type satisfies the attachable capability contract
    pub fn attachable(&self) -> bool {
        matches!(self.kind, HandlerKind::Behavior)
    }
}

/// Registry of known handler types, indexed by key
#[derive(Debug, Default)]
pub struct HandlerCatalog {
    types: Vec<HandlerType>,
    by_key: AHashMap<String, usize>,
}

impl HandlerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler type and return its assigned id
    ///
    /// Re-registering an existing key returns the original id unchanged.
    pub fn register(&mut self, key: impl Into<String>, kind: HandlerKind) -> HandlerTypeId {
        let key = key.into();
        if let Some(&idx) = self.by_key.get(&key) {
            return self.types[idx].id;
        }
        let id = HandlerTypeId(self.types.len() as u32);
        self.by_key.insert(key.clone(), self.types.len());
        self.types.push(HandlerType { id, key, kind });
        id
    }

    /// Resolve a descriptor to a concrete handler type, if registered
    pub fn resolve(&self, handler_ref: &HandlerRef) -> Option<&HandlerType> {
        self.by_key.get(handler_ref.key()).map(|&idx| &self.types[idx])
    }

    pub fn get(&self, id: HandlerTypeId) -> Option<&HandlerType> {
        self.types.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

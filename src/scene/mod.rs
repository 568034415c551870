//! Scene - the mutable world of entities that handlers attach to

use ahash::AHashMap;

use crate::core::error::{AssignError, Result};
use crate::core::types::{EntityId, HandlerTypeId};

/// Mesh-like resource associated with an entity
///
/// Mutation of an entity may require its resource to be readable first;
/// the readiness checker flips this flag during preflight.
#[derive(Debug, Clone, Default)]
pub struct MeshResource {
    pub name: String,
    pub readable: bool,
}

/// One entity in the scene
#[derive(Debug, Clone, Default)]
pub struct SceneEntity {
    pub name: String,
    attached: Vec<HandlerTypeId>,
    pub resource: Option<MeshResource>,
}

impl SceneEntity {
    pub fn has_handler(&self, handler: HandlerTypeId) -> bool {
        self.attached.contains(&handler)
    }

    /// Handlers in attachment order
    pub fn handlers(&self) -> &[HandlerTypeId] {
        &self.attached
    }
}

/// The scene containing all entities
#[derive(Debug, Default)]
pub struct Scene {
    entities: AHashMap<EntityId, SceneEntity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, name: impl Into<String>) -> EntityId {
        let id = EntityId::new();
        self.entities.insert(
            id,
            SceneEntity {
                name: name.into(),
                attached: Vec::new(),
                resource: None,
            },
        );
        id
    }

    pub fn spawn_with_resource(&mut self, name: impl Into<String>, resource: MeshResource) -> EntityId {
        let id = self.spawn(name);
        self.entities.get_mut(&id).unwrap().resource = Some(resource);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneEntity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SceneEntity> {
        self.entities.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Attach a handler type to an entity
    ///
    /// Returns false without mutating if the entity already carries the
    /// handler; attachment is duplicate-safe.
    pub fn attach(&mut self, id: EntityId, handler: HandlerTypeId) -> Result<bool> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(AssignError::EntityNotFound(id))?;
        if entity.attached.contains(&handler) {
            return Ok(false);
        }
        entity.attached.push(handler);
        Ok(true)
    }

    /// Detach a handler type from an entity, if present
    pub fn detach(&mut self, id: EntityId, handler: HandlerTypeId) -> Result<bool> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(AssignError::EntityNotFound(id))?;
        if let Some(pos) = entity.attached.iter().position(|h| *h == handler) {
            entity.attached.remove(pos);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

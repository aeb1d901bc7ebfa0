//! The entity registry: single owner of every live entity.
//!
//! Ids are allocated monotonically and never reused within a world, so the
//! id-ordered map doubles as insertion order and a lookup with a stale id is
//! a harmless miss rather than a dangling reference. Removal during
//! iteration is not offered; passes collect ids and apply them afterwards.

use std::collections::BTreeMap;

use crate::entity::{Entity, EntityId, EntityVariant};
use crate::error::EntityError;

#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: BTreeMap<EntityId, Entity>,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Allocates an id and inserts the entity built from it.
    pub fn spawn(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.allocate_id();
        self.entities.insert(id, build(id));
        id
    }

    /// Inserts a fully built entity. Fails on an already-present id.
    pub fn insert(&mut self, entity: Entity) -> Result<(), EntityError> {
        if self.entities.contains_key(&entity.id) {
            return Err(EntityError::DuplicateId(entity.id));
        }
        // Keep future allocations above any explicitly inserted id.
        self.next_id = self.next_id.max(entity.id.0 + 1);
        self.entities.insert(entity.id, entity);
        Ok(())
    }

    /// Removes and returns an entity. A no-op returning `None` if absent.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// All live entities in insertion order. Lazy and restartable; every
    /// entity is renderable.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    /// Entities of one variant, in insertion order.
    pub fn iter_variant(&self, variant: EntityVariant) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values().filter(move |e| e.kind.variant() == variant)
    }

    pub fn count(&self, variant: EntityVariant) -> usize {
        self.iter_variant(variant).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drops every entity and resets id allocation, so a rebuilt world gets
    /// the same ids a fresh registry would hand out.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.next_id = 0;
    }
}

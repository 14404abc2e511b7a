//! Combat registry: the id → handle map attack resolution reads.
//!
//! Entities are registered at spawn and unregistered at removal, so an attack
//! pass never sees a despawned handle.

use std::collections::BTreeMap;

use hecs::Entity;

use horde_core::types::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    pub entity: Entity,
    /// False once the entity has been killed (it may still be fading).
    pub alive: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CombatRegistry {
    entries: BTreeMap<EntityId, RegistryEntry>,
}

impl CombatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: EntityId, entity: Entity) {
        self.entries.insert(id, RegistryEntry { entity, alive: true });
    }

    pub fn unregister(&mut self, id: EntityId) -> Option<RegistryEntry> {
        self.entries.remove(&id)
    }

    /// Clear the alive flag. Returns false if it was already cleared or unknown.
    pub fn mark_dead(&mut self, id: EntityId) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) if entry.alive => {
                entry.alive = false;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: EntityId) -> Option<RegistryEntry> {
        self.entries.get(&id).copied()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Live entries in ascending id order.
    pub fn live(&self) -> impl Iterator<Item = (EntityId, Entity)> + '_ {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.alive)
            .map(|(&id, entry)| (id, entry.entity))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The arena that owns every entity and keeps the hierarchy consistent.

use std::collections::HashMap;

use tessera_core::ecs::{EntityId, EntityIdSet};

use crate::ecs::{
    Archetype, ArchetypeSet, ComponentCollection, ComponentSet, Entity, HierarchyError,
    StorageError,
};

/// The authoritative `EntityId -> Entity` store of a hosting application.
///
/// Entities reference each other only by id, so the registry is the single
/// owner of every entity and no reference cycles can form in memory. All
/// hierarchy edits made through the registry update both the child's
/// `parent` and the parent's `children`.
///
/// The root id is a sentinel and never stored; top-level entities simply
/// name it as their parent.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: HashMap<EntityId, Entity>,
}

impl EntityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entity is stored.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns `true` if `id` names a stored entity.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Returns the entity stored under `id`.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Returns the entity stored under `id` for mutation.
    ///
    /// Editing `parent` or `children` directly bypasses the consistency the
    /// registry otherwise maintains; prefer [`set_parent`](Self::set_parent).
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Deep-copies every entity, as `clone` does, but reports a component
    /// locked for writing instead of panicking.
    pub fn try_clone(&self) -> Result<Self, StorageError> {
        let entities = self
            .entities
            .iter()
            .map(|(id, entity)| entity.try_clone().map(|copy| (*id, copy)))
            .collect::<Result<_, _>>()?;
        Ok(Self { entities })
    }

    /// Iterates over every stored entity, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities.iter().map(|(id, entity)| (*id, entity))
    }

    /// Iterates over the entities attached directly to the root.
    pub fn top_level(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.iter()
            .filter(|(_, entity)| entity.is_top_level())
            .map(|(id, _)| id)
    }

    /// Iterates over the entities holding every component type in `S`.
    pub fn with_all<S: ComponentSet>(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.iter()
            .filter(|(_, entity)| entity.components.has_all::<S>())
    }

    /// Iterates over the entities holding at least one component type in `S`.
    pub fn with_any<S: ComponentSet>(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.iter()
            .filter(|(_, entity)| entity.components.has_any::<S>())
    }

    /// Spawns an empty top-level entity.
    pub fn spawn(&mut self) -> EntityId {
        self.spawn_with(ComponentCollection::new())
    }

    /// Spawns a top-level entity owning `components`.
    pub fn spawn_with(&mut self, components: ComponentCollection) -> EntityId {
        let id = EntityId::new();
        log::debug!("Spawning entity {id} with {} component(s).", components.len());
        self.entities.insert(id, Entity::with_components(components));
        id
    }

    /// Spawns a top-level entity holding a default instance of every type in `S`.
    pub fn spawn_archetype<S: ArchetypeSet>(&mut self) -> EntityId {
        self.spawn_with(Archetype::<S>::create_instance())
    }

    /// Spawns an entity owning `components` under `parent`.
    ///
    /// `parent` may be the root id. Fails if it names no stored entity.
    pub fn spawn_child(
        &mut self,
        parent: EntityId,
        components: ComponentCollection,
    ) -> Result<EntityId, HierarchyError> {
        self.ensure_known(parent)?;
        let id = self.spawn_with(components);
        self.link(id, parent);
        Ok(id)
    }

    /// Moves `child` under `parent`, keeping both sides of the link in sync.
    ///
    /// `parent` may be the root id. Rejects unknown ids, re-parenting the root,
    /// and any move that would make `child` its own ancestor.
    pub fn set_parent(&mut self, child: EntityId, parent: EntityId) -> Result<(), HierarchyError> {
        if child.is_root() {
            return Err(HierarchyError::RootHasNoParent);
        }
        let current = self
            .entities
            .get(&child)
            .map(|entity| entity.parent)
            .ok_or(HierarchyError::UnknownEntity(child))?;
        self.ensure_known(parent)?;

        if parent == child || self.ancestors(parent).contains(&child) {
            return Err(HierarchyError::CycleDetected { child, parent });
        }
        if current == parent {
            return Ok(());
        }

        self.unlink(child, current);
        self.link(child, parent);
        log::debug!("Re-parented entity {child} from {current} to {parent}.");
        Ok(())
    }

    /// Moves `child` back to the top level.
    pub fn detach(&mut self, child: EntityId) -> Result<(), HierarchyError> {
        self.set_parent(child, EntityId::root())
    }

    /// Removes `id` together with all of its descendants.
    ///
    /// Returns the number of entities removed, `0` if `id` is unknown.
    pub fn despawn(&mut self, id: EntityId) -> usize {
        let Some(parent) = self.entities.get(&id).map(|entity| entity.parent) else {
            return 0;
        };
        self.unlink(id, parent);

        let mut removed = 0;
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(entity) = self.entities.remove(&next) {
                removed += 1;
                pending.extend(entity.children);
            }
        }

        log::debug!("Despawned entity {id} and {} descendant(s).", removed - 1);
        removed
    }

    /// Returns the chain of parents above `id`, nearest first, excluding the root.
    pub fn ancestors(&self, id: EntityId) -> Vec<EntityId> {
        let mut chain = Vec::new();
        let mut current = id;
        // Bounded so that hand-edited cycles cannot hang the walk.
        for _ in 0..=self.entities.len() {
            match self.entities.get(&current) {
                Some(entity) if !entity.parent.is_root() => {
                    current = entity.parent;
                    chain.push(current);
                }
                _ => break,
            }
        }
        chain
    }

    /// Returns every entity below `id`, in depth-first order.
    pub fn descendants(&self, id: EntityId) -> Vec<EntityId> {
        let mut found = Vec::new();
        let mut seen = EntityIdSet::new();
        let mut pending: Vec<EntityId> = self
            .entities
            .get(&id)
            .map(|entity| entity.children.iter().copied().collect())
            .unwrap_or_default();
        while let Some(next) = pending.pop() {
            if !seen.insert(next) {
                continue;
            }
            found.push(next);
            if let Some(entity) = self.entities.get(&next) {
                pending.extend(entity.children.iter().copied());
            }
        }
        found
    }

    fn ensure_known(&self, id: EntityId) -> Result<(), HierarchyError> {
        if id.is_root() || self.entities.contains_key(&id) {
            Ok(())
        } else {
            Err(HierarchyError::UnknownEntity(id))
        }
    }

    fn link(&mut self, child: EntityId, parent: EntityId) {
        if let Some(entity) = self.entities.get_mut(&child) {
            entity.parent = parent;
        }
        if let Some(entity) = self.entities.get_mut(&parent) {
            entity.children.insert(child);
        }
    }

    fn unlink(&mut self, child: EntityId, parent: EntityId) {
        if let Some(entity) = self.entities.get_mut(&parent) {
            entity.children.remove(&child);
        }
    }
}

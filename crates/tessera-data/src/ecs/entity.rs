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

use tessera_core::ecs::{EntityId, EntityIdSet};

use crate::ecs::{ComponentCollection, StorageError};

/// The record stored for every entity: its place in the hierarchy and its
/// components.
///
/// Parent and children are references by id, never ownership. The `Entity`
/// enforces no cross-field invariant; keeping `parent` and the parent's
/// `children` in agreement is the job of whoever owns the entities, such as
/// [`EntityRegistry`](crate::ecs::EntityRegistry).
///
/// Cloning an entity deep-copies its components. See
/// [`ComponentCollection::try_clone`] for the non-panicking variant.
#[derive(Debug, Clone)]
pub struct Entity {
    /// The parent entity, or [`EntityId::root`] for a top-level entity.
    pub parent: EntityId,
    /// The direct children of this entity.
    pub children: EntityIdSet,
    /// The entity's components.
    pub components: ComponentCollection,
}

impl Entity {
    /// Creates a top-level entity with no children and no components.
    pub fn new() -> Self {
        Self::with_components(ComponentCollection::new())
    }

    /// Creates a top-level entity owning `components`.
    pub fn with_components(components: ComponentCollection) -> Self {
        Self {
            parent: EntityId::root(),
            children: EntityIdSet::new(),
            components,
        }
    }

    /// Deep-copies the entity, failing instead of panicking if one of its
    /// components is locked for writing.
    pub fn try_clone(&self) -> Result<Self, StorageError> {
        Ok(Self {
            parent: self.parent,
            children: self.children.clone(),
            components: self.components.try_clone()?,
        })
    }

    /// Returns `true` if the entity hangs directly off the root.
    pub fn is_top_level(&self) -> bool {
        self.parent.is_root()
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

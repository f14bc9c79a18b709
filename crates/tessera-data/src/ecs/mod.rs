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

//! Implements Tessera's type-indexed component storage.
//!
//! Every entity owns one [`ComponentCollection`]: a heterogeneous map holding
//! at most one value per component type. [`Archetype`] validates or builds a
//! collection against a fixed list of required types, and [`EntityRegistry`]
//! is the arena that owns entities and their parent/child links.

mod archetype;
mod collection;
mod component;
mod entity;
mod error;
mod observer;
mod registry;
mod set;

pub use archetype::Archetype;
pub use collection::ComponentCollection;
pub use component::{Component, ComponentBase, TagComponent};
pub use entity::Entity;
pub use error::{HierarchyError, StorageError};
pub use observer::{AnyComponentRef, ComponentObserver, ComponentRef};
pub use registry::EntityRegistry;
pub use set::{ArchetypeSet, ComponentSet};
pub use tessera_core::ecs::{EntityId, EntityIdSet};
pub use tessera_macros::{Component, TagComponent};

#[cfg(test)]
mod tests;

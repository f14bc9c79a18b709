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

use std::collections::HashSet;
use std::marker::PhantomData;

use crate::ecs::{ArchetypeSet, ComponentCollection};

/// A fixed set of required component types, declared as a tuple.
///
/// `Archetype` carries no state and is never instantiated; its associated
/// functions validate or materialize the required set `S` against a
/// [`ComponentCollection`].
///
/// ```rust
/// use tessera_data::ecs::{Archetype, Component};
///
/// #[derive(Clone, Default, Component)]
/// struct Position(f32, f32);
/// #[derive(Clone, Default, Component)]
/// struct Velocity(f32, f32);
///
/// type Mover = Archetype<(Position, Velocity)>;
///
/// let collection = Mover::create_instance();
/// assert!(Mover::is_present_in(&collection));
/// assert_eq!(collection.len(), 2);
/// ```
pub struct Archetype<S: ArchetypeSet> {
    _required: PhantomData<fn() -> S>,
}

impl<S: ArchetypeSet> Archetype<S> {
    /// Returns `true` if `collection` holds every required type.
    pub fn is_present_in(collection: &ComponentCollection) -> bool {
        collection.has_all::<S>()
    }

    /// Builds a fresh collection holding a default-constructed instance of
    /// every required type.
    pub fn create_instance() -> ComponentCollection {
        let mut collection = ComponentCollection::new();
        S::emplace_each(&mut collection);
        debug_assert_eq!(
            collection.len(),
            Self::component_count(),
            "Archetypes cannot list a component type more than once."
        );
        collection
    }

    /// Emplaces the required types into an existing collection.
    ///
    /// Returns `true` only if none of them was already present. This is not a
    /// transaction: types are emplaced in declaration order, the first one
    /// already present stops the pass, and types inserted before it are kept.
    pub fn supplement(collection: &mut ComponentCollection) -> bool {
        let supplemented = S::emplace_until_conflict(collection);
        if !supplemented {
            log::trace!(
                "Archetype supplement stopped on an existing component of {}.",
                std::any::type_name::<S>()
            );
        }
        supplemented
    }

    /// The number of distinct required types.
    pub fn component_count() -> usize {
        S::type_ids().into_iter().collect::<HashSet<_>>().len()
    }
}

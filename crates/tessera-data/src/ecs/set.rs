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

//! Compile-time lists of component types.
//!
//! Variadic type lists are expressed as tuples: `(Position, Velocity)` names
//! two component types, `()` names none. The traits here are implemented for
//! tuples of up to twelve components.

use std::any::TypeId;

use crate::ecs::{Component, ComponentCollection};

/// A fixed list of component types that can be checked against a collection.
pub trait ComponentSet {
    /// Returns the `TypeId` of every listed type, in declaration order.
    fn type_ids() -> Vec<TypeId>;

    /// Returns `true` if every listed type is present. Stops at the first miss.
    fn all_in(collection: &ComponentCollection) -> bool;

    /// Returns `true` if at least one listed type is present. Stops at the first hit.
    fn any_in(collection: &ComponentCollection) -> bool;
}

/// A [`ComponentSet`] whose members can all be default-constructed, which is
/// what an [`Archetype`](crate::ecs::Archetype) needs to materialize them.
pub trait ArchetypeSet: ComponentSet {
    /// Default-constructs and emplaces every listed type, regardless of
    /// whether earlier emplacements succeeded.
    fn emplace_each(collection: &mut ComponentCollection);

    /// Default-constructs and emplaces the listed types in order, stopping at
    /// the first type that is already present.
    ///
    /// Types emplaced before the conflict stay in the collection. Returns
    /// `true` only if every type was inserted.
    fn emplace_until_conflict(collection: &mut ComponentCollection) -> bool;
}

impl ComponentSet for () {
    fn type_ids() -> Vec<TypeId> {
        Vec::new()
    }

    fn all_in(_collection: &ComponentCollection) -> bool {
        true
    }

    fn any_in(_collection: &ComponentCollection) -> bool {
        false
    }
}

impl ArchetypeSet for () {
    fn emplace_each(_collection: &mut ComponentCollection) {}

    fn emplace_until_conflict(_collection: &mut ComponentCollection) -> bool {
        true
    }
}

macro_rules! impl_component_set_tuple {
    ($($C:ident),+) => {
        impl<$($C: Component),+> ComponentSet for ($($C,)+) {
            fn type_ids() -> Vec<TypeId> {
                vec![$(TypeId::of::<$C>()),+]
            }

            fn all_in(collection: &ComponentCollection) -> bool {
                $(collection.contains::<$C>())&&+
            }

            fn any_in(collection: &ComponentCollection) -> bool {
                $(collection.contains::<$C>())||+
            }
        }

        impl<$($C: Component + Default),+> ArchetypeSet for ($($C,)+) {
            fn emplace_each(collection: &mut ComponentCollection) {
                $(collection.emplace_default::<$C>();)+
            }

            fn emplace_until_conflict(collection: &mut ComponentCollection) -> bool {
                $(collection.emplace_default::<$C>())&&+
            }
        }
    };
}

impl_component_set_tuple!(C1);
impl_component_set_tuple!(C1, C2);
impl_component_set_tuple!(C1, C2, C3);
impl_component_set_tuple!(C1, C2, C3, C4);
impl_component_set_tuple!(C1, C2, C3, C4, C5);
impl_component_set_tuple!(C1, C2, C3, C4, C5, C6);
impl_component_set_tuple!(C1, C2, C3, C4, C5, C6, C7);
impl_component_set_tuple!(C1, C2, C3, C4, C5, C6, C7, C8);
impl_component_set_tuple!(C1, C2, C3, C4, C5, C6, C7, C8, C9);
impl_component_set_tuple!(C1, C2, C3, C4, C5, C6, C7, C8, C9, C10);
impl_component_set_tuple!(C1, C2, C3, C4, C5, C6, C7, C8, C9, C10, C11);
impl_component_set_tuple!(C1, C2, C3, C4, C5, C6, C7, C8, C9, C10, C11, C12);

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

//! The capability traits that gate which types may be stored as components.

use std::any::{type_name, Any};

/// The erased capability every stored component exposes.
///
/// This is not a behavioural interface: it only allows a component to be
/// held behind a `Box<dyn ComponentBase>`, dropped through that box, and
/// recovered as its concrete type with a checked downcast. It is implemented
/// automatically for every [`Component`].
pub trait ComponentBase: Any + Send + Sync {
    /// Casts the component to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Casts the component to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Converts the boxed component into a `Box<dyn Any>` for by-value downcasting.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;

    /// The Rust type name of the concrete component, for diagnostics.
    fn component_name(&self) -> &'static str;
}

impl<T: Component> ComponentBase for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }

    fn component_name(&self) -> &'static str {
        type_name::<T>()
    }
}

/// A marker trait for types that can be used as components in the ECS.
///
/// This trait must be implemented (usually through `#[derive(Component)]`) for
/// any type you wish to attach to an entity. Every component carries the
/// [`ComponentBase`] capability; its `Any + Send + Sync` bounds keep borrowed
/// data out of component storage and let a collection move between threads.
/// `Clone` is what makes a deep copy of a
/// [`ComponentCollection`](crate::ecs::ComponentCollection) possible.
///
/// A type that does not implement `Component` cannot be passed to any storage
/// or archetype operation; the mistake is reported by the compiler:
///
/// ```compile_fail
/// use tessera_data::ecs::ComponentCollection;
///
/// struct Unregistered(u32);
///
/// let mut collection = ComponentCollection::new();
/// collection.emplace(Unregistered(1));
/// ```
///
/// Deriving `Component` on a type that cannot be cloned fails as well:
///
/// ```compile_fail
/// use tessera_data::ecs::Component;
///
/// #[derive(Component)]
/// struct Handle(u32);
/// ```
///
/// Once registered, the same type is accepted:
///
/// ```
/// use tessera_data::ecs::{Component, ComponentCollection};
///
/// #[derive(Clone, Component)]
/// struct Handle(u32);
///
/// let mut collection = ComponentCollection::new();
/// assert!(collection.emplace(Handle(1)));
/// ```
pub trait Component: ComponentBase + Clone {}

/// A marker for components that carry no data and exist purely for presence
/// queries (e.g. `Player`, `Hidden`).
///
/// `#[derive(TagComponent)]` implements this together with [`Component`] and
/// rejects, at compile time, any type that is not zero-sized:
///
/// ```compile_fail
/// use tessera_data::ecs::TagComponent;
///
/// #[derive(Clone, Default, TagComponent)]
/// struct Hidden(bool);
/// ```
///
/// ```
/// use tessera_data::ecs::TagComponent;
///
/// #[derive(Clone, Default, TagComponent)]
/// struct Hidden;
/// ```
pub trait TagComponent: Component + Default {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Component, TagComponent};

    #[derive(Debug, Clone, PartialEq, Component)]
    struct Health(u32);

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, TagComponent)]
    struct Frozen;

    fn require_tag<T: TagComponent>() -> T {
        T::default()
    }

    #[test]
    fn test_boxed_component_downcasts_to_concrete_type() {
        let boxed: Box<dyn ComponentBase> = Box::new(Health(7));
        assert!(boxed.component_name().ends_with("Health"));
        assert_eq!((*boxed).as_any().downcast_ref::<Health>(), Some(&Health(7)));
        assert!((*boxed).as_any().downcast_ref::<Frozen>().is_none());

        let owned = boxed.into_any().downcast::<Health>().unwrap();
        assert_eq!(*owned, Health(7));
    }

    #[test]
    fn test_boxed_component_mutates_through_any() {
        let mut boxed: Box<dyn ComponentBase> = Box::new(Health(1));
        if let Some(health) = (*boxed).as_any_mut().downcast_mut::<Health>() {
            health.0 = 99;
        }
        assert_eq!((*boxed).as_any().downcast_ref::<Health>(), Some(&Health(99)));
    }

    #[test]
    fn test_tag_components_are_zero_sized() {
        assert_eq!(require_tag::<Frozen>(), Frozen);
        assert_eq!(std::mem::size_of::<Frozen>(), 0);
    }
}

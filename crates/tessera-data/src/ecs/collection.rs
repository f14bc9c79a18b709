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

//! Type-indexed, single-instance-per-type component storage.

use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, TryLockError};

use crate::ecs::observer::ComponentSlot;
use crate::ecs::{
    AnyComponentRef, Component, ComponentObserver, ComponentRef, ComponentSet, StorageError,
};

/// An internal helper trait over a component's storage slot.
///
/// This trait erases `T` while keeping the operations the collection needs
/// without knowing the concrete type: duplicating the value for a deep copy,
/// recovering the typed slot for lookups, and detaching the value on extract.
/// None of them waits on the component's lock.
trait ComponentCell: Send + Sync {
    /// The Rust type name of the stored component.
    fn component_name(&self) -> &'static str;

    /// Clones the stored value into a brand new, unshared slot.
    ///
    /// Fails if the value is currently locked for writing.
    fn try_duplicate(&self) -> Result<Arc<dyn ComponentCell>, StorageError>;

    /// Casts the slot to `Arc<dyn Any>` so it can be downcast to `Arc<ComponentSlot<T>>`.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// Hands out a shared handle on the value, independent of the slot.
    fn detach(&self) -> AnyComponentRef;
}

impl<T: Component> ComponentCell for ComponentSlot<T> {
    fn component_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn try_duplicate(&self) -> Result<Arc<dyn ComponentCell>, StorageError> {
        let value = match self.value.try_read() {
            Ok(guard) => guard.clone(),
            // A panic while a guard was held leaves plain data behind; copy it.
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().clone(),
            Err(TryLockError::WouldBlock) => {
                return Err(StorageError::ComponentLocked {
                    component: self.component_name(),
                })
            }
        };
        Ok(Arc::new(ComponentSlot::new(value)))
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn detach(&self) -> AnyComponentRef {
        AnyComponentRef::new(Arc::clone(&self.value))
    }
}

/// A collection of components indexed by their type.
///
/// At most one component of any given type is stored. The collection owns
/// its components exclusively; [`get`](Self::get) hands out weak observations
/// that never extend a component's lifetime.
///
/// Cloning a collection performs a deep copy: every component is cloned into
/// a fresh slot, so mutations through the copy never reach the original. A
/// copy reads each component without waiting; see
/// [`try_clone`](Self::try_clone) for the case where one is locked for
/// writing.
///
/// The collection performs no internal synchronization of its own structure.
/// Every structural change requires `&mut self`.
#[derive(Default)]
pub struct ComponentCollection {
    /// A map from a component's `TypeId` to its erased storage cell.
    cells: HashMap<TypeId, Arc<dyn ComponentCell>>,
}

impl ComponentCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct component types stored.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the collection holds no components.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Releases every stored component.
    ///
    /// Observers of the removed components stop resolving.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Inserts `component` keyed by its type.
    ///
    /// Returns `false` and drops `component` if a component of type `T` is
    /// already stored; the existing one is left untouched. To replace a
    /// component, [`erase`](Self::erase) it first.
    pub fn emplace<T: Component>(&mut self, component: T) -> bool {
        match self.cells.entry(TypeId::of::<T>()) {
            Entry::Occupied(_) => {
                log::trace!(
                    "Component '{}' already present; discarding the new value.",
                    std::any::type_name::<T>()
                );
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(ComponentSlot::new(component)));
                true
            }
        }
    }

    /// Inserts a default-constructed `T`. See [`emplace`](Self::emplace).
    pub fn emplace_default<T: Component + Default>(&mut self) -> bool {
        self.emplace(T::default())
    }

    /// Removes the component of type `T` and transfers its ownership to the caller.
    ///
    /// Returns `None` if no such component is stored. The returned handle
    /// shares the value with any [`ComponentRef`]
    /// still held by other code; use
    /// [`ComponentRef::try_unwrap`] to
    /// take the value itself. Observers of the component stop resolving
    /// immediately. The component's lock is never touched, so this cannot
    /// wait on an outstanding guard.
    pub fn extract<T: Component>(&mut self) -> Option<ComponentRef<T>> {
        let component = self.extract_erased(TypeId::of::<T>())?;
        // The map key guarantees the concrete type; a mismatch cannot happen.
        component.downcast::<T>().ok()
    }

    /// Removes the component keyed by `type_id` and returns it type-erased.
    pub fn extract_erased(&mut self, type_id: TypeId) -> Option<AnyComponentRef> {
        self.cells.remove(&type_id).map(|cell| cell.detach())
    }

    /// Removes and drops the component of type `T`.
    ///
    /// Returns `true` if a component was removed.
    pub fn erase<T: Component>(&mut self) -> bool {
        self.cells.remove(&TypeId::of::<T>()).is_some()
    }

    /// Returns a weak observation of the stored `T`.
    ///
    /// The observer is empty if no `T` is stored.
    pub fn get<T: Component>(&self) -> ComponentObserver<T> {
        self.cells
            .get(&TypeId::of::<T>())
            .and_then(|cell| {
                Arc::clone(cell)
                    .into_any_arc()
                    .downcast::<ComponentSlot<T>>()
                    .ok()
            })
            .map(|typed| ComponentObserver::new(&typed))
            .unwrap_or_default()
    }

    /// Returns `true` if a component of type `T` is stored.
    pub fn contains<T: Component>(&self) -> bool {
        self.cells.contains_key(&TypeId::of::<T>())
    }

    /// Returns `true` if every type in `S` is stored.
    ///
    /// `S` is a tuple of component types; the empty tuple yields `true`.
    pub fn has_all<S: ComponentSet>(&self) -> bool {
        S::all_in(self)
    }

    /// Returns `true` if at least one type in `S` is stored.
    ///
    /// `S` is a tuple of component types; the empty tuple yields `false`.
    pub fn has_any<S: ComponentSet>(&self) -> bool {
        S::any_in(self)
    }

    /// Deep-copies the collection.
    ///
    /// Fails with [`StorageError::ComponentLocked`] if a component is
    /// currently locked for writing through a
    /// [`ComponentRef`], instead of waiting for the
    /// guard to be released.
    pub fn try_clone(&self) -> Result<Self, StorageError> {
        Ok(Self {
            cells: self.duplicate_cells()?,
        })
    }

    /// Replaces the contents of `self` with a deep copy of `source`.
    ///
    /// On failure `self` is left untouched. On success every component
    /// previously stored in `self` is released, so its observers stop
    /// resolving.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), StorageError> {
        let copied = source.duplicate_cells()?;
        self.cells.clear();
        self.cells.extend(copied);
        Ok(())
    }

    fn duplicate_cells(&self) -> Result<HashMap<TypeId, Arc<dyn ComponentCell>>, StorageError> {
        self.cells
            .iter()
            .map(|(type_id, cell)| cell.try_duplicate().map(|copy| (*type_id, copy)))
            .collect()
    }

    /// Returns the type names of the stored components, in no particular order.
    pub fn component_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.values().map(|cell| cell.component_name())
    }
}

/// # Panics
///
/// `clone` and `clone_from` panic if a component is locked for writing, the
/// way `RefCell` does for an outstanding mutable borrow. Use
/// [`ComponentCollection::try_clone`] where that can happen.
impl Clone for ComponentCollection {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(error) => panic!("{error}"),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(error) = self.try_clone_from(source) {
            panic!("{error}");
        }
    }
}

impl fmt::Debug for ComponentCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.component_names().collect();
        names.sort_unstable();
        f.debug_struct("ComponentCollection")
            .field("components", &names)
            .finish()
    }
}

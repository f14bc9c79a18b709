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

//! Non-owning and shared handles onto components stored in a
//! [`ComponentCollection`](crate::ecs::ComponentCollection).

use std::any::{type_name, Any};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use crate::ecs::Component;

/// The storage slot a collection keeps for one component.
///
/// The collection holds the only strong reference to the slot, so observers
/// (which hold a `Weak` to it) stop resolving the moment the component leaves
/// the collection. The value itself sits in a separate `Arc` that
/// [`ComponentRef`] handles may share.
pub(crate) struct ComponentSlot<T: Component> {
    pub(crate) value: Arc<RwLock<T>>,
}

impl<T: Component> ComponentSlot<T> {
    pub(crate) fn new(component: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(component)),
        }
    }
}

/// A weak observation of a component stored in a collection.
///
/// Returned by [`ComponentCollection::get`](crate::ecs::ComponentCollection::get).
/// It never keeps the component alive: once the component is erased,
/// extracted, cleared or its collection dropped, [`lock`](Self::lock) returns
/// `None`. An observer for a type that was absent at lookup time is empty from
/// the start.
pub struct ComponentObserver<T: Component> {
    slot: Weak<ComponentSlot<T>>,
}

impl<T: Component> ComponentObserver<T> {
    pub(crate) fn new(slot: &Arc<ComponentSlot<T>>) -> Self {
        Self {
            slot: Arc::downgrade(slot),
        }
    }

    /// Returns `true` while the observed component is still stored.
    pub fn is_alive(&self) -> bool {
        self.slot.strong_count() > 0
    }

    /// Resolves the observation into a strong handle on the component.
    ///
    /// The handle shares the value, not its place in the collection: if the
    /// component is removed while the handle exists, the observer stops
    /// resolving but the handle keeps the value alive.
    pub fn lock(&self) -> Option<ComponentRef<T>> {
        self.slot.upgrade().map(|slot| ComponentRef {
            cell: Arc::clone(&slot.value),
        })
    }

    /// Runs `f` with shared access to the component, if it is still alive.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let component = self.lock()?;
        let guard = component.read();
        Some(f(&guard))
    }

    /// Runs `f` with exclusive access to the component, if it is still alive.
    pub fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let component = self.lock()?;
        let mut guard = component.write();
        Some(f(&mut guard))
    }
}

impl<T: Component> Default for ComponentObserver<T> {
    /// Creates an empty observer that never resolves.
    fn default() -> Self {
        Self { slot: Weak::new() }
    }
}

impl<T: Component> Clone for ComponentObserver<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Weak::clone(&self.slot),
        }
    }
}

impl<T: Component> fmt::Debug for ComponentObserver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentObserver")
            .field("component", &type_name::<T>())
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// A shared-ownership handle on a component value.
///
/// Obtained from [`ComponentObserver::lock`] or handed out by
/// [`ComponentCollection::extract`](crate::ecs::ComponentCollection::extract).
/// Every handle to the same value sees the same data.
pub struct ComponentRef<T: Component> {
    cell: Arc<RwLock<T>>,
}

impl<T: Component> ComponentRef<T> {
    /// Acquires shared access to the component.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        // A panic while a guard was held leaves plain data behind; keep serving it.
        self.cell.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires exclusive access to the component.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.cell.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` if both handles share the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }

    /// Moves the value out if this is the last handle to it.
    ///
    /// Otherwise the handle is given back unchanged. Never waits on a lock.
    pub fn try_unwrap(self) -> Result<T, Self> {
        Arc::try_unwrap(self.cell)
            .map(|cell| cell.into_inner().unwrap_or_else(PoisonError::into_inner))
            .map_err(|cell| Self { cell })
    }
}

impl<T: Component> Clone for ComponentRef<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: Component> fmt::Debug for ComponentRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRef")
            .field("component", &type_name::<T>())
            .finish()
    }
}

/// A type-erased [`ComponentRef`], returned by
/// [`ComponentCollection::extract_erased`](crate::ecs::ComponentCollection::extract_erased).
pub struct AnyComponentRef {
    cell: Arc<dyn Any + Send + Sync>,
    name: &'static str,
}

impl AnyComponentRef {
    pub(crate) fn new<T: Component>(cell: Arc<RwLock<T>>) -> Self {
        Self {
            cell,
            name: type_name::<T>(),
        }
    }

    /// The Rust type name of the held component.
    pub fn component_name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if the held component is a `T`.
    pub fn is<T: Component>(&self) -> bool {
        self.cell.is::<RwLock<T>>()
    }

    /// Recovers the typed handle, or gives `self` back if the type differs.
    pub fn downcast<T: Component>(self) -> Result<ComponentRef<T>, Self> {
        let name = self.name;
        self.cell
            .downcast::<RwLock<T>>()
            .map(|cell| ComponentRef { cell })
            .map_err(|cell| Self { cell, name })
    }
}

impl fmt::Debug for AnyComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyComponentRef")
            .field("component", &self.name)
            .finish()
    }
}

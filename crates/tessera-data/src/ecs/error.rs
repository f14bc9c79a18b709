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

//! Errors reported by component storage and by the entity registry.

use std::fmt;

use tessera_core::ecs::EntityId;

/// An error raised when a parent/child edit would break the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyError {
    /// The referenced entity is not stored in the registry.
    UnknownEntity(EntityId),
    /// The root sentinel cannot be given a parent.
    RootHasNoParent,
    /// The edit would make an entity its own ancestor.
    CycleDetected {
        /// The entity being re-parented.
        child: EntityId,
        /// The requested parent, which is the child itself or one of its descendants.
        parent: EntityId,
    },
}

impl fmt::Display for HierarchyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HierarchyError::UnknownEntity(id) => {
                write!(f, "Entity {id} is not registered")
            }
            HierarchyError::RootHasNoParent => {
                write!(f, "The root entity cannot be re-parented")
            }
            HierarchyError::CycleDetected { child, parent } => {
                write!(
                    f,
                    "Making {parent} the parent of {child} would create a cycle"
                )
            }
        }
    }
}

impl std::error::Error for HierarchyError {}

/// An error raised when component storage cannot complete an operation
/// without waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// A component is write-locked through a [`ComponentRef`](crate::ecs::ComponentRef),
    /// so its current value cannot be read for a copy.
    ComponentLocked {
        /// The Rust type name of the locked component.
        component: &'static str,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ComponentLocked { component } => {
                write!(f, "Component '{component}' is locked for writing and cannot be copied")
            }
        }
    }
}

impl std::error::Error for StorageError {}

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

//! Defines the identity type of entities in the ECS architecture.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An opaque, unique identifier for an entity.
///
/// Freshly created ids wrap a random (version 4) UUID, so two ids produced by
/// [`EntityId::new`] are distinct with overwhelming probability. The nil UUID is
/// reserved for the [root](EntityId::root) sentinel and is never produced by
/// the generator.
///
/// Ordering, equality and hashing all operate on the underlying token, which
/// makes `EntityId` usable as a key in both hashed and ordered collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(Uuid);

/// A set of entity ids, used for the child list of an entity.
pub type EntityIdSet = HashSet<EntityId>;

impl EntityId {
    /// Creates a new, random `EntityId`.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the reserved root id.
    ///
    /// Every call returns the same value. Entities without an explicit parent
    /// point at this id.
    pub const fn root() -> Self {
        Self(Uuid::nil())
    }

    /// Returns `true` if this is the root sentinel.
    pub fn is_root(&self) -> bool {
        self.0.is_nil()
    }

    /// Returns the underlying unique token, for serialization and debugging.
    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for EntityId {
    /// Creates a new, random `EntityId`.
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EntityId {
    fn from(token: Uuid) -> Self {
        Self(token)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Returned when a string is not a valid textual `EntityId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityIdParseError {
    /// The rejected input.
    pub input: String,
    /// Why the token could not be parsed.
    pub reason: String,
}

impl fmt::Display for EntityIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid entity id '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for EntityIdParseError {}

impl FromStr for EntityId {
    type Err = EntityIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| EntityIdParseError {
                input: s.to_owned(),
                reason: e.to_string(),
            })
    }
}

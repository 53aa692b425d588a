// Copyright 2025 John Brosnihan
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
//! Entity handles
//!
//! Entities are plain handles. Whether a handle refers to a live game object
//! is a property of database membership, never of the value itself.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Numeric identifier of an entity slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u32);

impl EntityId {
    /// Reserved identifier meaning "no entity"
    pub const INVALID: EntityId = EntityId(u32::MAX);

    /// Create a new EntityId from a raw u32 value
    pub const fn new(id: u32) -> Self {
        EntityId(id)
    }

    /// Get the raw u32 value
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Check whether this is not the reserved invalid identifier
    pub const fn is_valid(&self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Entity handle with a generation for detecting stale copies
///
/// Identifiers are recycled lowest-first, so the same id can name several
/// game objects over a program's lifetime. The generation tells those
/// incarnations apart: a handle kept across a `destroy_entity` call never
/// compares equal to the entity that later reuses its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    id: EntityId,
    generation: u32,
}

impl Entity {
    /// The invalid entity, returned when the identifier space is exhausted
    /// and written over handles passed to `destroy_entity`
    pub const INVALID: Entity = Entity {
        id: EntityId::INVALID,
        generation: 0,
    };

    /// Create a new entity with the given ID and generation
    ///
    /// No validation happens here.
    pub const fn new(id: u32, generation: u32) -> Self {
        Entity {
            id: EntityId::new(id),
            generation,
        }
    }

    /// Get the entity ID
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Get the generation number
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Check whether the handle carries a usable id
    pub const fn is_valid(&self) -> bool {
        self.id.is_valid()
    }
}

impl Default for Entity {
    fn default() -> Self {
        Entity::INVALID
    }
}

// Only the id is hashed. Equal handles share an id, so this stays
// consistent with `Eq` while keeping the hash a function of the id alone.
impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.0.hash(state);
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}, gen: {})", self.id.0, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_entity_creation() {
        let entity = Entity::new(42, 1);
        assert_eq!(entity.id().raw(), 42);
        assert_eq!(entity.generation(), 1);
        assert!(entity.is_valid());
    }

    #[test]
    fn test_entity_equality() {
        let e1 = Entity::new(1, 0);
        let e2 = Entity::new(1, 0);
        let e3 = Entity::new(1, 1);
        assert_eq!(e1, e2);
        assert_ne!(e1, e3);
    }

    #[test]
    fn test_hash_depends_on_id_only() {
        assert_eq!(hash_of(&Entity::new(7, 0)), hash_of(&Entity::new(7, 3)));
        assert_eq!(hash_of(&Entity::new(7, 0)), hash_of(&7u32));
    }

    #[test]
    fn test_invalid_sentinel() {
        assert!(!Entity::INVALID.is_valid());
        assert_eq!(Entity::INVALID.id().raw(), u32::MAX);
        assert_eq!(Entity::default(), Entity::INVALID);
        assert!(EntityId::new(u32::MAX - 1).is_valid());
    }

    #[test]
    fn test_display() {
        assert_eq!(Entity::new(3, 2).to_string(), "Entity(3, gen: 2)");
        assert_eq!(EntityId::new(9).to_string(), "Entity(9)");
    }
}

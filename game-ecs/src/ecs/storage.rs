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
//! Concrete component containers
//!
//! Two containers cover most needs:
//!
//! - [`EntitySet`] stores membership only, for tag components
//! - [`DenseStorage`] stores one payload per entity in packed arrays
//!
//! Both grow with fallible reservation before touching any state, so an
//! insertion either fully succeeds or leaves the container untouched.

use crate::ecs::{AddError, Component, ComponentData, Entity, InsertComponent, RemoveError};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::marker::PhantomData;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Membership-only component container
///
/// The marker type `M` only serves to tell tag components apart, since the
/// database holds at most one container per concrete type.
///
/// A tag set has no per-entity update hook. Tags that need behavior are
/// stored as a zero-sized [`ComponentData`] in a [`DenseStorage`] instead,
/// which costs no payload memory and runs [`ComponentData::update`] for
/// every member:
///
/// ```
/// use game_ecs::ecs::{Component, ComponentData, DenseStorage, Entity};
///
/// struct Burning;
/// impl ComponentData for Burning {
///     fn update(&mut self, entity: Entity) {
///         println!("{entity} is on fire");
///     }
/// }
///
/// let mut burning = DenseStorage::<Burning>::new();
/// burning.insert(Entity::new(3, 0), Burning).unwrap();
/// burning.update();
/// assert_eq!(burning.len(), 1);
/// ```
///
/// Plain membership:
///
/// ```
/// use game_ecs::ecs::{Component, Entity, EntitySet};
///
/// struct Selected;
///
/// let mut selected = EntitySet::<Selected>::new();
/// selected.insert(Entity::new(0, 0)).unwrap();
/// assert_eq!(selected.len(), 1);
/// ```
pub struct EntitySet<M: 'static = ()> {
    entities: HashSet<Entity>,
    marker: PhantomData<fn() -> M>,
}

impl<M: 'static> EntitySet<M> {
    /// Create a new empty set
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new set with room for `capacity` entities
    pub fn with_capacity(capacity: usize) -> Self {
        EntitySet {
            entities: HashSet::with_capacity(capacity),
            marker: PhantomData,
        }
    }

    /// Add the entity to the set
    pub fn insert(&mut self, entity: Entity) -> Result<(), AddError> {
        if !entity.is_valid() {
            return Err(AddError::InvalidArguments);
        }
        if self.entities.contains(&entity) {
            return Err(AddError::EntityExists);
        }
        self.entities
            .try_reserve(1)
            .map_err(|_| AddError::OutOfMemory)?;
        self.entities.insert(entity);
        Ok(())
    }

    /// Invoke `f` once per member
    pub fn iterate<F: FnMut(Entity)>(&self, mut f: F) {
        for &entity in &self.entities {
            f(entity);
        }
    }

    /// Invoke `f` with the entity if it is a member
    ///
    /// Returns whether the callback ran.
    pub fn view<F: FnOnce(Entity)>(&self, entity: Entity, f: F) -> bool {
        match self.entities.get(&entity) {
            Some(&member) => {
                f(member);
                true
            }
            None => false,
        }
    }

    /// Iterate over member entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    /// Invoke `f` once per member across the rayon thread pool
    #[cfg(feature = "parallel")]
    pub fn par_iterate<F>(&self, f: F)
    where
        F: Fn(Entity) + Send + Sync,
    {
        self.entities.par_iter().for_each(|&entity| f(entity));
    }
}

impl<M: 'static> Default for EntitySet<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: 'static> fmt::Debug for EntitySet<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySet")
            .field("marker", &std::any::type_name::<M>())
            .field("entities", &self.entities)
            .finish()
    }
}

impl<M: 'static> InsertComponent for EntitySet<M> {
    type Args = ();

    fn insert_component(&mut self, entity: Entity, _args: ()) -> Result<(), AddError> {
        self.insert(entity)
    }
}

impl<M: 'static> Component for EntitySet<M> {
    fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    fn erase(&mut self, entity: Entity) -> Result<(), RemoveError> {
        if self.entities.remove(&entity) {
            Ok(())
        } else {
            Err(RemoveError::EntityMissing)
        }
    }

    fn len(&self) -> usize {
        self.entities.len()
    }

    fn clear(&mut self) {
        self.entities.clear();
    }

    fn for_each_entity(&self, f: &mut dyn FnMut(Entity)) {
        self.iterate(f);
    }
}

/// Densely packed component container with one payload per entity
///
/// Payloads live in a contiguous array so whole-container passes stay
/// cache friendly. A sparse map from entity to array index backs the
/// point queries, and removal swaps the last element into the hole.
///
/// # Example
///
/// ```
/// use game_ecs::ecs::{Component, ComponentData, DenseStorage, Entity};
///
/// struct Health(u32);
/// impl ComponentData for Health {}
///
/// let mut storage = DenseStorage::<Health>::new();
/// let entity = Entity::new(1, 0);
///
/// storage.insert(entity, Health(100)).unwrap();
/// assert!(storage.contains(entity));
/// assert_eq!(storage.get(entity).map(|h| h.0), Some(100));
/// ```
#[derive(Debug)]
pub struct DenseStorage<D: ComponentData> {
    /// Mapping from Entity to dense array index
    entity_to_index: HashMap<Entity, usize>,
    /// Mapping from dense array index back to Entity (for swap_remove)
    index_to_entity: Vec<Entity>,
    components: Vec<D>,
}

impl<D: ComponentData> DenseStorage<D> {
    /// Create a new empty storage
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new storage with room for `capacity` entities
    pub fn with_capacity(capacity: usize) -> Self {
        DenseStorage {
            entity_to_index: HashMap::with_capacity(capacity),
            index_to_entity: Vec::with_capacity(capacity),
            components: Vec::with_capacity(capacity),
        }
    }

    /// Reserve space for at least `additional` more entities
    pub fn reserve(&mut self, additional: usize) -> Result<(), AddError> {
        self.entity_to_index
            .try_reserve(additional)
            .map_err(|_| AddError::OutOfMemory)?;
        self.index_to_entity
            .try_reserve(additional)
            .map_err(|_| AddError::OutOfMemory)?;
        self.components
            .try_reserve(additional)
            .map_err(|_| AddError::OutOfMemory)
    }

    /// Attach `component` to the entity
    pub fn insert(&mut self, entity: Entity, component: D) -> Result<(), AddError> {
        self.insert_with(entity, || component)
    }

    /// Attach a payload built by `make` to the entity
    ///
    /// `make` only runs once the entity has been accepted and space has
    /// been reserved.
    pub fn insert_with<F: FnOnce() -> D>(&mut self, entity: Entity, make: F) -> Result<(), AddError> {
        if !entity.is_valid() {
            return Err(AddError::InvalidArguments);
        }
        if self.entity_to_index.contains_key(&entity) {
            return Err(AddError::EntityExists);
        }
        self.reserve(1)?;

        let index = self.components.len();
        self.components.push(make());
        self.index_to_entity.push(entity);
        self.entity_to_index.insert(entity, index);

        debug_assert_eq!(self.entity_to_index.len(), self.index_to_entity.len());
        debug_assert_eq!(self.entity_to_index.len(), self.components.len());
        Ok(())
    }

    /// Detach the entity and hand back its payload
    pub fn remove(&mut self, entity: Entity) -> Option<D> {
        let index = self.entity_to_index.remove(&entity)?;
        let component = self.components.swap_remove(index);
        self.index_to_entity.swap_remove(index);

        // The former last element now lives at `index`
        if let Some(&moved) = self.index_to_entity.get(index) {
            self.entity_to_index.insert(moved, index);
        }

        debug_assert_eq!(self.entity_to_index.len(), self.index_to_entity.len());
        debug_assert_eq!(self.entity_to_index.len(), self.components.len());
        Some(component)
    }

    /// Get a reference to the entity's payload
    pub fn get(&self, entity: Entity) -> Option<&D> {
        let index = self.entity_to_index.get(&entity)?;
        self.components.get(*index)
    }

    /// Get a mutable reference to the entity's payload
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut D> {
        let index = self.entity_to_index.get(&entity)?;
        self.components.get_mut(*index)
    }

    /// Invoke `f` with the entity's payload if present
    ///
    /// Returns whether the callback ran.
    pub fn view<F: FnOnce(&D)>(&self, entity: Entity, f: F) -> bool {
        self.get(entity).map(f).is_some()
    }

    /// Invoke `f` with the entity's payload, mutably, if present
    ///
    /// Returns whether the callback ran.
    pub fn modify<F: FnOnce(&mut D)>(&mut self, entity: Entity, f: F) -> bool {
        self.get_mut(entity).map(f).is_some()
    }

    /// Invoke `f` once per member with its payload
    pub fn iterate<F: FnMut(Entity, &D)>(&self, mut f: F) {
        for (&entity, component) in self.index_to_entity.iter().zip(&self.components) {
            f(entity, component);
        }
    }

    /// Invoke `f` once per member with its payload, mutably
    pub fn iterate_mut<F: FnMut(Entity, &mut D)>(&mut self, mut f: F) {
        for (&entity, component) in self.index_to_entity.iter().zip(&mut self.components) {
            f(entity, component);
        }
    }

    /// Invoke `f` once per member across the rayon thread pool
    #[cfg(feature = "parallel")]
    pub fn par_iterate<F>(&self, f: F)
    where
        F: Fn(Entity, &D) + Send + Sync,
    {
        self.index_to_entity
            .par_iter()
            .zip(self.components.par_iter())
            .for_each(|(&entity, component)| f(entity, component));
    }

    /// Get all entities that have components in this storage
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.index_to_entity.iter().copied()
    }

    /// Get a reference to the dense payload array
    pub fn components(&self) -> &[D] {
        &self.components
    }

    /// Get a mutable reference to the dense payload array
    pub fn components_mut(&mut self) -> &mut [D] {
        &mut self.components
    }
}

impl<D: ComponentData> Default for DenseStorage<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ComponentData> InsertComponent for DenseStorage<D> {
    type Args = D;

    fn insert_component(&mut self, entity: Entity, component: D) -> Result<(), AddError> {
        self.insert(entity, component)
    }
}

impl<D: ComponentData> Component for DenseStorage<D> {
    fn contains(&self, entity: Entity) -> bool {
        self.entity_to_index.contains_key(&entity)
    }

    fn erase(&mut self, entity: Entity) -> Result<(), RemoveError> {
        self.remove(entity)
            .map(drop)
            .ok_or(RemoveError::EntityMissing)
    }

    fn len(&self) -> usize {
        self.components.len()
    }

    fn clear(&mut self) {
        self.entity_to_index.clear();
        self.index_to_entity.clear();
        self.components.clear();
    }

    fn update(&mut self) {
        for (&entity, component) in self.index_to_entity.iter().zip(&mut self.components) {
            component.update(entity);
        }
    }

    fn for_each_entity(&self, f: &mut dyn FnMut(Entity)) {
        for &entity in &self.index_to_entity {
            f(entity);
        }
    }
}

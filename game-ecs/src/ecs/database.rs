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
//! Entity-component database
//!
//! The database is the central container for all ECS data. It owns one
//! container per registered component type, the set of live entity ids,
//! and the watermark that drives lowest-id-first allocation.

use crate::config::DatabaseConfig;
use crate::ecs::{
    AddError, Component, ComponentError, ComponentKey, Entity, EntityError, EntityId,
    InsertComponent, RegistrationError, RemoveError,
};
use std::any::type_name;
use std::collections::HashSet;
use std::fmt;

/// The main ECS database
///
/// Containers are stored type-erased in a table indexed by
/// [`ComponentKey`] and come back out through a checked downcast, so
/// typed access never trusts an unchecked cast.
///
/// # Entity ids
///
/// `create_entity` always hands out the lowest id that is not currently
/// live. Destroying an entity bumps the generation of its id slot, so a
/// handle copied before destruction stops matching anything once the id
/// is reused.
///
/// # Example
///
/// ```
/// use game_ecs::ecs::{ComponentData, DenseStorage, EcsDatabase};
///
/// struct Health(u32);
/// impl ComponentData for Health {}
///
/// let mut db = EcsDatabase::new();
/// db.construct_component::<DenseStorage<Health>>().unwrap();
///
/// let mut entity = db.create_entity();
/// if let Some(health) = db.component_mut::<DenseStorage<Health>>() {
///     health.insert(entity, Health(100)).unwrap();
/// }
/// assert_eq!(db.num_components(entity), 1);
///
/// db.destroy_entity(&mut entity);
/// assert_eq!(db.size::<DenseStorage<Health>>(), 0);
/// ```
pub struct EcsDatabase {
    components: Vec<Option<Box<dyn Component>>>,
    alive_entities: HashSet<EntityId>,
    entity_generations: Vec<u32>,
    next_free_id: u32,
    max_entities: u32,
}

impl EcsDatabase {
    /// Create a new empty database
    pub fn new() -> Self {
        Self::with_config(DatabaseConfig::default())
    }

    /// Create a new empty database with the given configuration
    pub fn with_config(config: DatabaseConfig) -> Self {
        EcsDatabase {
            components: Vec::with_capacity(config.component_capacity),
            alive_entities: HashSet::with_capacity(config.entity_capacity),
            entity_generations: Vec::with_capacity(config.entity_capacity),
            next_free_id: 0,
            max_entities: config.max_entities,
        }
    }

    // ---------------------------------------------------------------------
    // Component registration
    // ---------------------------------------------------------------------

    /// Register a default-constructed container of type `T`
    pub fn construct_component<T: Component + Default>(&mut self) -> Result<(), RegistrationError> {
        self.construct_component_with(T::default)
    }

    /// Register the container built by `make`
    ///
    /// `make` only runs once the slot for `T` is known to be free and the
    /// table has room for it. Registering a type twice without destroying it
    /// first is an error; the existing container is left in place.
    pub fn construct_component_with<T, F>(&mut self, make: F) -> Result<(), RegistrationError>
    where
        T: Component,
        F: FnOnce() -> T,
    {
        let name = type_name::<T>();
        let key = ComponentKey::of::<T>().index();

        if matches!(self.components.get(key), Some(Some(_))) {
            tracing::warn!(component = name, "component already registered");
            return Err(RegistrationError::AlreadyRegistered(name));
        }

        if key >= self.components.len() {
            let additional = key + 1 - self.components.len();
            self.components
                .try_reserve(additional)
                .map_err(|_| RegistrationError::OutOfMemory(name))?;
            self.components.resize_with(key + 1, || None);
        }

        self.components[key] = Some(Box::new(make()));
        tracing::debug!(component = name, key, "constructed component");
        Ok(())
    }

    /// Drop the container of type `T`
    ///
    /// Returns whether a container was registered. The table only shrinks
    /// when the last occupied slot is released.
    pub fn destroy_component<T: Component>(&mut self) -> bool {
        let Some(key) = ComponentKey::get::<T>().map(|k| k.index()) else {
            return false;
        };
        let removed = self
            .components
            .get_mut(key)
            .map_or(false, |slot| slot.take().is_some());

        if removed && key + 1 == self.components.len() {
            while matches!(self.components.last(), Some(None)) {
                self.components.pop();
            }
        }
        if removed {
            tracing::debug!(component = type_name::<T>(), key, "destroyed component");
        }
        removed
    }

    /// Get the container of type `T`, if registered
    pub fn component<T: Component>(&self) -> Option<&T> {
        let key = ComponentKey::get::<T>()?.index();
        self.components.get(key)?.as_deref()?.downcast_ref::<T>()
    }

    /// Get the container of type `T` mutably, if registered
    pub fn component_mut<T: Component>(&mut self) -> Option<&mut T> {
        let key = ComponentKey::get::<T>()?.index();
        self.components.get_mut(key)?.as_deref_mut()?.downcast_mut::<T>()
    }

    /// Get the container of type `T`, or an error naming the missing type
    pub fn try_component<T: Component>(&self) -> Result<&T, ComponentError> {
        self.component::<T>()
            .ok_or(ComponentError::NotRegistered(type_name::<T>()))
    }

    /// Get the container of type `T` mutably, or an error naming the missing type
    pub fn try_component_mut<T: Component>(&mut self) -> Result<&mut T, ComponentError> {
        self.component_mut::<T>()
            .ok_or(ComponentError::NotRegistered(type_name::<T>()))
    }

    /// Check whether a container of type `T` is registered
    pub fn contains_component<T: Component>(&self) -> bool {
        self.component::<T>().is_some()
    }

    /// Number of registered containers
    pub fn component_count(&self) -> usize {
        self.registered().count()
    }

    fn registered(&self) -> impl Iterator<Item = &dyn Component> + '_ {
        self.components.iter().filter_map(|slot| slot.as_deref())
    }

    // ---------------------------------------------------------------------
    // Entity lifecycle
    // ---------------------------------------------------------------------

    /// Create a new entity with the lowest id not currently live
    ///
    /// Returns [`Entity::INVALID`] when every id below the configured limit
    /// is live, or when the bookkeeping cannot grow.
    ///
    /// Finding the next watermark scans forward over live ids, so after a
    /// low id is reused the following call costs O(live entities above it).
    /// Workloads that churn a single low slot pay that scan on every create.
    pub fn create_entity(&mut self) -> Entity {
        let id = self.next_free_id;
        if id >= self.max_entities || id == EntityId::INVALID.raw() {
            tracing::warn!(live = self.alive_entities.len(), "entity id space exhausted");
            return Entity::INVALID;
        }

        let slot = id as usize;
        let needs_slot = slot >= self.entity_generations.len();
        let reserved = self.alive_entities.try_reserve(1).is_ok()
            && (!needs_slot || self.entity_generations.try_reserve(1).is_ok());
        if !reserved {
            tracing::warn!(id, "out of memory while creating entity");
            return Entity::INVALID;
        }

        // Every id below the watermark is live, so a new slot is always
        // the next one in line.
        if needs_slot {
            self.entity_generations.push(0);
        }
        let generation = self.entity_generations[slot];
        self.alive_entities.insert(EntityId::new(id));
        self.next_free_id = self.next_unused_id(id + 1);

        let entity = Entity::new(id, generation);
        tracing::trace!(%entity, "created entity");
        entity
    }

    fn next_unused_id(&self, mut candidate: u32) -> u32 {
        while candidate < self.max_entities
            && self.alive_entities.contains(&EntityId::new(candidate))
        {
            candidate += 1;
        }
        candidate
    }

    /// Destroy an entity and detach it from every registered container
    ///
    /// On success the caller's handle is overwritten with
    /// [`Entity::INVALID`]. Other copies of the handle stay bit-equal to the
    /// old value but no longer match the id once it is reused.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not live. Destroying an entity twice, or
    /// through a stale handle, is a bug in the caller; see
    /// [`EcsDatabase::try_destroy_entity`] for a non-panicking form.
    pub fn destroy_entity(&mut self, entity: &mut Entity) {
        if let Err(err) = self.try_destroy_entity(entity) {
            panic!("destroy_entity: {err}");
        }
    }

    /// Destroy an entity, reporting rather than panicking on a bad handle
    pub fn try_destroy_entity(&mut self, entity: &mut Entity) -> Result<(), EntityError> {
        let handle = *entity;
        if !handle.is_valid() {
            return Err(EntityError::Invalid);
        }
        if !self.is_alive(handle) {
            return Err(EntityError::NotAlive(handle));
        }

        for component in self.components.iter_mut().filter_map(|slot| slot.as_deref_mut()) {
            match component.erase(handle) {
                Ok(()) | Err(RemoveError::EntityMissing) => {}
                Err(err) => tracing::warn!(
                    entity = %handle,
                    component = component.name(),
                    %err,
                    "erase failed during destroy"
                ),
            }
        }

        let id = handle.id();
        self.alive_entities.remove(&id);
        if let Some(generation) = self.entity_generations.get_mut(id.raw() as usize) {
            *generation = generation.wrapping_add(1);
        }
        if id.raw() < self.next_free_id {
            self.next_free_id = id.raw();
        }

        tracing::trace!(entity = %handle, "destroyed entity");
        *entity = Entity::INVALID;
        Ok(())
    }

    /// Check if an entity is alive
    ///
    /// Stale handles whose id has been reused report `false`.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive_entities.contains(&entity.id())
            && self.generation_of(entity.id()) == entity.generation()
    }

    fn generation_of(&self, id: EntityId) -> u32 {
        self.entity_generations
            .get(id.raw() as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Get the number of alive entities
    pub fn entity_count(&self) -> usize {
        self.alive_entities.len()
    }

    /// Get an iterator over all alive entities, in unspecified order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive_entities
            .iter()
            .map(|&id| Entity::new(id.raw(), self.generation_of(id)))
    }

    // ---------------------------------------------------------------------
    // Composition queries
    // ---------------------------------------------------------------------

    /// Check whether the entity is in the container of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.component::<T>().map_or(false, |c| c.contains(entity))
    }

    /// Check whether any registered container holds the entity
    pub fn has_components(&self, entity: Entity) -> bool {
        self.registered().any(|c| c.contains(entity))
    }

    /// Count the registered containers that hold the entity
    pub fn num_components(&self, entity: Entity) -> usize {
        self.registered().filter(|c| c.contains(entity)).count()
    }

    // ---------------------------------------------------------------------
    // Routed container operations
    // ---------------------------------------------------------------------

    /// Attach a live entity to the container of type `T`
    ///
    /// This is the checked insertion path: unlike inserting through
    /// [`EcsDatabase::component_mut`], it refuses handles that are invalid,
    /// destroyed or stale with [`AddError::InvalidArguments`]. Reports
    /// [`AddError::Other`] when `T` is not registered.
    pub fn add<T: InsertComponent>(&mut self, entity: Entity, args: T::Args) -> Result<(), AddError> {
        self.add_with::<T, _>(entity, |container, entity| {
            container.insert_component(entity, args)
        })
    }

    /// Attach a live entity to the container of type `T` through `insert`
    ///
    /// For containers that take more than one way in, such as
    /// [`DenseStorage::insert_with`](crate::ecs::DenseStorage::insert_with).
    /// The liveness and registration checks match [`EcsDatabase::add`], and
    /// `insert` only runs once both pass.
    pub fn add_with<T, F>(&mut self, entity: Entity, insert: F) -> Result<(), AddError>
    where
        T: Component,
        F: FnOnce(&mut T, Entity) -> Result<(), AddError>,
    {
        if !self.is_alive(entity) {
            tracing::debug!(%entity, component = type_name::<T>(), "rejected add for dead entity");
            return Err(AddError::InvalidArguments);
        }
        let container = self.component_mut::<T>().ok_or(AddError::Other)?;
        insert(container, entity)
    }

    /// Detach the entity from the container of type `T`
    ///
    /// Reports [`RemoveError::Other`] when `T` is not registered.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Result<(), RemoveError> {
        self.component_mut::<T>()
            .ok_or(RemoveError::Other)?
            .erase(entity)
    }

    /// Number of entities in the container of type `T`, or 0 if unregistered
    pub fn size<T: Component>(&self) -> usize {
        self.component::<T>().map_or(0, |c| c.len())
    }

    /// Invoke `f` once per entity in the container of type `T`
    ///
    /// The container is passed along so the callback can read its data.
    pub fn iterate<T, F>(&self, mut f: F)
    where
        T: Component,
        F: FnMut(&T, Entity),
    {
        if let Some(container) = self.component::<T>() {
            container.for_each_entity(&mut |entity| f(container, entity));
        }
    }

    /// Run the update pass of the container of type `T`
    pub fn update<T: Component>(&mut self) {
        if let Some(container) = self.component_mut::<T>() {
            container.update();
        }
    }

    /// Run the update pass of every registered container, in key order
    pub fn update_all(&mut self) {
        for component in self.components.iter_mut().filter_map(|slot| slot.as_deref_mut()) {
            component.update();
        }
    }

    /// Empty the container of type `T`
    pub fn clear_component<T: Component>(&mut self) {
        if let Some(container) = self.component_mut::<T>() {
            container.clear();
        }
    }

    /// Empty every registered container, keeping entities alive
    pub fn clear_components(&mut self) {
        for component in self.components.iter_mut().filter_map(|slot| slot.as_deref_mut()) {
            component.clear();
        }
    }

    /// Destroy all entities and empty every container
    ///
    /// Containers stay registered. Every live slot moves to a new
    /// generation, so handles from before the call never match the
    /// entities created after it.
    pub fn clear(&mut self) {
        self.clear_components();
        for id in self.alive_entities.drain() {
            if let Some(generation) = self.entity_generations.get_mut(id.raw() as usize) {
                *generation = generation.wrapping_add(1);
            }
        }
        self.next_free_id = 0;
    }
}

impl Default for EcsDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EcsDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.registered().map(|c| c.name()).collect();
        f.debug_struct("EcsDatabase")
            .field("entities", &self.alive_entities.len())
            .field("next_free_id", &self.next_free_id)
            .field("components", &names)
            .finish()
    }
}

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
//! Component container interface
//!
//! A component container tracks which entities currently "have" one
//! component type, plus any per-entity data for it. The database stores
//! containers type-erased behind [`Component`] and hands them back to
//! callers through a checked downcast.

use crate::ecs::{AddError, Entity, RemoveError};
use std::any::Any;

/// Object-safe access to `Any` for component containers
///
/// Implemented for every `'static` type, so containers never write it by hand.
pub trait AsAny: Any {
    /// Borrow as `&dyn Any`
    fn as_any(&self) -> &dyn Any;

    /// Borrow as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Capability interface every component container implements
///
/// The database only ever talks to containers through this trait when it
/// needs to touch all of them at once (entity destruction, composition
/// counts, the update pass). Typed operations such as insertion go through
/// the concrete container returned by `EcsDatabase::component_mut`.
///
/// Callers must not change a container's membership from inside one of its
/// iteration callbacks. The borrow checker enforces this for the containers
/// in this crate, since callbacks never receive the container mutably.
pub trait Component: AsAny + Send + Sync {
    /// Check whether the entity is a member
    fn contains(&self, entity: Entity) -> bool;

    /// Remove the entity and drop any data associated with it
    fn erase(&mut self, entity: Entity) -> Result<(), RemoveError>;

    /// Number of member entities
    fn len(&self) -> usize;

    /// Check whether the container has no members
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every member
    fn clear(&mut self);

    /// Run this component's per-entity behavior once for every member
    ///
    /// Containers without behavior keep the default no-op.
    fn update(&mut self) {}

    /// Visit every member entity in unspecified order
    fn for_each_entity(&self, f: &mut dyn FnMut(Entity));

    /// Name used in logs and error messages
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl dyn Component {
    /// Downcast to the concrete container type
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably downcast to the concrete container type
    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Per-entity payload stored in a [`DenseStorage`](crate::ecs::DenseStorage)
///
/// Overriding [`ComponentData::update`] attaches behavior to the component
/// type itself, so no separate system object is needed to drive it.
pub trait ComponentData: Send + Sync + 'static {
    /// Called once per entity by the container's update pass
    fn update(&mut self, _entity: Entity) {}
}

/// Container that accepts new members through a uniform entry point
///
/// [`EcsDatabase::add`](crate::ecs::EcsDatabase::add) uses this to route an
/// insertion to the container of a given type. `Args` is whatever the
/// container needs besides the entity: nothing for a tag set, the payload
/// for a dense storage.
pub trait InsertComponent: Component {
    /// Extra data stored alongside the entity
    type Args;

    /// Attach the entity, with `args`, to this container
    fn insert_component(&mut self, entity: Entity, args: Self::Args) -> Result<(), AddError>;
}

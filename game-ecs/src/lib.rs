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
//! # Game ECS
//!
//! An entity-component database for per-frame game loops.
//!
//! ## Features
//!
//! - **Opaque entities**: handles with lowest-id-first recycling and
//!   generations that keep stale copies from aliasing new entities
//! - **Type-erased containers**: one container per component type, reached
//!   through a checked downcast
//! - **Fan-out destruction**: destroying an entity detaches it from every
//!   registered container
//! - **Behavior on components**: per-entity update hooks run by the
//!   container's update pass
//! - **Parallelization**: optional Rayon-backed read-only iteration
//!
//! ## Example
//!
//! ```rust
//! use game_ecs::ecs::{EcsDatabase, EntitySet};
//!
//! struct Visible;
//!
//! let mut db = EcsDatabase::new();
//! db.construct_component::<EntitySet<Visible>>().unwrap();
//!
//! let entity = db.create_entity();
//! db.component_mut::<EntitySet<Visible>>()
//!     .unwrap()
//!     .insert(entity)
//!     .unwrap();
//!
//! assert!(db.has_component::<EntitySet<Visible>>(entity));
//! assert_eq!(db.size::<EntitySet<Visible>>(), 1);
//! ```

#![warn(missing_docs)]

/// Entity Component System implementation
pub mod ecs;

/// Database configuration
pub mod config;

pub use config::{ConfigError, DatabaseConfig};
pub use ecs::{EcsDatabase, Entity};

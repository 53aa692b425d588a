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
//! Status values returned by container and database operations
//!
//! Every failure here is local and recoverable. Callers branch on the
//! returned error and decide whether to retry, log or ignore it.

use crate::ecs::Entity;
use thiserror::Error;

/// Reasons an entity could not be added to a component container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddError {
    /// The container could not grow
    #[error("out of memory while adding entity")]
    OutOfMemory,
    /// The entity is already a member of the container
    #[error("entity is already present in the component")]
    EntityExists,
    /// The entity handle or construction arguments were rejected
    #[error("invalid arguments for component insertion")]
    InvalidArguments,
    /// Any other container-specific failure
    #[error("component insertion failed")]
    Other,
}

/// Reasons an entity could not be removed from a component container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RemoveError {
    /// Reserved for containers that rebalance on removal
    #[error("out of memory while removing entity")]
    OutOfMemory,
    /// The entity is not a member of the container
    #[error("entity is missing from the component")]
    EntityMissing,
    /// Any other container-specific failure
    #[error("component removal failed")]
    Other,
}

/// Reasons a component container could not be constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A container of this type already lives in the database
    #[error("component `{0}` is already registered")]
    AlreadyRegistered(&'static str),
    /// The type-indexed table could not grow
    #[error("out of memory while registering component `{0}`")]
    OutOfMemory(&'static str),
}

/// Reasons an entity handle was rejected by the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntityError {
    /// The handle is the invalid sentinel
    #[error("entity handle is invalid")]
    Invalid,
    /// The handle was never allocated, was already destroyed, or is stale
    #[error("{0} is not alive")]
    NotAlive(Entity),
}

/// Reasons a component container could not be accessed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// `construct_component` was never called for this type
    #[error("component `{0}` is not registered")]
    NotRegistered(&'static str),
}

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
//! Database configuration
//!
//! Capacity hints and the identifier-space limit for an
//! [`EcsDatabase`](crate::ecs::EcsDatabase).
//!
//! # Environment Configuration
//!
//! [`DatabaseConfig::from_env`] starts from the defaults and applies any of
//! these variables that are set:
//! ```bash
//! export GAME_ECS_ENTITY_CAPACITY=4096
//! export GAME_ECS_COMPONENT_CAPACITY=32
//! export GAME_ECS_MAX_ENTITIES=100000
//! ```

use thiserror::Error;

/// Variable holding the initial live-entity capacity
pub const ENV_ENTITY_CAPACITY: &str = "GAME_ECS_ENTITY_CAPACITY";
/// Variable holding the initial container-table capacity
pub const ENV_COMPONENT_CAPACITY: &str = "GAME_ECS_COMPONENT_CAPACITY";
/// Variable holding the identifier-space limit
pub const ENV_MAX_ENTITIES: &str = "GAME_ECS_MAX_ENTITIES";

/// Errors raised while building a configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable was set but did not parse as an unsigned integer
    #[error("invalid value `{value}` for {key}")]
    InvalidValue {
        /// The variable name
        key: &'static str,
        /// The rejected text
        value: String,
    },
    /// The identifier space would be empty
    #[error("max_entities must be at least 1")]
    ZeroMaxEntities,
}

/// Configuration for an entity-component database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Live entities to make room for up front
    pub entity_capacity: usize,
    /// Container slots to make room for up front
    pub component_capacity: usize,
    /// Ids handed out are always below this bound; at most `u32::MAX`,
    /// since `u32::MAX` itself is the invalid sentinel
    pub max_entities: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            entity_capacity: 0,
            component_capacity: 0,
            max_entities: u32::MAX,
        }
    }
}

impl DatabaseConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial live-entity capacity
    pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
        self.entity_capacity = capacity;
        self
    }

    /// Set the initial container-table capacity
    pub fn with_component_capacity(mut self, capacity: usize) -> Self {
        self.component_capacity = capacity;
        self
    }

    /// Bound the identifier space to `0..max_entities`
    pub fn with_max_entities(mut self, max_entities: u32) -> Self {
        self.max_entities = max_entities;
        self
    }

    /// Check the configuration for values the database cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entities == 0 {
            return Err(ConfigError::ZeroMaxEntities);
        }
        Ok(())
    }

    /// Build a configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    ///
    /// Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = parse_var::<usize, _>(&lookup, ENV_ENTITY_CAPACITY)? {
            config.entity_capacity = value;
        }
        if let Some(value) = parse_var::<usize, _>(&lookup, ENV_COMPONENT_CAPACITY)? {
            config.component_capacity = value;
        }
        if let Some(value) = parse_var::<u32, _>(&lookup, ENV_MAX_ENTITIES)? {
            config.max_entities = value;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

//! Entity Component System (ECS) core implementation
//!
//! This module provides the foundational ECS pieces:
//! - Entity handles with generations
//! - Type-erased component containers and two ready-made ones
//! - Process-wide component type keys
//! - The database that owns containers and entity lifecycles

mod component;
mod database;
mod entity;
mod error;
mod registry;
mod storage;

pub use component::{AsAny, Component, ComponentData, InsertComponent};
pub use database::EcsDatabase;
pub use entity::{Entity, EntityId};
pub use error::{AddError, ComponentError, EntityError, RegistrationError, RemoveError};
pub use registry::{registered_component_keys, ComponentKey};
pub use storage::{DenseStorage, EntitySet};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_creation() {
        let db = EcsDatabase::new();
        assert_eq!(db.entity_count(), 0);
        assert_eq!(db.component_count(), 0);
    }

    #[test]
    fn test_entity_creation() {
        let mut db = EcsDatabase::new();
        let entity = db.create_entity();
        assert_eq!(db.entity_count(), 1);
        assert!(db.is_alive(entity));
        assert!(!db.has_components(entity));
    }
}

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
//! Component type keys
//!
//! Every concrete component container type gets a small dense integer the
//! first time anything asks for it. The key is stable for the rest of the
//! process and is never shared between two types, which lets the database
//! keep its containers in a plain vector indexed by key.
//!
//! ## Concurrency
//!
//! Keys are the one piece of process-wide state in the crate. Lookups take
//! a shared lock; the first request for a type upgrades to the exclusive
//! lock and checks again before drawing a key, so racing first uses still
//! hand out exactly one key per type with no gaps.

use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

static KEYS: OnceLock<RwLock<HashMap<TypeId, usize>>> = OnceLock::new();

fn key_table() -> &'static RwLock<HashMap<TypeId, usize>> {
    KEYS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Dense per-type index into the database's container table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentKey(usize);

impl ComponentKey {
    /// Get the key for `T`, drawing a fresh one on first use
    pub fn of<T: 'static>() -> Self {
        let type_id = TypeId::of::<T>();

        if let Some(&index) = key_table().read().get(&type_id) {
            return ComponentKey(index);
        }

        let mut table = key_table().write();
        let next = table.len();
        let index = *table.entry(type_id).or_insert(next);
        if index == next {
            tracing::trace!(
                component = std::any::type_name::<T>(),
                key = index,
                "assigned component key"
            );
        }
        ComponentKey(index)
    }

    /// Get the key for `T` without assigning one
    pub fn get<T: 'static>() -> Option<Self> {
        key_table()
            .read()
            .get(&TypeId::of::<T>())
            .copied()
            .map(ComponentKey)
    }

    /// The key as a table index
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentKey({})", self.0)
    }
}

/// Number of component keys handed out so far in this process
pub fn registered_component_keys() -> usize {
    key_table().read().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Barrier};
    use std::thread;

    struct KeyA;
    struct KeyB;
    struct Raced;
    struct NeverAsked;

    #[test]
    fn test_key_is_stable() {
        let first = ComponentKey::of::<KeyA>();
        assert_eq!(first, ComponentKey::of::<KeyA>());
        assert_eq!(ComponentKey::get::<KeyA>(), Some(first));
    }

    #[test]
    fn test_distinct_types_get_distinct_keys() {
        assert_ne!(ComponentKey::of::<KeyA>(), ComponentKey::of::<KeyB>());
    }

    #[test]
    fn test_get_does_not_assign() {
        assert_eq!(ComponentKey::get::<NeverAsked>(), None);
        assert_eq!(ComponentKey::get::<NeverAsked>(), None);
    }

    #[test]
    fn test_keys_are_dense() {
        let key = ComponentKey::of::<KeyB>();
        assert!(key.index() < registered_component_keys());
    }

    #[test]
    fn test_concurrent_first_use_yields_one_key() {
        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    ComponentKey::of::<Raced>()
                })
            })
            .collect();

        let keys: HashSet<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(keys.len(), 1);
    }
}

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
//! Scenario tests with two printing component types
//!
//! Mirrors a typical frame: register containers, spawn entities, attach
//! components, despawn, and check that no container keeps a dead entity.

use game_ecs::ecs::{Component, ComponentData, DenseStorage, EcsDatabase, Entity};
use std::sync::atomic::{AtomicUsize, Ordering};

static STDOUT_UPDATES: AtomicUsize = AtomicUsize::new(0);
static STDERR_UPDATES: AtomicUsize = AtomicUsize::new(0);

struct PrintStdout;

impl ComponentData for PrintStdout {
    fn update(&mut self, entity: Entity) {
        println!("updating {entity}");
        STDOUT_UPDATES.fetch_add(1, Ordering::SeqCst);
    }
}

struct PrintErr;

impl ComponentData for PrintErr {
    fn update(&mut self, entity: Entity) {
        eprintln!("updating {entity}");
        STDERR_UPDATES.fetch_add(1, Ordering::SeqCst);
    }
}

type Stdout = DenseStorage<PrintStdout>;
type Stderr = DenseStorage<PrintErr>;

fn setup() -> EcsDatabase {
    let mut db = EcsDatabase::new();
    db.construct_component::<Stdout>().unwrap();
    db.construct_component::<Stderr>().unwrap();
    db
}

fn attach_stdout(db: &mut EcsDatabase, entity: Entity) {
    db.component_mut::<Stdout>()
        .unwrap()
        .insert(entity, PrintStdout)
        .unwrap();
}

fn attach_stderr(db: &mut EcsDatabase, entity: Entity) {
    db.component_mut::<Stderr>()
        .unwrap()
        .insert(entity, PrintErr)
        .unwrap();
}

#[test]
fn test_destroy_leaves_no_membership() {
    let mut db = setup();
    let e0 = db.create_entity();
    let mut e1 = db.create_entity();
    let e2 = db.create_entity();
    let e1_handle = e1;

    attach_stdout(&mut db, e0);
    attach_stderr(&mut db, e0);
    attach_stdout(&mut db, e1);
    attach_stderr(&mut db, e2);

    db.destroy_entity(&mut e1);

    let stdout = db.component::<Stdout>().unwrap();
    assert!(!stdout.contains(e1_handle));
    assert_eq!(stdout.len(), 1);
    assert!(stdout.contains(e0));

    let e3 = db.create_entity();
    attach_stderr(&mut db, e3);

    assert_eq!(db.size::<Stdout>(), 1);
    assert_eq!(db.size::<Stderr>(), 3);
    // e1's id was the lowest free one
    assert_eq!(e3.id(), e1_handle.id());
    assert!(!db.has_component::<Stdout>(e3));
}

#[test]
fn test_add_iterate_remove_cycle() {
    let mut db = setup();
    let mut e0 = db.create_entity();
    assert!(!db.has_components(e0));

    attach_stdout(&mut db, e0);

    let mut visited = Vec::new();
    db.iterate::<Stdout, _>(|_, entity| visited.push(entity));
    assert_eq!(visited, vec![e0]);

    assert_eq!(db.remove::<Stdout>(e0), Ok(()));
    assert_eq!(db.size::<Stdout>(), 0);

    db.destroy_entity(&mut e0);
    assert_eq!(e0, Entity::INVALID);
    assert_eq!(db.entity_count(), 0);
}

#[test]
fn test_update_pass_reaches_every_member() {
    let mut db = setup();
    let e0 = db.create_entity();
    let e1 = db.create_entity();
    attach_stdout(&mut db, e0);
    attach_stdout(&mut db, e1);
    attach_stderr(&mut db, e1);

    let stdout_before = STDOUT_UPDATES.load(Ordering::SeqCst);
    let stderr_before = STDERR_UPDATES.load(Ordering::SeqCst);

    db.update::<Stdout>();
    assert_eq!(STDOUT_UPDATES.load(Ordering::SeqCst) - stdout_before, 2);

    db.update_all();
    assert_eq!(STDOUT_UPDATES.load(Ordering::SeqCst) - stdout_before, 4);
    assert_eq!(STDERR_UPDATES.load(Ordering::SeqCst) - stderr_before, 1);
}

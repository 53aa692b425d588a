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
//! Demo of the database driving two printing components
//!
//! Registers a stdout and a stderr printer, attaches them to a few
//! entities, runs a couple of update passes and despawns an entity.

use game_ecs::ecs::{Component, ComponentData, DenseStorage, EcsDatabase, Entity, EntitySet};
use game_ecs::DatabaseConfig;

struct PrintStdout {
    frames: u32,
}

impl ComponentData for PrintStdout {
    fn update(&mut self, entity: Entity) {
        self.frames += 1;
        println!("  [stdout] {} frame {}", entity, self.frames);
    }
}

struct PrintStderr;

impl ComponentData for PrintStderr {
    fn update(&mut self, entity: Entity) {
        eprintln!("  [stderr] {}", entity);
    }
}

struct Player;

fn main() {
    println!("Game ECS - Print Components Example");
    println!("===================================\n");

    let config = DatabaseConfig::from_env().unwrap_or_else(|err| {
        eprintln!("Ignoring environment configuration: {err}");
        DatabaseConfig::default()
    });
    let mut db = EcsDatabase::with_config(config);

    db.construct_component::<DenseStorage<PrintStdout>>()
        .expect("fresh database");
    db.construct_component::<DenseStorage<PrintStderr>>()
        .expect("fresh database");
    db.construct_component::<EntitySet<Player>>()
        .expect("fresh database");
    println!("Registered {} component containers", db.component_count());

    let e0 = db.create_entity();
    let mut e1 = db.create_entity();
    let e2 = db.create_entity();
    println!("Created {} entities: {}, {}, {}", db.entity_count(), e0, e1, e2);

    for entity in [e0, e1] {
        if let Err(err) = db.add_with::<DenseStorage<PrintStdout>, _>(entity, |stdout, entity| {
            stdout.insert_with(entity, || PrintStdout { frames: 0 })
        }) {
            println!("  could not attach PrintStdout to {}: {}", entity, err);
        }
    }
    for entity in [e0, e2] {
        if let Err(err) = db.add::<DenseStorage<PrintStderr>>(entity, PrintStderr) {
            println!("  could not attach PrintStderr to {}: {}", entity, err);
        }
    }
    if let Err(err) = db.add::<EntitySet<Player>>(e0, ()) {
        println!("  could not tag {} as player: {}", e0, err);
    }

    for entity in [e0, e1, e2] {
        println!("  {} has {} components", entity, db.num_components(entity));
    }

    println!("\nUpdating components:");
    for frame in 0..2 {
        println!(" frame {frame}");
        db.update_all();
    }

    println!("\nIterating players:");
    db.iterate::<EntitySet<Player>, _>(|_, entity| println!("  player {entity}"));

    println!("\nDestroying {}", e1);
    let e1_handle = e1;
    db.destroy_entity(&mut e1);
    println!(
        "  stdout printer still holds it: {}",
        db.component::<DenseStorage<PrintStdout>>()
            .map_or(false, |c| c.contains(e1_handle))
    );

    let e3 = db.create_entity();
    println!("Created {} (reusing the freed id)", e3);
    println!("Stale handle still alive: {}", db.is_alive(e1_handle));

    println!("\nFinal state: {:?}", db);
}

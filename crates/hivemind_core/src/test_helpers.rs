//! Test-only construction helpers, kept behind the `test-helpers` feature
//! so integration tests in other crates can build scenarios without
//! reaching into engine internals (spec.md §9: "expose a test-only
//! reseed").

use bevy_ecs::prelude::World;

use crate::accounting::Accounting;
use crate::clock::Clock;
use crate::config::Config;
use crate::courier::{Courier, CourierKind};
use crate::grid::{Cell, Grid, Pos};
use crate::package::Package;
use crate::resources::{Base, Clients, NextCourierId, Packages, Rng, SimStatus, WaitingPool};
use crate::spawner::AdaptiveSpawner;

/// Builds a bare `World` with every resource the schedule expects, over an
/// empty (no-wall) grid with the base at `(0, 0)`. Callers add couriers and
/// packages directly.
pub fn bare_world(rows: i32, cols: i32, config: Config, seed: u64) -> World {
    let mut world = World::new();
    world.insert_resource(Grid::new(rows, cols));
    world.insert_resource(Base(Pos::new(0, 0)));
    world.insert_resource(Clients::default());
    world.insert_resource(Clock::new());
    world.insert_resource(Accounting::default());
    world.insert_resource(AdaptiveSpawner::new());
    world.insert_resource(NextCourierId::default());
    world.insert_resource(Packages::default());
    world.insert_resource(WaitingPool::default());
    world.insert_resource(SimStatus::default());
    world.insert_resource(Rng::seeded(seed));
    world.insert_resource(config);
    world
}

pub fn spawn_courier_at(world: &mut World, kind: CourierKind, pos: Pos) -> bevy_ecs::prelude::Entity {
    let id = world.resource_mut::<NextCourierId>().next();
    world.spawn(Courier::spawn(id, kind, pos)).id()
}

pub fn spawn_package(world: &mut World, dest: Pos, reward: i64, deadline: u64) -> usize {
    let tick = world.resource::<Clock>().tick;
    let id = world.resource_mut::<Packages>().push(dest, reward, deadline, tick);
    world.resource_mut::<WaitingPool>().0.push(id);
    id
}

pub fn set_wall(world: &mut World, pos: Pos) {
    world.resource_mut::<Grid>().set(pos, Cell::Wall);
}

pub fn package_at(world: &World, id: usize) -> Package {
    world.resource::<Packages>().0[id].clone()
}

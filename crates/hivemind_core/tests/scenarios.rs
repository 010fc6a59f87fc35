//! End-to-end scenarios from spec.md §8.

mod support;

use std::io::Write;

use bevy_ecs::prelude::World;
use hivemind_core::config::Config;
use hivemind_core::courier::{Courier, CourierKind};
use hivemind_core::grid::{Grid, Pos};
use hivemind_core::test_helpers::{bare_world, package_at, set_wall, spawn_courier_at, spawn_package};
use hivemind_core::Engine;

#[test]
fn flying_shortest_path_on_empty_map() {
    let grid = Grid::new(5, 5);
    let a = Pos::new(0, 0);
    let b = Pos::new(2, 2);
    let path = grid.find_path(a, b, true);
    assert_eq!(path.len(), 4);
    assert_eq!(*path.last().unwrap(), b);
    assert_eq!(grid.distance(a, b, true), Some(4));
}

#[test]
fn wall_ring_blocks_ground_movers() {
    let mut world: World = bare_world(5, 5, support::minimal_config(), 1);
    {
        let mut grid = world.resource_mut::<Grid>();
        for p in [Pos::new(1, 0), Pos::new(0, 1), Pos::new(1, 1)] {
            grid.set(p, hivemind_core::grid::Cell::Wall);
        }
    }
    let grid = world.resource::<Grid>();
    let a = Pos::new(0, 0);
    let b = Pos::new(2, 2);
    assert!(grid.find_path(a, b, false).is_empty());
    assert_eq!(grid.distance(a, b, false), None);
}

#[test]
fn deadline_is_relative_to_spawn_tick() {
    use hivemind_core::resources::Rng;
    use rand::Rng as _;

    let mut world = bare_world(5, 5, support::minimal_config(), 99);
    world.resource_mut::<hivemind_core::clock::Clock>().tick = 50;

    let mut rng = world.resource_mut::<Rng>();
    let offset: u64 = rng.0.gen_range(10..=20);
    let deadline = 50 + offset;
    assert!((60..=70).contains(&deadline));
}

#[test]
fn single_drone_single_package_assignment_via_file_map() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "B...\n..D.\n....\n").unwrap();

    let config = Config {
        drones: 1,
        robots: 0,
        scooters: 0,
        total_packages: 1,
        spawn_frequency: 1,
        max_ticks: 20,
        map_file: Some(file.path().to_str().unwrap().to_string()),
        ..Config::default()
    };

    let mut engine = Engine::new(config, Some(5)).unwrap();
    engine.step();

    assert_eq!(engine.waiting_len(), 0);
    let mut found_carrying = false;
    {
        let world = engine.world_mut();
        let mut query = world.query::<&Courier>();
        for courier in query.iter(world) {
            if !courier.packages().is_empty() {
                found_carrying = true;
            }
        }
    }
    assert!(found_carrying, "the drone should carry the spawned package");
}

#[test]
fn battery_exhaustion_kills_the_courier() {
    let mut world = bare_world(5, 5, support::minimal_config(), 3);
    let entity = spawn_courier_at(&mut world, CourierKind::Drone, Pos::new(0, 0));
    {
        let mut courier = world.get_mut::<Courier>(entity).unwrap();
        courier.battery = courier.consumption;
    }
    let pkg_id = spawn_package(&mut world, Pos::new(0, 1), 500, 100);
    {
        let mut courier = world.get_mut::<Courier>(entity).unwrap();
        courier.assign_package(pkg_id);
    }
    world
        .resource_mut::<hivemind_core::resources::WaitingPool>()
        .0
        .retain(|&id| id != pkg_id);

    let mut schedule = hivemind_core::systems::build_schedule();
    schedule.run(&mut world);

    let courier = world.get::<Courier>(entity).unwrap();
    assert!(courier.dead);
    assert_eq!(world.resource::<hivemind_core::accounting::Accounting>().dead_agents, 1);
    assert!(!package_at(&world, pkg_id).is_delivered());
}

#[test]
fn backlog_triggers_exactly_one_additional_spawn_per_cooldown() {
    use hivemind_core::spawner::AdaptiveSpawner;

    let config = Config {
        drones: 1,
        robots: 3,
        scooters: 0,
        ..Config::default()
    };
    let mut spawner = AdaptiveSpawner::new();
    spawner.record_spawn(hivemind_core::courier::CourierKind::Drone, 0);

    assert_eq!(spawner.maybe_spawn(&config, 4, 1), None);
    assert_eq!(spawner.maybe_spawn(&config, 4, 2), None);
    assert_eq!(
        spawner.maybe_spawn(&config, 4, 5),
        Some(hivemind_core::courier::CourierKind::Robot)
    );
}

#[test]
fn zero_couriers_configured_still_completes_without_delivery() {
    let config = Config {
        drones: 0,
        robots: 0,
        scooters: 0,
        total_packages: 3,
        spawn_frequency: 1,
        max_ticks: 10,
        ..Config::default()
    };
    let mut engine = Engine::new(config, Some(2)).unwrap();
    let _ = engine.run();
    assert!(engine.packages().iter().all(|p| !p.is_delivered()));
}

#[test]
fn wall_blockade_is_unreachable_helper_still_used() {
    let mut world = bare_world(5, 5, support::minimal_config(), 1);
    set_wall(&mut world, Pos::new(1, 0));
    let grid = world.resource::<Grid>();
    assert!(grid.is_wall(Pos::new(1, 0)));
}

//! The engine: a single-instance owner of world state, lifecycle tied to
//! `run` (spec.md §9 "process-wide singleton"). No global mutable access —
//! callers hold the `Engine` by unique ownership.

use bevy_ecs::prelude::{Schedule, World};

use crate::accounting::{Accounting, Report};
use crate::clock::Clock;
use crate::config::Config;
use crate::error::SimError;
use crate::map;
use crate::package::Package;
use crate::resources::{Base, Clients, NextCourierId, Packages, Rng, SimStatus, WaitingPool};
use crate::spawner::AdaptiveSpawner;
use crate::systems::build_schedule;

pub struct Engine {
    world: World,
    schedule: Schedule,
    max_ticks: u64,
    total_packages: u32,
}

pub enum StopReason {
    MaxTicks,
    AllDelivered,
    ForcedConcede,
}

impl Engine {
    /// Loads the map (procedural or file-backed per `config.map_file`),
    /// seeds the RNG, and populates the ECS world. `seed` is `None` for a
    /// production run (entropy-seeded) and `Some` for reproducible tests.
    pub fn new(mut config: Config, seed: Option<u64>) -> Result<Engine, SimError> {
        let mut rng = match seed {
            Some(s) => Rng::seeded(s),
            None => Rng::from_entropy(),
        };

        let map_result = map::load_map(&mut config, &mut rng.0)?;

        let mut world = World::new();
        let max_ticks = config.max_ticks;
        let total_packages = config.total_packages;

        world.insert_resource(map_result.grid);
        world.insert_resource(Base(map_result.base));
        world.insert_resource(Clients(map_result.clients));
        world.insert_resource(Clock::new());
        world.insert_resource(Accounting::default());
        world.insert_resource(AdaptiveSpawner::new());
        world.insert_resource(NextCourierId::default());
        world.insert_resource(Packages::default());
        world.insert_resource(WaitingPool::default());
        world.insert_resource(SimStatus::default());
        world.insert_resource(rng);
        world.insert_resource(config);

        Ok(Engine {
            world,
            schedule: build_schedule(),
            max_ticks,
            total_packages,
        })
    }

    pub fn step(&mut self) {
        self.schedule.run(&mut self.world);
    }

    /// Runs to completion, returning why the run stopped.
    pub fn run(&mut self) -> StopReason {
        loop {
            self.step();

            if self.world.resource::<Clock>().tick >= self.max_ticks {
                return StopReason::MaxTicks;
            }

            let status = *self.world.resource::<SimStatus>();
            if status.forced_terminate {
                return StopReason::ForcedConcede;
            }

            let accounting = *self.world.resource::<Accounting>();
            if accounting.spawned_packages >= self.total_packages {
                let packages = &self.world.resource::<Packages>().0;
                if packages.iter().all(|p| p.is_delivered()) && !packages.is_empty() {
                    return StopReason::AllDelivered;
                }
            }
        }
    }

    pub fn tick(&self) -> u64 {
        self.world.resource::<Clock>().tick
    }

    pub fn packages(&self) -> &[Package] {
        &self.world.resource::<Packages>().0
    }

    pub fn waiting_len(&self) -> usize {
        self.world.resource::<WaitingPool>().0.len()
    }

    pub fn accounting(&self) -> Accounting {
        *self.world.resource::<Accounting>()
    }

    pub fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    pub fn total_packages(&self) -> u32 {
        self.total_packages
    }

    pub fn forced_terminate(&self) -> bool {
        self.world.resource::<SimStatus>().forced_terminate
    }

    pub fn report(&self) -> Report {
        Report::compute(self.packages(), &self.accounting())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn small_config() -> Config {
        Config {
            rows: 8,
            cols: 8,
            max_ticks: 50,
            max_stations: 1,
            clients_count: 3,
            drones: 1,
            robots: 1,
            scooters: 0,
            total_packages: 3,
            spawn_frequency: 2,
            display_delay_ms: 0,
            map_file: None,
        }
    }

    #[test]
    fn runs_to_completion_without_panicking() {
        let mut engine = Engine::new(small_config(), Some(42)).unwrap();
        let _ = engine.run();
        assert!(engine.tick() > 0);
    }

    #[test]
    fn accounting_counters_are_monotonic() {
        let mut engine = Engine::new(small_config(), Some(7)).unwrap();
        let mut last = engine.accounting();
        for _ in 0..20 {
            engine.step();
            let now = engine.accounting();
            assert!(now.operating_cost_total >= last.operating_cost_total);
            assert!(now.dead_agents >= last.dead_agents);
            assert!(now.spawned_packages >= last.spawned_packages);
            last = now;
        }
    }
}

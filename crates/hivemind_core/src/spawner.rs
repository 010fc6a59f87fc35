//! Adaptive courier spawner (spec.md §4.6), grounded in the teacher's
//! `sim_core::spawner`/`SpawnerState` family — generalized here from
//! inter-arrival distributions to a fixed backlog-threshold plus cooldown.

use bevy_ecs::prelude::Resource;

use crate::config::Config;
use crate::courier::CourierKind;

pub const WAITING_SPAWN_THRESHOLD: usize = 4;
pub const SPAWN_COOLDOWN_TICKS: u64 = 5;

#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct AdaptiveSpawner {
    pub active_drones: u32,
    pub active_robots: u32,
    pub active_scooters: u32,
    pub last_spawn_tick: Option<u64>,
}

impl AdaptiveSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    fn total_active(&self) -> u32 {
        self.active_drones + self.active_robots + self.active_scooters
    }

    fn total_caps(&self, config: &Config) -> u32 {
        config.drones + config.robots + config.scooters
    }

    /// The kind to spawn initially (spec.md: exactly one courier at the base
    /// at simulation start, Drone > Robot > Scooter by availability).
    pub fn initial_kind(config: &Config) -> Option<CourierKind> {
        Self::next_available_kind_static(config)
    }

    fn next_available_kind_static(config: &Config) -> Option<CourierKind> {
        if config.drones > 0 {
            Some(CourierKind::Drone)
        } else if config.robots > 0 {
            Some(CourierKind::Robot)
        } else if config.scooters > 0 {
            Some(CourierKind::Scooter)
        } else {
            None
        }
    }

    /// The next kind to spawn given current active counts vs. caps, in
    /// priority order Drone -> Robot -> Scooter.
    fn next_available_kind(&self, config: &Config) -> Option<CourierKind> {
        if self.active_drones < config.drones {
            Some(CourierKind::Drone)
        } else if self.active_robots < config.robots {
            Some(CourierKind::Robot)
        } else if self.active_scooters < config.scooters {
            Some(CourierKind::Scooter)
        } else {
            None
        }
    }

    pub fn record_spawn(&mut self, kind: CourierKind, tick: u64) {
        match kind {
            CourierKind::Drone => self.active_drones += 1,
            CourierKind::Robot => self.active_robots += 1,
            CourierKind::Scooter => self.active_scooters += 1,
        }
        self.last_spawn_tick = Some(tick);
    }

    /// Whether the backlog-driven spawn condition is met this tick, and if
    /// so which kind to spawn.
    pub fn maybe_spawn(&self, config: &Config, waiting_len: usize, tick: u64) -> Option<CourierKind> {
        if waiting_len < WAITING_SPAWN_THRESHOLD {
            return None;
        }
        if let Some(last) = self.last_spawn_tick {
            if tick.saturating_sub(last) < SPAWN_COOLDOWN_TICKS {
                return None;
            }
        }
        if self.total_active() >= self.total_caps(config) {
            return None;
        }
        self.next_available_kind(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(drones: u32, robots: u32, scooters: u32) -> Config {
        Config {
            drones,
            robots,
            scooters,
            ..Config::default()
        }
    }

    #[test]
    fn initial_kind_prefers_drone_then_robot_then_scooter() {
        assert_eq!(AdaptiveSpawner::initial_kind(&config(1, 1, 1)), Some(CourierKind::Drone));
        assert_eq!(AdaptiveSpawner::initial_kind(&config(0, 1, 1)), Some(CourierKind::Robot));
        assert_eq!(AdaptiveSpawner::initial_kind(&config(0, 0, 1)), Some(CourierKind::Scooter));
        assert_eq!(AdaptiveSpawner::initial_kind(&config(0, 0, 0)), None);
    }

    #[test]
    fn backlog_spawn_respects_threshold_and_cooldown() {
        let mut spawner = AdaptiveSpawner::new();
        let config = config(1, 3, 0);
        assert_eq!(spawner.maybe_spawn(&config, 3, 0), None);
        assert_eq!(spawner.maybe_spawn(&config, 4, 0), Some(CourierKind::Drone));
        spawner.record_spawn(CourierKind::Drone, 0);
        assert_eq!(spawner.maybe_spawn(&config, 4, 1), None);
        assert_eq!(spawner.maybe_spawn(&config, 4, 5), Some(CourierKind::Robot));
    }

    #[test]
    fn stops_once_all_caps_reached() {
        let mut spawner = AdaptiveSpawner::new();
        let config = config(1, 0, 0);
        spawner.record_spawn(CourierKind::Drone, 0);
        assert_eq!(spawner.maybe_spawn(&config, 10, 100), None);
    }
}

//! Shared scenario-building helpers for integration tests.

use hivemind_core::config::Config;

pub fn minimal_config() -> Config {
    Config {
        rows: 5,
        cols: 5,
        max_ticks: 50,
        max_stations: 1,
        clients_count: 1,
        drones: 1,
        robots: 0,
        scooters: 0,
        total_packages: 1,
        spawn_frequency: 1,
        display_delay_ms: 0,
        map_file: None,
    }
}

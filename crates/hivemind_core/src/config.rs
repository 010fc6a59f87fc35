//! Config file loading: a line-oriented `KEY: value...` format (spec.md §6).
//!
//! Unknown keys are ignored; recognised keys are whitespace-separated integers
//! or a single path string (`MAP_FILE:`).

use std::fs;
use std::path::Path;

use bevy_ecs::prelude::Resource;

use crate::error::SimError;

/// Simulation configuration loaded from a config file (or defaults).
#[derive(Debug, Clone, PartialEq, Eq, Resource)]
pub struct Config {
    pub rows: i32,
    pub cols: i32,
    pub max_ticks: u64,
    pub max_stations: i32,
    pub clients_count: i32,
    pub drones: u32,
    pub robots: u32,
    pub scooters: u32,
    pub total_packages: u32,
    pub spawn_frequency: i64,
    pub display_delay_ms: u64,
    pub map_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            max_ticks: 1000,
            max_stations: 3,
            clients_count: 10,
            drones: 3,
            robots: 2,
            scooters: 1,
            total_packages: 50,
            spawn_frequency: 10,
            display_delay_ms: 100,
            map_file: None,
        }
    }
}

impl Config {
    /// Load a config from `path`, falling back to field-by-field defaults for
    /// any key not present in the file. Unknown keys are ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::ConfigOpen {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Parse config text directly (used by tests and by `load`).
    pub fn parse(text: &str) -> Config {
        let mut cfg = Config::default();
        for line in text.lines() {
            let mut tokens = line.split_whitespace();
            let Some(key) = tokens.next() else { continue };
            let rest: Vec<&str> = tokens.collect();
            match key {
                "MAP_SIZE:" => {
                    if let (Some(r), Some(c)) = (
                        rest.first().and_then(|s| s.parse().ok()),
                        rest.get(1).and_then(|s| s.parse().ok()),
                    ) {
                        cfg.rows = r;
                        cfg.cols = c;
                    }
                }
                "MAX_TICKS:" => set_u64(&mut cfg.max_ticks, &rest),
                "MAX_STATIONS:" => set_i32(&mut cfg.max_stations, &rest),
                "CLIENTS_COUNT:" => set_i32(&mut cfg.clients_count, &rest),
                "DRONES:" => set_u32(&mut cfg.drones, &rest),
                "ROBOTS:" => set_u32(&mut cfg.robots, &rest),
                "SCOOTERS:" => set_u32(&mut cfg.scooters, &rest),
                "TOTAL_PACKAGES:" => set_u32(&mut cfg.total_packages, &rest),
                "SPAWN_FREQUENCY:" => set_i64(&mut cfg.spawn_frequency, &rest),
                "DISPLAY_DELAY_MS:" => set_u64(&mut cfg.display_delay_ms, &rest),
                "MAP_FILE:" => {
                    if let Some(p) = rest.first() {
                        cfg.map_file = Some((*p).to_string());
                    }
                }
                _ => {}
            }
        }
        cfg
    }
}

fn set_u64(field: &mut u64, rest: &[&str]) {
    if let Some(v) = rest.first().and_then(|s| s.parse().ok()) {
        *field = v;
    }
}

fn set_i64(field: &mut i64, rest: &[&str]) {
    if let Some(v) = rest.first().and_then(|s| s.parse().ok()) {
        *field = v;
    }
}

fn set_i32(field: &mut i32, rest: &[&str]) {
    if let Some(v) = rest.first().and_then(|s| s.parse().ok()) {
        *field = v;
    }
}

fn set_u32(field: &mut u32, rest: &[&str]) {
    if let Some(v) = rest.first().and_then(|s| s.parse().ok()) {
        *field = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_keys() {
        let cfg = Config::parse(
            "MAP_SIZE: 10 12\nMAX_TICKS: 500\nDRONES: 2\nSPAWN_FREQUENCY: -1\nMAP_FILE: maps/a.txt\n",
        );
        assert_eq!(cfg.rows, 10);
        assert_eq!(cfg.cols, 12);
        assert_eq!(cfg.max_ticks, 500);
        assert_eq!(cfg.drones, 2);
        assert_eq!(cfg.spawn_frequency, -1);
        assert_eq!(cfg.map_file.as_deref(), Some("maps/a.txt"));
    }

    #[test]
    fn ignores_unknown_keys() {
        let cfg = Config::parse("FOO: 1 2 3\nDRONES: 7\n");
        assert_eq!(cfg.drones, 7);
        assert_eq!(cfg.robots, Config::default().robots);
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let cfg = Config::parse("");
        assert_eq!(cfg, Config::default());
    }
}

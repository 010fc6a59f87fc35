//! Text-file map loading (spec.md §4.7, §6), grounded directly in the
//! original `FileMapLoader.cpp`. Diverges from the original in one place:
//! a failed open is fatal here (`SimError::MapOpen`) rather than silently
//! falling back to an empty map — see DESIGN.md.

use std::fs;

use rand::rngs::StdRng;

use crate::config::Config;
use crate::error::SimError;
use crate::grid::{Cell, Grid, Pos};

use super::{MapProvider, MapResult};

/// Loads a map from a fixed text file path. A failed open or a failed
/// reachability validation is fatal — no regeneration (spec.md §4.7, §7).
pub struct FileMapLoader {
    pub path: String,
}

impl MapProvider for FileMapLoader {
    fn generate(&self, config: &mut Config, _rng: &mut StdRng) -> Result<MapResult, SimError> {
        load(&self.path, config)
    }

    fn retries_on_invalid(&self) -> bool {
        false
    }
}

pub fn load(path: &str, config: &mut Config) -> Result<MapResult, SimError> {
    let text = fs::read_to_string(path).map_err(|source| SimError::MapOpen {
        path: path.to_string(),
        source,
    })?;

    let raw_rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    let cols = raw_rows.iter().map(|r| r.len()).max().unwrap_or(0).max(1);
    let rows = raw_rows.len().max(1);

    let mut cells = vec![vec![Cell::Open; cols]; rows];
    let mut base = None;
    let mut clients = Vec::new();
    let mut stations = Vec::new();

    for (x, row) in raw_rows.iter().enumerate() {
        for y in 0..cols {
            let c = row.chars().nth(y).unwrap_or('.');
            let cell = Cell::from_char(c);
            cells[x][y] = cell;
            let pos = Pos::new(x as i32, y as i32);
            match cell {
                Cell::Base => base = Some(pos),
                Cell::Client => clients.push(pos),
                Cell::Station => stations.push(pos),
                _ => {}
            }
        }
    }

    let mut grid = Grid::from_cells(cells);
    let base = match base {
        Some(b) => b,
        None => {
            eprintln!("warning: map file '{path}' has no 'B' cell, placing base at centre");
            let b = Pos::new(grid.rows / 2, grid.cols / 2);
            grid.set(b, Cell::Base);
            b
        }
    };

    config.rows = grid.rows;
    config.cols = grid.cols;
    config.clients_count = clients.len() as i32;
    config.max_stations = stations.len() as i32;

    Ok(MapResult {
        grid,
        base,
        clients,
        stations,
    })
}

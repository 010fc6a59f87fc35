//! Procedural map generation (spec.md §4.7), grounded directly in the
//! original `ProceduralMapGenerator.cpp`: base at grid centre, then clients
//! and stations at uniform random free cells, then a wall pass.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::Config;
use crate::error::SimError;
use crate::grid::{Cell, Grid, Pos};

use super::{MapProvider, MapResult};

pub struct ProceduralMapGenerator {
    pub wall_prob: f64,
}

impl Default for ProceduralMapGenerator {
    fn default() -> Self {
        Self { wall_prob: 0.08 }
    }
}

impl MapProvider for ProceduralMapGenerator {
    fn generate(&self, config: &mut Config, rng: &mut StdRng) -> Result<MapResult, SimError> {
        Ok(self.generate_once(config, rng))
    }

    fn retries_on_invalid(&self) -> bool {
        true
    }
}

impl ProceduralMapGenerator {
    fn generate_once(&self, config: &Config, rng: &mut StdRng) -> MapResult {
        let mut grid = Grid::new(config.rows, config.cols);
        let base = Pos::new(config.rows / 2, config.cols / 2);
        grid.set(base, Cell::Base);

        let mut occupied = HashSet::new();
        occupied.insert(base);

        let mut clients = Vec::with_capacity(config.clients_count.max(0) as usize);
        for _ in 0..config.clients_count.max(0) {
            let p = random_free_cell(&grid, &occupied, rng);
            grid.set(p, Cell::Client);
            occupied.insert(p);
            clients.push(p);
        }

        let mut stations = Vec::with_capacity(config.max_stations.max(0) as usize);
        for _ in 0..config.max_stations.max(0) {
            let p = random_free_cell(&grid, &occupied, rng);
            grid.set(p, Cell::Station);
            occupied.insert(p);
            stations.push(p);
        }

        for x in 0..grid.rows {
            for y in 0..grid.cols {
                let p = Pos::new(x, y);
                if grid.get(p) == Some(Cell::Open) && rng.gen::<f64>() < self.wall_prob {
                    grid.set(p, Cell::Wall);
                }
            }
        }

        MapResult {
            grid,
            base,
            clients,
            stations,
        }
    }
}

fn random_free_cell(grid: &Grid, occupied: &HashSet<Pos>, rng: &mut StdRng) -> Pos {
    loop {
        let x = rng.gen_range(0..grid.rows);
        let y = rng.gen_range(0..grid.cols);
        let p = Pos::new(x, y);
        if !occupied.contains(&p) {
            return p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn base_is_placed_at_centre() {
        let mut config = Config {
            rows: 10,
            cols: 10,
            clients_count: 2,
            max_stations: 1,
            ..Config::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let result = ProceduralMapGenerator::default()
            .generate(&mut config, &mut rng)
            .unwrap();
        assert_eq!(result.base, Pos::new(5, 5));
        assert_eq!(result.clients.len(), 2);
        assert_eq!(result.stations.len(), 1);
    }
}

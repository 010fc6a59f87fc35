//! Map collaborator interface (spec.md §4.7): produces `(grid, base, clients,
//! stations)` from a `Config` and an RNG handle. Grounded directly in the
//! original `IMapGenerator`/`ProceduralMapGenerator`/`FileMapLoader`.

pub mod file_loader;
pub mod procedural;

use rand::rngs::StdRng;

use crate::config::Config;
use crate::error::SimError;
use crate::grid::{Grid, Pos};

pub struct MapResult {
    pub grid: Grid,
    pub base: Pos,
    pub clients: Vec<Pos>,
    pub stations: Vec<Pos>,
}

/// Contract for a map collaborator (spec.md §4.7), grounded in the teacher's
/// `MatchingAlgorithm`/`InterArrivalDistribution` trait-object pattern: a
/// small `Send + Sync` trait with one concrete implementor per strategy,
/// picked at setup time rather than per-tick.
pub trait MapProvider: Send + Sync {
    /// Produces one candidate `(grid, base, clients, stations)`. May be
    /// called more than once (procedural regeneration); file-based loaders
    /// are expected to return the same result every call.
    fn generate(&self, config: &mut Config, rng: &mut StdRng) -> Result<MapResult, SimError>;

    /// Whether a failed validation should be retried. Procedural generation
    /// retries up to `MAX_PROCEDURAL_ATTEMPTS`; a file-loaded map is fatal
    /// on the first failure (spec.md §4.7, §7).
    fn retries_on_invalid(&self) -> bool;
}

const MAX_PROCEDURAL_ATTEMPTS: u32 = 1000;

/// Picks the file loader or the procedural generator based on
/// `config.map_file`, applying the retry-with-validation policy from
/// spec.md §4.7: up to 1000 regenerate attempts for procedural maps, a
/// single fatal validation for file-loaded ones.
pub fn load_map(config: &mut Config, rng: &mut StdRng) -> Result<MapResult, SimError> {
    let provider: Box<dyn MapProvider> = match config.map_file.clone() {
        Some(path) => Box::new(file_loader::FileMapLoader { path }),
        None => Box::new(procedural::ProceduralMapGenerator::default()),
    };

    if !provider.retries_on_invalid() {
        let result = provider.generate(config, rng)?;
        validate(&result)?;
        return Ok(result);
    }

    for attempt in 1..=MAX_PROCEDURAL_ATTEMPTS {
        let result = provider.generate(config, rng)?;
        if validate(&result).is_ok() {
            return Ok(result);
        }
        if attempt == MAX_PROCEDURAL_ATTEMPTS {
            return Err(SimError::MapGenExhausted {
                attempts: MAX_PROCEDURAL_ATTEMPTS,
            });
        }
    }
    unreachable!("loop always returns by the final attempt")
}

fn validate(map: &MapResult) -> Result<(), SimError> {
    let mut targets = map.clients.clone();
    targets.extend(map.stations.iter().copied());
    if map.grid.all_reachable(map.base, &targets) {
        Ok(())
    } else {
        Err(SimError::MapInvalid {
            reason: "not every client/station is reachable from the base".to_string(),
        })
    }
}

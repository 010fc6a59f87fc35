//! Fatal error kinds surfaced from the `run` entry point.
//!
//! Soft conditions (assignment infeasibility, courier death) are domain events,
//! not errors, and never reach this type — see `matching` and `accounting`.

use std::fmt;
use std::io;

/// Errors that abort the simulation before or during setup.
#[derive(Debug)]
pub enum SimError {
    /// The config file could not be opened.
    ConfigOpen { path: String, source: io::Error },
    /// A `MAP_FILE:` path could not be opened.
    MapOpen { path: String, source: io::Error },
    /// A loaded map failed reachability validation.
    MapInvalid { reason: String },
    /// Procedural generation could not produce a valid map within `maxAttempts`.
    MapGenExhausted { attempts: u32 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ConfigOpen { path, source } => {
                write!(f, "could not open config file '{path}': {source}")
            }
            SimError::MapOpen { path, source } => {
                write!(f, "could not open map file '{path}': {source}")
            }
            SimError::MapInvalid { reason } => write!(f, "map failed validation: {reason}"),
            SimError::MapGenExhausted { attempts } => write!(
                f,
                "procedural map generation failed after {attempts} attempts"
            ),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::ConfigOpen { source, .. } => Some(source),
            SimError::MapOpen { source, .. } => Some(source),
            SimError::MapInvalid { .. } | SimError::MapGenExhausted { .. } => None,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;

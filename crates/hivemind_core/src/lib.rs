//! HiveMind: a discrete-tick simulation of a last-mile delivery fleet
//! operating on a 2-D grid. A central dispatcher assigns packages to
//! heterogeneous couriers via minimum-cost matching, routes them through a
//! walled map, and reports a final economic summary.

pub mod accounting;
pub mod clock;
pub mod config;
pub mod courier;
pub mod engine;
pub mod error;
pub mod grid;
pub mod map;
pub mod matching;
pub mod package;
pub mod render;
pub mod resources;
pub mod spawner;
pub mod systems;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::Config;
pub use engine::{Engine, StopReason};
pub use error::{SimError, SimResult};

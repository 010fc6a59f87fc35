//! Simulation clock (spec.md §3): a bare monotonic tick counter.
//!
//! The teacher's `sim_core::clock::SimulationClock` drives an event-ordered
//! priority queue of variable-timestamp events; this engine runs a fixed
//! per-tick schedule instead, so the clock collapses to the counter alone.

use bevy_ecs::prelude::Resource;

#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct Clock {
    pub tick: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

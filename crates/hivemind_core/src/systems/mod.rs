//! The fixed per-tick schedule (spec.md §4.5), grounded in the teacher's
//! `bevy_ecs::Schedule`/`run_if` usage but with a static phase order instead
//! of event-conditional systems: every tick runs spawn_packages ->
//! adaptive_spawn -> assignment -> movement_and_delivery -> tick_increment.

pub mod adaptive_spawn;
pub mod assignment;
pub mod movement;
pub mod spawn_packages;
pub mod tick_increment;

use bevy_ecs::prelude::apply_deferred;
use bevy_ecs::schedule::Schedule;

pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            spawn_packages::spawn_packages_system,
            adaptive_spawn::adaptive_spawn_system,
            apply_deferred,
            assignment::assignment_system,
            movement::movement_and_delivery_system,
            tick_increment::tick_increment_system,
        )
            .chain(),
    );
    schedule
}

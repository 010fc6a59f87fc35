//! Phase 5 of the tick loop (spec.md §4.5 step 5).

use bevy_ecs::prelude::ResMut;

use crate::clock::Clock;

pub fn tick_increment_system(mut clock: ResMut<Clock>) {
    clock.advance();
}

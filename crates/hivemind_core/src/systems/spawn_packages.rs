//! Phase 1 of the tick loop (spec.md §4.5 step 1).

use bevy_ecs::prelude::{Res, ResMut};
use rand::Rng as _;

use crate::accounting::Accounting;
use crate::clock::Clock;
use crate::config::Config;
use crate::resources::{Clients, Packages, Rng, WaitingPool};

pub fn spawn_packages_system(
    config: Res<Config>,
    clock: Res<Clock>,
    clients: Res<Clients>,
    mut rng: ResMut<Rng>,
    mut packages: ResMut<Packages>,
    mut waiting: ResMut<WaitingPool>,
    mut accounting: ResMut<Accounting>,
) {
    if config.spawn_frequency <= 0 {
        return;
    }
    if clock.tick % config.spawn_frequency as u64 != 0 {
        return;
    }
    if accounting.spawned_packages >= config.total_packages {
        return;
    }
    if clients.0.is_empty() {
        return;
    }

    let client = clients.0[rng.0.gen_range(0..clients.0.len())];
    let reward = rng.0.gen_range(200..=800) as i64;
    let offset = rng.0.gen_range(10..=20) as u64;
    let deadline = clock.tick + offset;

    let id = packages.push(client, reward, deadline, clock.tick);
    waiting.0.push(id);
    accounting.spawned_packages += 1;
}

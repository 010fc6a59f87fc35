//! Phase 2 of the tick loop (spec.md §4.5 step 2, §4.6), grounded in the
//! teacher's `RiderSpawner`/`DriverSpawner` pair collapsed into one
//! backlog-driven spawner shared by all three courier kinds.

use bevy_ecs::prelude::{Commands, Query, Res, ResMut};

use crate::clock::Clock;
use crate::config::Config;
use crate::courier::{Courier, CourierKind};
use crate::grid::Pos;
use crate::resources::{Base, NextCourierId, WaitingPool};
use crate::spawner::AdaptiveSpawner;

pub fn adaptive_spawn_system(
    mut commands: Commands,
    config: Res<Config>,
    clock: Res<Clock>,
    base: Res<Base>,
    waiting: Res<WaitingPool>,
    mut spawner: ResMut<AdaptiveSpawner>,
    mut next_id: ResMut<NextCourierId>,
    couriers: Query<&Courier>,
) {
    if couriers.is_empty() {
        if let Some(kind) = AdaptiveSpawner::initial_kind(&config) {
            spawn_courier(&mut commands, &mut spawner, &mut next_id, kind, base.0, clock.tick);
        }
        return;
    }

    if let Some(kind) = spawner.maybe_spawn(&config, waiting.0.len(), clock.tick) {
        spawn_courier(&mut commands, &mut spawner, &mut next_id, kind, base.0, clock.tick);
    }
}

fn spawn_courier(
    commands: &mut Commands,
    spawner: &mut AdaptiveSpawner,
    next_id: &mut NextCourierId,
    kind: CourierKind,
    pos: Pos,
    tick: u64,
) {
    let id = next_id.next();
    commands.spawn(Courier::spawn(id, kind, pos));
    spawner.record_spawn(kind, tick);
}

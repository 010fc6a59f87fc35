//! Phase 3 of the tick loop (spec.md §4.5 step 3, §4.4): builds the snapshot
//! the solver needs, runs it, then applies commits back onto ECS state.

use bevy_ecs::prelude::{Entity, Query, Res, ResMut};

use crate::accounting::Accounting;
use crate::clock::Clock;
use crate::config::Config;
use crate::courier::Courier;
use crate::grid::Grid;
use crate::matching::run_assignment;
use crate::resources::{Base, Packages, SimStatus, WaitingPool};

pub fn assignment_system(
    mut couriers_q: Query<(Entity, &mut Courier)>,
    grid: Res<Grid>,
    base: Res<Base>,
    clock: Res<Clock>,
    accounting: Res<Accounting>,
    config: Res<Config>,
    packages: Res<Packages>,
    mut waiting: ResMut<WaitingPool>,
    mut status: ResMut<SimStatus>,
) {
    if waiting.0.is_empty() {
        return;
    }

    let entities: Vec<Entity> = couriers_q.iter().map(|(e, _)| e).collect();
    let snapshot: Vec<Courier> = couriers_q.iter().map(|(_, c)| c.clone()).collect();
    let all_spawned = accounting.spawned_packages >= config.total_packages;

    let outcome = run_assignment(
        &waiting.0,
        &packages.0,
        &snapshot,
        &grid,
        base.0,
        clock.tick,
        all_spawned,
    );

    for (pkg_id, courier_idx) in &outcome.commits {
        let entity = entities[*courier_idx];
        if let Ok((_, mut courier)) = couriers_q.get_mut(entity) {
            courier.assign_package(*pkg_id);
        }
        waiting.0.retain(|&id| id != *pkg_id);
    }

    if outcome.forced_terminate {
        status.forced_terminate = true;
    }
}

//! Phase 4 of the tick loop (spec.md §4.5 step 4), grounded in the teacher's
//! `systems::movement::movement_system` "advance along the cached path, one
//! debit per step" idea, generalized to the spec's carry/return/recharge
//! state machine.

use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::accounting::Accounting;
use crate::clock::Clock;
use crate::courier::Courier;
use crate::grid::{Cell, Grid, Pos};
use crate::resources::{Base, Packages};

pub fn movement_and_delivery_system(
    mut couriers_q: Query<&mut Courier>,
    grid: Res<Grid>,
    base: Res<Base>,
    clock: Res<Clock>,
    mut packages: ResMut<Packages>,
    mut accounting: ResMut<Accounting>,
) {
    for mut courier in couriers_q.iter_mut() {
        if courier.dead {
            continue;
        }
        accounting.operating_cost_total += courier.cost as i64;

        let target = if courier.is_carrying() {
            let pkg_id = courier.packages()[0];
            let pkg = &packages.0[pkg_id];
            Some(Pos::new(pkg.dest_x, pkg.dest_y))
        } else if courier.pos != base.0 {
            Some(base.0)
        } else {
            None
        };

        match target {
            Some(dest) => {
                let path = grid.find_path(courier.pos, dest, courier.can_fly);
                if !path.is_empty() {
                    let step_idx = (courier.speed as usize).min(path.len()) - 1;
                    let new_pos = path[step_idx];
                    courier.apply_move(new_pos);
                    if courier.pos == dest && courier.is_carrying() {
                        let pkg_id = courier.packages()[0];
                        packages.0[pkg_id].mark_delivered(clock.tick);
                        courier.remove_package(pkg_id);
                    }
                }
            }
            None => {
                let amount = courier.max_battery / 4;
                courier.recharge(amount);
            }
        }

        if matches!(grid.get(courier.pos), Some(Cell::Station) | Some(Cell::Base)) {
            let amount = courier.max_battery / 4;
            courier.recharge(amount);
        }

        if courier.battery == 0 {
            let on_support = matches!(grid.get(courier.pos), Some(Cell::Station) | Some(Cell::Base));
            if !on_support {
                courier.kill();
                accounting.dead_agents += 1;
            }
        }
    }
}

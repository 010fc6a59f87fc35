//! Per-tick assignment of waiting packages to courier capacity slots
//! (spec.md §4.4), grounded in the teacher's `sim_core::matching` module
//! family — trait-free here since the spec names one concrete algorithm,
//! not a pluggable strategy.

pub mod hungarian;
pub mod types;

use crate::courier::Courier;
use crate::grid::{Grid, Pos};
use crate::package::{Package, PackageId};
use hungarian::Commit;
use types::{build_cost_matrix, PackageRef, SlotRef};

pub struct AssignmentOutcome {
    /// `(package id, courier index into the caller's courier slice)` pairs,
    /// in commit order.
    pub commits: Vec<(PackageId, usize)>,
    pub forced_terminate: bool,
}

/// Runs the full three-stage solve: Hungarian, then greedy fallback if it
/// committed nothing, then the forced last-resort step if the workload is
/// fully spawned and no courier is active.
pub fn run_assignment(
    waiting_ids: &[PackageId],
    packages: &[Package],
    couriers: &[Courier],
    grid: &Grid,
    base: Pos,
    current_tick: u64,
    all_spawned: bool,
) -> AssignmentOutcome {
    let package_refs: Vec<PackageRef> = waiting_ids
        .iter()
        .enumerate()
        .map(|(i, &id)| {
            let pkg = &packages[id];
            PackageRef {
                list_index: i,
                id,
                dest: Pos::new(pkg.dest_x, pkg.dest_y),
                reward: pkg.reward,
                deadline: pkg.deadline,
            }
        })
        .collect();

    let mut slots: Vec<SlotRef> = Vec::new();
    for (ci, c) in couriers.iter().enumerate() {
        if c.dead {
            continue;
        }
        for _ in 0..c.free_capacity() {
            slots.push(SlotRef {
                list_index: slots.len(),
                courier_index: ci,
                pos: c.pos,
                kind: c.kind,
                speed: c.speed,
                cost: c.cost,
                battery: c.battery,
                consumption: c.consumption,
                can_fly: c.can_fly,
            });
        }
    }

    let matrix = build_cost_matrix(&package_refs, &slots, grid, base, current_tick);
    let mut commits = hungarian::solve(&matrix);

    if commits.is_empty() && !package_refs.is_empty() {
        commits = hungarian::greedy_fallback(&matrix);
    }

    let mut forced_terminate = false;
    if commits.is_empty() && !package_refs.is_empty() {
        let no_active = couriers.iter().all(|c| !c.is_active(base));
        if all_spawned && no_active {
            let (forced, terminated) = forced_last_resort(&package_refs, &slots, grid);
            commits = forced;
            forced_terminate = terminated;
        }
    }

    let resolved = commits
        .iter()
        .map(|c| {
            let pkg_id = package_refs[c.package_index].id;
            let courier_idx = slots[c.slot_index].courier_index;
            (pkg_id, courier_idx)
        })
        .collect();

    AssignmentOutcome {
        commits: resolved,
        forced_terminate,
    }
}

/// Ignores battery and kind heuristics: assigns each waiting package to the
/// nearest reachable free slot. Returns the commits made and whether any
/// package could not be reached by any remaining slot (which concedes the
/// simulation per spec.md §4.4).
fn forced_last_resort(waiting: &[PackageRef], slots: &[SlotRef], grid: &Grid) -> (Vec<Commit>, bool) {
    let mut used = vec![false; slots.len()];
    let mut commits = Vec::new();
    let mut terminated = false;
    for pkg in waiting {
        let mut best: Option<(i32, usize)> = None;
        for (j, slot) in slots.iter().enumerate() {
            if used[j] {
                continue;
            }
            if let Some(d) = grid.distance(slot.pos, pkg.dest, slot.can_fly) {
                if best.map_or(true, |(bd, _)| d < bd) {
                    best = Some((d, j));
                }
            }
        }
        match best {
            Some((_, j)) => {
                used[j] = true;
                commits.push(Commit {
                    package_index: pkg.list_index,
                    slot_index: j,
                });
            }
            None => {
                terminated = true;
                break;
            }
        }
    }
    (commits, terminated)
}

//! Cost-matrix construction (spec.md §4.4).

use crate::courier::CourierKind;
use crate::grid::{Grid, Pos};
use crate::package::PackageId;

/// A large positive sentinel marking an infeasible (package, slot) pairing.
/// Must stay comfortably above any real cost magnitude (rewards top out at
/// 800, penalties are bounded by tick counts in the thousands).
pub const INFEASIBLE: i64 = 1_000_000_000_000;

pub const LATENESS_PENALTY_PER_TICK: i64 = 50;

/// One waiting package, as seen by the solver.
#[derive(Debug, Clone, Copy)]
pub struct PackageRef {
    pub list_index: usize,
    pub id: PackageId,
    pub dest: Pos,
    pub reward: i64,
    pub deadline: u64,
}

/// One free capacity slot on a live courier. A courier with `k` free slots
/// contributes `k` identical `SlotRef`s (one per unit of capacity), mirroring
/// the spec's "one column per free slot" matrix construction.
#[derive(Debug, Clone, Copy)]
pub struct SlotRef {
    pub list_index: usize,
    pub courier_index: usize,
    pub pos: Pos,
    pub kind: CourierKind,
    pub speed: i32,
    pub cost: i32,
    pub battery: i32,
    pub consumption: i32,
    pub can_fly: bool,
}

/// A single matrix cell: either a committed-cost candidate or infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Feasible { cost: i64 },
    Infeasible,
}

impl Cell {
    pub fn cost_value(self) -> i64 {
        match self {
            Cell::Feasible { cost } => cost,
            Cell::Infeasible => INFEASIBLE,
        }
    }
}

/// The square `n x n` cost matrix described in spec.md §4.4: real rows are
/// waiting packages, real columns are free capacity slots, padded with
/// zero-cost dummy rows/columns up to `n = max(p, m)`.
pub struct CostMatrix {
    pub n: usize,
    pub p: usize,
    pub m: usize,
    cells: Vec<Vec<Cell>>,
}

impl CostMatrix {
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row < self.p && col < self.m {
            self.cells[row][col]
        } else {
            Cell::Feasible { cost: 0 }
        }
    }

    pub fn is_real(&self, row: usize, col: usize) -> bool {
        row < self.p && col < self.m
    }
}

/// `ceil(d / speed)`, with `speed` assumed positive (dead couriers never
/// contribute a slot).
fn ticks_for(d: i32, speed: i32) -> i64 {
    ((d + speed - 1) / speed) as i64
}

fn score(pkg: &PackageRef, slot: &SlotRef, d: i32, current_tick: u64) -> i64 {
    let travel_ticks = ticks_for(d, slot.speed);
    let arrival = current_tick as i64 + travel_ticks;
    let lateness = (arrival - pkg.deadline as i64).max(0);
    pkg.reward - travel_ticks * slot.cost as i64 - LATENESS_PENALTY_PER_TICK * lateness
}

fn is_feasible(
    pkg: &PackageRef,
    slot: &SlotRef,
    grid: &Grid,
    base: Pos,
    current_tick: u64,
) -> Option<i64> {
    let d = grid.distance(slot.pos, pkg.dest, slot.can_fly)?;
    if slot.kind == CourierKind::Drone && pkg.reward < 300 {
        return None;
    }
    if slot.kind == CourierKind::Robot && d > grid.rows / 3 {
        return None;
    }
    let d_return = grid.distance(pkg.dest, base, slot.can_fly)?;
    let travel_ticks = ticks_for(d, slot.speed);
    let return_ticks = ticks_for(d_return, slot.speed);
    let battery_needed = (travel_ticks + return_ticks) * slot.consumption as i64;
    if (slot.battery as i64) < battery_needed {
        return None;
    }
    Some(score(pkg, slot, d, current_tick))
}

pub fn build_cost_matrix(
    packages: &[PackageRef],
    slots: &[SlotRef],
    grid: &Grid,
    base: Pos,
    current_tick: u64,
) -> CostMatrix {
    let p = packages.len();
    let m = slots.len();
    let n = p.max(m);
    let mut cells = vec![vec![Cell::Infeasible; m]; p];
    for (i, pkg) in packages.iter().enumerate() {
        for (j, slot) in slots.iter().enumerate() {
            cells[i][j] = match is_feasible(pkg, slot, grid, base, current_tick) {
                Some(score) => Cell::Feasible { cost: -score },
                None => Cell::Infeasible,
            };
        }
    }
    CostMatrix { n, p, m, cells }
}

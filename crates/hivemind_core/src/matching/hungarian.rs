//! Minimum-cost matching solver (spec.md §4.4), grounded in the teacher's
//! `sim_core::matching::hungarian::HungarianMatching`, which drives the same
//! `pathfinding::kuhn_munkres` solver over a sentinel-padded square matrix.
//! Unlike the teacher, the spec's score is already integer-valued, so there
//! is no float-to-i64 scaling step here.

use pathfinding::prelude::{kuhn_munkres, Matrix};

use super::types::{Cell, CostMatrix, INFEASIBLE};

/// A committed `(package row, slot column)` pair, both real indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub package_index: usize,
    pub slot_index: usize,
}

/// Runs Kuhn-Munkres over the padded matrix (maximizing `-cost`, i.e. score)
/// and returns every real-to-real pair whose cost came in below half the
/// infeasibility sentinel.
pub fn solve(matrix: &CostMatrix) -> Vec<Commit> {
    if matrix.n == 0 {
        return Vec::new();
    }
    let mut weights = Matrix::new(matrix.n, matrix.n, 0i64);
    for row in 0..matrix.n {
        for col in 0..matrix.n {
            let cost = matrix.get(row, col).cost_value();
            weights[(row, col)] = -cost;
        }
    }

    let (_total, assignment) = kuhn_munkres(&weights);

    let mut commits = Vec::new();
    for (row, &col) in assignment.iter().enumerate() {
        if !matrix.is_real(row, col) {
            continue;
        }
        let cost = matrix.get(row, col).cost_value();
        if cost < INFEASIBLE / 2 {
            commits.push(Commit {
                package_index: row,
                slot_index: col,
            });
        }
    }
    commits
}

/// Greedy fallback (spec.md §4.4): only invoked by the caller when `solve`
/// commits nothing and packages are waiting. Enumerates feasible pairs by
/// descending profit and greedily takes compatible ones whose profit is at
/// least `-1000`, up to `min(p, m)` pairs.
pub fn greedy_fallback(matrix: &CostMatrix) -> Vec<Commit> {
    let mut candidates: Vec<(i64, usize, usize)> = Vec::new();
    for row in 0..matrix.p {
        for col in 0..matrix.m {
            if let Cell::Feasible { cost } = matrix.get(row, col) {
                candidates.push((-cost, row, col));
            }
        }
    }
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    let limit = matrix.p.min(matrix.m);
    let mut used_rows = vec![false; matrix.p];
    let mut used_cols = vec![false; matrix.m];
    let mut commits = Vec::new();
    for (profit, row, col) in candidates {
        if commits.len() >= limit {
            break;
        }
        if profit < -1000 {
            continue;
        }
        if used_rows[row] || used_cols[col] {
            continue;
        }
        used_rows[row] = true;
        used_cols[col] = true;
        commits.push(Commit {
            package_index: row,
            slot_index: col,
        });
    }
    commits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::courier::CourierKind;
    use crate::grid::{Grid, Pos};
    use crate::matching::types::{build_cost_matrix, PackageRef, SlotRef};

    fn slot(idx: usize, pos: Pos) -> SlotRef {
        SlotRef {
            list_index: idx,
            courier_index: idx,
            pos,
            kind: CourierKind::Robot,
            speed: 1,
            cost: 1,
            battery: 300,
            consumption: 2,
            can_fly: false,
        }
    }

    #[test]
    fn single_package_single_slot_commits() {
        let grid = Grid::new(5, 5);
        let base = Pos::new(0, 0);
        let pkg = PackageRef {
            list_index: 0,
            id: 0,
            dest: Pos::new(1, 1),
            reward: 300,
            deadline: 1000,
        };
        let s = slot(0, Pos::new(0, 0));
        let matrix = build_cost_matrix(&[pkg], &[s], &grid, base, 0);
        let commits = solve(&matrix);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0], Commit { package_index: 0, slot_index: 0 });
    }

    #[test]
    fn infeasible_pair_never_commits() {
        let grid = Grid::new(5, 5);
        let base = Pos::new(0, 0);
        let pkg = PackageRef {
            list_index: 0,
            id: 0,
            dest: Pos::new(1, 1),
            reward: 300,
            deadline: 1000,
        };
        let mut s = slot(0, Pos::new(0, 0));
        s.battery = 0;
        let matrix = build_cost_matrix(&[pkg], &[s], &grid, base, 0);
        let commits = solve(&matrix);
        assert!(commits.is_empty());
    }
}

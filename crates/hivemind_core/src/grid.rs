//! Grid world and path engine (spec.md §3, §4.1).
//!
//! Coordinates follow the spec's fixed convention: `x` is the row index, `y`
//! is the column index, and cell access is `cells[x][y]`. BFS neighbours are
//! explored in the fixed order `{+x, -x, +y, -y}` so that path reconstruction
//! (and therefore tie-breaking) is reproducible.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use bevy_ecs::prelude::Resource;
use lru::LruCache;
use pathfinding::prelude::bfs;

/// Ground-mover BFS paths are recomputed every tick for couriers shuttling
/// to the same handful of destinations (base, stations, a handful of client
/// cells); caching the last few thousand avoids re-walking the grid for the
/// same `(from, to)` pair tick after tick.
const PATH_CACHE_CAPACITY: usize = 4096;

/// A grid position. `x` is the row, `y` is the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One grid cell's terrain kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
    Base,
    Client,
    Station,
}

impl Cell {
    pub fn from_char(c: char) -> Cell {
        match c {
            '#' => Cell::Wall,
            'B' => Cell::Base,
            'D' => Cell::Client,
            'S' => Cell::Station,
            _ => Cell::Open,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Open => '.',
            Cell::Wall => '#',
            Cell::Base => 'B',
            Cell::Client => 'D',
            Cell::Station => 'S',
        }
    }
}

/// Fixed BFS neighbour exploration order: +x, -x, +y, -y.
const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// The grid world: a rectangular array of cells, owned by the engine.
#[derive(Resource)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    pub rows: i32,
    pub cols: i32,
    path_cache: Mutex<LruCache<(Pos, Pos), Vec<Pos>>>,
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish()
    }
}

impl Clone for Grid {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            rows: self.rows,
            cols: self.cols,
            path_cache: Mutex::new(fresh_path_cache()),
        }
    }
}

fn fresh_path_cache() -> LruCache<(Pos, Pos), Vec<Pos>> {
    LruCache::new(NonZeroUsize::new(PATH_CACHE_CAPACITY).unwrap())
}

impl Grid {
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            cells: vec![vec![Cell::Open; cols as usize]; rows as usize],
            rows,
            cols,
            path_cache: Mutex::new(fresh_path_cache()),
        }
    }

    pub fn from_cells(cells: Vec<Vec<Cell>>) -> Self {
        let rows = cells.len() as i32;
        let cols = cells.first().map_or(0, |r| r.len() as i32);
        Self {
            cells,
            rows,
            cols,
            path_cache: Mutex::new(fresh_path_cache()),
        }
    }

    pub fn in_bounds(&self, p: Pos) -> bool {
        p.x >= 0 && p.x < self.rows && p.y >= 0 && p.y < self.cols
    }

    pub fn get(&self, p: Pos) -> Option<Cell> {
        if !self.in_bounds(p) {
            return None;
        }
        Some(self.cells[p.x as usize][p.y as usize])
    }

    pub fn set(&mut self, p: Pos, cell: Cell) {
        self.cells[p.x as usize][p.y as usize] = cell;
        if let Ok(mut cache) = self.path_cache.lock() {
            cache.clear();
        }
    }

    pub fn is_wall(&self, p: Pos) -> bool {
        matches!(self.get(p), Some(Cell::Wall))
    }

    fn neighbours(&self, p: Pos) -> Vec<Pos> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|(dx, dy)| Pos::new(p.x + dx, p.y + dy))
            .filter(|&n| self.in_bounds(n) && !self.is_wall(n))
            .collect()
    }

    /// Shortest 4-connected path from `a` to `b` avoiding walls, excluding `a`
    /// and including `b`. `None` if unreachable. Cached per `(a, b)` pair
    /// since couriers repeatedly path to the same handful of destinations.
    fn bfs_path(&self, a: Pos, b: Pos) -> Option<Vec<Pos>> {
        if let Ok(mut cache) = self.path_cache.lock() {
            if let Some(hit) = cache.get(&(a, b)) {
                return Some(hit.clone());
            }
        }
        let result = bfs(&a, |p| self.neighbours(*p), |p| *p == b).map(|mut full| {
            full.remove(0);
            full
        });
        if let Some(path) = &result {
            if let Ok(mut cache) = self.path_cache.lock() {
                cache.put((a, b), path.clone());
            }
        }
        result
    }

    /// Distance between `a` and `b`. `canFly` couriers use Manhattan distance
    /// (ignoring walls); ground movers use 4-connected BFS over non-wall cells.
    /// Returns `None` if unreachable (ground movers only; flyers are always
    /// "reachable").
    pub fn distance(&self, a: Pos, b: Pos, can_fly: bool) -> Option<i32> {
        if a == b {
            return Some(0);
        }
        if can_fly {
            return Some((a.x - b.x).abs() + (a.y - b.y).abs());
        }
        self.bfs_path(a, b).map(|p| p.len() as i32)
    }

    /// The cells to traverse from `a` to `b`, excluding `a` and including `b`.
    /// Empty when `a == b` or unreachable. Flyers step the x-axis toward `b`
    /// before the y-axis; ground movers reconstruct the BFS tree.
    pub fn find_path(&self, a: Pos, b: Pos, can_fly: bool) -> Vec<Pos> {
        if a == b {
            return Vec::new();
        }
        if can_fly {
            let mut path = Vec::new();
            let mut cur = a;
            while cur != b {
                if cur.x != b.x {
                    cur.x += (b.x - cur.x).signum();
                } else if cur.y != b.y {
                    cur.y += (b.y - cur.y).signum();
                }
                path.push(cur);
            }
            return path;
        }
        self.bfs_path(a, b).unwrap_or_default()
    }

    /// BFS reachability check over non-wall cells from `start`, visiting
    /// targets in the fixed neighbour order. Used by map validation.
    pub fn all_reachable(&self, start: Pos, targets: &[Pos]) -> bool {
        let mut remaining: std::collections::HashSet<Pos> = targets.iter().copied().collect();
        remaining.remove(&start);
        if remaining.is_empty() {
            return true;
        }
        let mut visited = std::collections::HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);
        while let Some(p) = queue.pop_front() {
            for n in self.neighbours(p) {
                if visited.insert(n) {
                    remaining.remove(&n);
                    queue.push_back(n);
                }
            }
        }
        remaining.is_empty()
    }

    pub fn render_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.to_char()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_grid(n: i32) -> Grid {
        Grid::new(n, n)
    }

    #[test]
    fn flying_shortest_path() {
        let grid = empty_grid(5);
        let a = Pos::new(0, 0);
        let b = Pos::new(2, 2);
        let path = grid.find_path(a, b, true);
        assert_eq!(path.len(), 4);
        assert_eq!(*path.last().unwrap(), b);
        assert_eq!(grid.distance(a, b, true), Some(4));
    }

    #[test]
    fn wall_blockade_is_unreachable() {
        let mut grid = empty_grid(5);
        for p in [
            Pos::new(1, 0),
            Pos::new(0, 1),
            Pos::new(1, 1),
        ] {
            grid.set(p, Cell::Wall);
        }
        let a = Pos::new(0, 0);
        let b = Pos::new(2, 2);
        assert!(grid.find_path(a, b, false).is_empty());
        assert_eq!(grid.distance(a, b, false), None);
    }

    #[test]
    fn ground_path_steps_are_unit_and_non_wall() {
        let grid = empty_grid(6);
        let a = Pos::new(0, 0);
        let b = Pos::new(3, 4);
        let path = grid.find_path(a, b, false);
        assert_eq!(*path.last().unwrap(), b);
        let mut prev = a;
        for p in &path {
            let manhattan = (p.x - prev.x).abs() + (p.y - prev.y).abs();
            assert_eq!(manhattan, 1);
            assert!(!grid.is_wall(*p));
            prev = *p;
        }
    }

    #[test]
    fn distance_and_path_agree_on_reachability() {
        let mut grid = empty_grid(5);
        grid.set(Pos::new(1, 0), Cell::Wall);
        grid.set(Pos::new(0, 1), Cell::Wall);
        let a = Pos::new(0, 0);
        let b = Pos::new(1, 1);
        assert_eq!(grid.distance(a, b, false), None);
        assert!(grid.find_path(a, b, false).is_empty());
    }
}

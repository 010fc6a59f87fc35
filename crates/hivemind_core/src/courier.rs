//! Courier model: a tagged three-way variant rather than open inheritance
//! (spec.md §9) — the original `Actor`/`Drone`/`Robot`/`Scooter` hierarchy
//! collapses to one `CourierKind` enum and a per-kind constant table, since
//! there is no extensibility requirement beyond three kinds.

use bevy_ecs::prelude::Component;

use crate::grid::Pos;
use crate::package::PackageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourierKind {
    Drone,
    Robot,
    Scooter,
}

/// Fixed per-kind parameters (spec.md §3's authoritative table).
pub struct KindParams {
    pub speed: i32,
    pub max_battery: i32,
    pub consumption: i32,
    pub cost: i32,
    pub capacity: usize,
    pub can_fly: bool,
}

impl CourierKind {
    pub const fn params(self) -> KindParams {
        match self {
            CourierKind::Drone => KindParams {
                speed: 3,
                max_battery: 100,
                consumption: 10,
                cost: 15,
                capacity: 1,
                can_fly: true,
            },
            CourierKind::Robot => KindParams {
                speed: 1,
                max_battery: 300,
                consumption: 2,
                cost: 1,
                capacity: 4,
                can_fly: false,
            },
            CourierKind::Scooter => KindParams {
                speed: 2,
                max_battery: 200,
                consumption: 5,
                cost: 4,
                capacity: 2,
                can_fly: false,
            },
        }
    }
}

pub type CourierId = u32;

/// A mobile agent. Invariants: `0 <= battery <= max_battery`,
/// `carried.len() <= capacity`, and a dead courier has `speed == 0 &&
/// battery == 0`. Created at the base; mutated only by the dispatcher.
#[derive(Debug, Clone, Component)]
pub struct Courier {
    pub id: CourierId,
    pub kind: CourierKind,
    pub pos: Pos,
    pub speed: i32,
    pub max_battery: i32,
    pub battery: i32,
    pub consumption: i32,
    pub cost: i32,
    pub capacity: usize,
    pub can_fly: bool,
    pub dead: bool,
    carried: Vec<PackageId>,
}

impl Courier {
    pub fn spawn(id: CourierId, kind: CourierKind, pos: Pos) -> Self {
        let p = kind.params();
        Self {
            id,
            kind,
            pos,
            speed: p.speed,
            max_battery: p.max_battery,
            battery: p.max_battery,
            consumption: p.consumption,
            cost: p.cost,
            capacity: p.capacity,
            can_fly: p.can_fly,
            dead: false,
            carried: Vec::new(),
        }
    }

    pub fn has_free_capacity(&self) -> bool {
        self.carried.len() < self.capacity
    }

    pub fn free_capacity(&self) -> usize {
        self.capacity - self.carried.len()
    }

    pub fn packages(&self) -> &[PackageId] {
        &self.carried
    }

    /// Appends `p` if there is free capacity. Returns whether it was taken.
    pub fn assign_package(&mut self, p: PackageId) -> bool {
        if self.has_free_capacity() {
            self.carried.push(p);
            true
        } else {
            false
        }
    }

    /// Removes the first occurrence of `p` by identity, if present.
    pub fn remove_package(&mut self, p: PackageId) {
        if let Some(idx) = self.carried.iter().position(|&x| x == p) {
            self.carried.remove(idx);
        }
    }

    pub fn is_carrying(&self) -> bool {
        !self.carried.is_empty()
    }

    /// Moves to `new_pos` and debits one `consumption` of battery, clamped
    /// to zero. The caller is responsible for `new_pos` being reachable
    /// within `speed` moves of the previous position.
    pub fn apply_move(&mut self, new_pos: Pos) {
        self.pos = new_pos;
        self.battery = (self.battery - self.consumption).max(0);
    }

    pub fn recharge(&mut self, amount: i32) {
        self.battery = (self.battery + amount).min(self.max_battery);
    }

    /// Idempotent: sets dead, speed and battery to zero.
    pub fn kill(&mut self) {
        self.dead = true;
        self.speed = 0;
        self.battery = 0;
    }

    pub fn is_active(&self, base: Pos) -> bool {
        !self.dead && (self.is_carrying() || self.pos != base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_params_match_spec_table() {
        assert_eq!(CourierKind::Drone.params().speed, 3);
        assert_eq!(CourierKind::Drone.params().max_battery, 100);
        assert_eq!(CourierKind::Drone.params().capacity, 1);
        assert!(CourierKind::Drone.params().can_fly);

        assert_eq!(CourierKind::Robot.params().speed, 1);
        assert_eq!(CourierKind::Robot.params().max_battery, 300);
        assert_eq!(CourierKind::Robot.params().capacity, 4);
        assert!(!CourierKind::Robot.params().can_fly);

        assert_eq!(CourierKind::Scooter.params().speed, 2);
        assert_eq!(CourierKind::Scooter.params().max_battery, 200);
        assert_eq!(CourierKind::Scooter.params().capacity, 2);
        assert!(!CourierKind::Scooter.params().can_fly);
    }

    #[test]
    fn assign_package_respects_capacity() {
        let mut c = Courier::spawn(0, CourierKind::Drone, Pos::new(0, 0));
        assert!(c.assign_package(7));
        assert!(!c.assign_package(8));
        assert_eq!(c.packages(), &[7]);
    }

    #[test]
    fn kill_zeroes_speed_and_battery_and_is_idempotent() {
        let mut c = Courier::spawn(0, CourierKind::Scooter, Pos::new(0, 0));
        c.kill();
        assert!(c.dead);
        assert_eq!(c.speed, 0);
        assert_eq!(c.battery, 0);
        c.kill();
        assert!(c.dead);
    }

    #[test]
    fn apply_move_debits_consumption_clamped_to_zero() {
        let mut c = Courier::spawn(0, CourierKind::Drone, Pos::new(0, 0));
        c.battery = 5;
        c.apply_move(Pos::new(1, 0));
        assert_eq!(c.battery, 0);
    }

    #[test]
    fn recharge_clamps_to_max_battery() {
        let mut c = Courier::spawn(0, CourierKind::Robot, Pos::new(0, 0));
        c.battery = 290;
        c.recharge(50);
        assert_eq!(c.battery, 300);
    }
}

//! Small shared-state resources that don't warrant their own module.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::grid::Pos;
use crate::package::{Package, PackageId};

/// The base depot cell; unique and fixed for the lifetime of a run.
#[derive(Debug, Clone, Copy, Resource)]
pub struct Base(pub Pos);

/// All spawned packages, owned by the engine. Indices double as
/// `PackageId`s; packages are never removed, only transitioned.
#[derive(Debug, Clone, Default, Resource)]
pub struct Packages(pub Vec<Package>);

impl Packages {
    pub fn push(&mut self, dest: Pos, reward: i64, deadline: u64, spawned_at: u64) -> PackageId {
        let id = self.0.len();
        self.0.push(Package::new(id, dest.x, dest.y, reward, deadline, spawned_at));
        id
    }
}

/// The ordered subset of spawned-but-not-yet-assigned packages.
#[derive(Debug, Clone, Default, Resource)]
pub struct WaitingPool(pub Vec<PackageId>);

/// The client cells a package spawn picks its destination from.
#[derive(Debug, Clone, Default, Resource)]
pub struct Clients(pub Vec<Pos>);

/// The single RNG stream every random decision in the engine draws from
/// (spec.md §9: "RNG discipline").
#[derive(Resource)]
pub struct Rng(pub StdRng);

impl Rng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Whether the run has concluded and why. Checked by the engine's outer
/// loop after every tick.
#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct SimStatus {
    pub forced_terminate: bool,
}

/// Hands out stable courier identities as new couriers are spawned.
#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct NextCourierId(pub crate::courier::CourierId);

impl NextCourierId {
    pub fn next(&mut self) -> crate::courier::CourierId {
        let id = self.0;
        self.0 += 1;
        id
    }
}

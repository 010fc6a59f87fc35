//! Terminal rendering (spec.md §6, §11) — plain ANSI escapes, grounded
//! directly in the original C++ `Simulation::render`; the teacher has no
//! in-`sim_core` TUI to generalize from (its richer rendering lives in the
//! separate `sim_ui` crate, out of scope here).

use std::io::Write;

use bevy_ecs::prelude::World;

use crate::accounting::Accounting;
use crate::clock::Clock;
use crate::config::Config;
use crate::courier::{Courier, CourierKind};
use crate::grid::{Cell, Grid};
use crate::resources::{Base, Packages, WaitingPool};

const RESET: &str = "\x1B[0m";
const GREEN: &str = "\x1B[32m";
const BRIGHT_GREEN: &str = "\x1B[92m";
const CYAN: &str = "\x1B[36m";
const YELLOW: &str = "\x1B[33m";
const MAGENTA: &str = "\x1B[35m";
const BLUE: &str = "\x1B[34m";

/// Clears the screen and renders one frame plus a stats line. Takes `&mut
/// World` only because an ad hoc `Courier` query needs to initialize its
/// state against it; no mutation occurs.
pub fn render(world: &mut World, out: &mut impl Write) -> std::io::Result<()> {
    write!(out, "\x1B[2J\x1B[H")?;

    let couriers: Vec<Courier> = {
        let mut query = world.query::<&Courier>();
        query.iter(world).cloned().collect()
    };

    let grid = world.resource::<Grid>();
    let rows = grid.render_rows();

    let mut overlay = vec![vec![None; grid.cols as usize]; grid.rows as usize];
    for courier in couriers.iter().filter(|c| !c.dead) {
        overlay[courier.pos.x as usize][courier.pos.y as usize] = Some(courier.kind);
    }

    for (x, row) in rows.iter().enumerate() {
        for (y, ch) in row.chars().enumerate() {
            if let Some(kind) = overlay[x][y] {
                let (glyph, colour) = match kind {
                    CourierKind::Drone => ('^', BLUE),
                    CourierKind::Robot => ('R', BRIGHT_GREEN),
                    CourierKind::Scooter => ('s', MAGENTA),
                };
                write!(out, "{colour}{glyph}{RESET}")?;
                continue;
            }
            match Cell::from_char(ch) {
                Cell::Client => write!(out, "{GREEN}D{RESET}")?,
                Cell::Base => write!(out, "{CYAN}B{RESET}")?,
                Cell::Station => write!(out, "{YELLOW}S{RESET}")?,
                _ => write!(out, "{ch}")?,
            }
        }
        writeln!(out)?;
    }

    let clock = world.resource::<Clock>();
    let config = world.resource::<Config>();
    let accounting = world.resource::<Accounting>();
    let waiting = world.resource::<WaitingPool>();
    let packages = world.resource::<Packages>();
    let base = world.resource::<Base>();

    let delivered = packages.0.iter().filter(|p| p.is_delivered()).count();
    let active = couriers.iter().filter(|c| c.is_active(base.0)).count();
    let carrying = couriers.iter().filter(|c| !c.dead && c.is_carrying()).count();
    let total_spawned = couriers.len();

    let profit_est: i64 = packages
        .0
        .iter()
        .filter(|p| p.is_delivered())
        .map(|p| p.reward)
        .sum::<i64>()
        - accounting.operating_cost_total
        - 500 * accounting.dead_agents as i64;

    writeln!(
        out,
        "Tick: {}/{}   Delivered: {}   Waiting: {}   Active: {} (carrying={})   Profit (est): {}   Total agents spawned: {}",
        clock.tick,
        config.max_ticks,
        delivered,
        waiting.0.len(),
        active,
        carrying,
        profit_est,
        total_spawned,
    )
}

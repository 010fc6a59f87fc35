//! CLI entry point, grounded in the teacher's `xtask/src/main.rs` clap
//! derive setup.

use std::io;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;
use hivemind_core::accounting::Report;
use hivemind_core::config::Config;
use hivemind_core::render::render;
use hivemind_core::{Engine, StopReason};

#[derive(Parser, Debug)]
#[command(name = "hivemind", about = "Grid-based last-mile delivery fleet simulation")]
struct Cli {
    /// Path to a config file (`KEY: value` lines). Defaults are used for
    /// any key it omits.
    #[arg(long)]
    config: Option<String>,

    /// Render each tick to the terminal instead of running silently.
    #[arg(long)]
    render: bool,

    /// Seed the RNG for a reproducible run (omit for entropy seeding).
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the final report.
    #[arg(long, default_value = "simulation.txt")]
    report: String,

    /// Write per-run metrics as JSON alongside the report.
    #[arg(long)]
    metrics_json: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let display_delay = Duration::from_millis(config.display_delay_ms);

    let mut engine = match Engine::new(config, cli.seed) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stop_reason = if cli.render {
        run_with_render(&mut engine, display_delay)
    } else {
        engine.run()
    };

    match stop_reason {
        StopReason::MaxTicks => eprintln!("stopped: reached max ticks"),
        StopReason::AllDelivered => eprintln!("stopped: all packages delivered"),
        StopReason::ForcedConcede => eprintln!("stopped: forced assignment conceded"),
    }

    let report = engine.report();
    if let Err(e) = report.write(&cli.report) {
        eprintln!("error writing report: {e}");
        return ExitCode::FAILURE;
    }

    if let Some(path) = &cli.metrics_json {
        if let Err(e) = write_metrics_json(path, &report) {
            eprintln!("error writing metrics json: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

fn run_with_render(engine: &mut Engine, delay: Duration) -> StopReason {
    loop {
        engine.step();
        let mut stdout = io::stdout();
        let _ = render(engine.world_mut(), &mut stdout);
        if !delay.is_zero() {
            thread::sleep(delay);
        }

        if engine.tick() >= engine.max_ticks() {
            return StopReason::MaxTicks;
        }
        if engine.forced_terminate() {
            return StopReason::ForcedConcede;
        }
        let accounting = engine.accounting();
        if accounting.spawned_packages > 0
            && accounting.spawned_packages >= engine.total_packages()
            && engine.packages().iter().all(|p| p.is_delivered())
        {
            return StopReason::AllDelivered;
        }
    }
}

fn write_metrics_json(path: &str, report: &Report) -> std::io::Result<()> {
    let json = serde_json::json!({
        "delivered": report.delivered,
        "delayed": report.delayed,
        "lost": report.lost,
        "operating_cost": report.operating_cost,
        "dead_agents": report.dead_agents,
        "profit": report.profit,
    });
    std::fs::write(path, serde_json::to_string_pretty(&json).unwrap())
}

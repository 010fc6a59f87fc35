use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the hivemind simulation workspace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation with default config
    Run {
        /// Path to a config file
        #[arg(long)]
        config: Option<String>,
        /// Render each tick to the terminal
        #[arg(long)]
        render: bool,
    },
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Run benchmarks
    Bench,
    /// Run check + bench
    All,
}

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test hivemind_core");
    run_cargo(&["test", "-p", "hivemind_core"]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&[
        "bench",
        "--package",
        "hivemind_core",
        "--bench",
        "performance",
    ]);
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, render } => {
            let mut args = vec!["run", "-p", "hivemind_core", "--bin", "hivemind", "--release", "--"];
            if let Some(path) = &config {
                args.push("--config");
                args.push(path);
            }
            if render {
                args.push("--render");
            }
            run_cargo(&args);
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}

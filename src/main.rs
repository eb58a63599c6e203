//! Headless match-3 runner (default binary).
//!
//! Builds a session from the command line, prints the initial board, plays a
//! number of random moves with no animation in between, and reports how long it
//! took. `--json` prints one machine-readable report instead.

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use match3::core::GridSnapshot;
use match3::engine::{EngineConfig, MatchEngine, Simulation, SimulationReport};
use match3::types::{MAX_RECOMMENDED_COLORS, MAX_RECOMMENDED_SIDE};

#[derive(Debug, Parser)]
#[command(name = "match3", version, about = "Headless match-3 grid simulation")]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 8)]
    width: u16,

    /// Grid height in cells
    #[arg(long, default_value_t = 8)]
    height: u16,

    /// Number of tile colors
    #[arg(long, default_value_t = 5)]
    colors: u8,

    /// RNG seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Random moves to simulate
    #[arg(long, default_value_t = 1000)]
    moves: u64,

    /// Print a single JSON report instead of progress lines
    #[arg(long)]
    json: bool,

    /// Suppress progress lines
    #[arg(long)]
    quiet: bool,

    /// Accept sizes above the recommended limits
    #[arg(long)]
    allow_oversize: bool,
}

#[derive(Debug, Serialize)]
struct RunReport {
    config: EngineConfig,
    seed: u32,
    initial: GridSnapshot,
    simulation: SimulationReport,
    r#final: GridSnapshot,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("[Engine] error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = EngineConfig {
        width: args.width,
        height: args.height,
        num_colors: args.colors,
        seed: args.seed,
    };

    if !config.within_recommended() && !args.allow_oversize {
        bail!(
            "grid sides must be at most {MAX_RECOMMENDED_SIDE} and colors at most \
             {MAX_RECOMMENDED_COLORS} (pass --allow-oversize to override)"
        );
    }

    let mut engine = MatchEngine::new(config).context("failed to initialize engine")?;
    let initial = engine.snapshot();
    let verbose = !args.quiet && !args.json;

    if verbose {
        println!(
            "[Engine] {}x{} grid, {} colors, seed {}",
            config.width,
            config.height,
            config.num_colors,
            engine.seed()
        );
        print!("{}", engine.grid());
    }

    // Move selection gets its own stream so the board stream stays comparable.
    let mut simulation = Simulation::new(engine.seed().wrapping_add(1));
    let report = simulation
        .run(&mut engine, args.moves)
        .context("simulation aborted")?;

    if args.json {
        let out = RunReport {
            config,
            seed: engine.seed(),
            initial,
            simulation: report,
            r#final: engine.snapshot(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if verbose {
        println!(
            "[Simulation] {} moves: {} accepted, {} rejected",
            report.moves, report.accepted, report.rejected
        );
        println!(
            "[Simulation] {} cells cleared over {} resolve steps (longest cascade {})",
            report.cells_cleared, report.resolve_steps, report.longest_cascade
        );
        if report.relaxed_fills > 0 {
            println!("[Simulation] {} relaxed color picks", report.relaxed_fills);
        }
        match report.moves_per_second() {
            Some(rate) => println!("[Simulation] Time {} ms ({rate:.0} moves/s)", report.elapsed_ms),
            None => println!("[Simulation] Time {} ms", report.elapsed_ms),
        }
        print!("{}", engine.grid());
        println!("[Simulation] board hash {:016x}", report.board_hash);
    }

    Ok(())
}

//! aco-dba — eight-endpoint PON run with pheromone-driven window planning.
//!
//! Four heavy endpoints (mean message length 0.12) share the line with four
//! light ones (0.04).  Every round the optimizer turns each endpoint's demand
//! into a fresh window assignment drawn from the path menu
//! `1e-3, 0.201, …, 1.801`.
//!
//! ```text
//! cargo run -p aco-dba --release -- [config.json] [--fixed]
//! ```
//!
//! `config.json` holds a `SimConfig`; missing fields take their defaults.
//! `--fixed` keeps the initial windows for the whole run.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pon_core::{OnuConfig, SimConfig};
use pon_dba::{AcoConfig, FixedPlan, PheromoneOptimizer, WindowPlanner, arange_paths};
use pon_output::{CsvWriter, RunOutputObserver};
use pon_sim::{Olt, OltBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const HEAVY_ONUS:          usize = 4;
const LIGHT_ONUS:          usize = 4;
const ONU_COUNT:           usize = HEAVY_ONUS + LIGHT_ONUS;
const MEAN_ARRIVAL_PERIOD: f64   = 30.0;
const HEAVY_LENGTH:        f64   = 0.12;
const LIGHT_LENGTH:        f64   = 0.04;
const QUEUE_CAPACITY:      usize = 512;
const OUTPUT_ROOT:         &str  = "output/aco-dba";

// ── Run setup ─────────────────────────────────────────────────────────────────

struct Args {
    config: Option<PathBuf>,
    fixed:  bool,
}

fn parse_args() -> Args {
    let mut args = Args { config: None, fixed: false };
    for arg in std::env::args().skip(1) {
        if arg == "--fixed" {
            args.fixed = true;
        } else {
            args.config = Some(PathBuf::from(arg));
        }
    }
    args
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config = serde_json::from_reader(file)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// First `run_<n>` directory under `root` that does not exist yet.
fn next_run_dir(root: &Path) -> Result<PathBuf> {
    fs::create_dir_all(root)?;
    let mut n = 0u32;
    loop {
        let dir = root.join(format!("run_{n}"));
        if !dir.exists() {
            fs::create_dir(&dir)?;
            return Ok(dir);
        }
        n += 1;
    }
}

fn build<P: WindowPlanner>(config: SimConfig, planner: P, windows: Vec<f64>) -> Result<Olt<P>> {
    let olt = OltBuilder::new(config, planner, windows)
        .repeat(OnuConfig::new(MEAN_ARRIVAL_PERIOD, HEAVY_LENGTH, QUEUE_CAPACITY), HEAVY_ONUS)
        .repeat(OnuConfig::new(MEAN_ARRIVAL_PERIOD, LIGHT_LENGTH, QUEUE_CAPACITY), LIGHT_ONUS)
        .build()?;
    Ok(olt)
}

// ── Run and report ────────────────────────────────────────────────────────────

fn run<P: WindowPlanner>(mut olt: Olt<P>, out_dir: &Path) -> Result<()> {
    let mut obs = RunOutputObserver::new(CsvWriter::new(out_dir)?);

    let t0 = Instant::now();
    olt.run_to_end(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        warn!(error = %e, "output error");
    }

    let snapshot = olt.metrics_snapshot();
    let metrics_path = out_dir.join("metrics.json");
    serde_json::to_writer_pretty(BufWriter::new(File::create(&metrics_path)?), &snapshot)?;

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  rounds              : {}", obs.rounds_written());
    println!("  clock / laps        : {:.3} / {}", olt.clock().now(), olt.clock().laps());
    println!("  fitness             : {:.6e}", olt.fitness());
    println!("  output              : {}", out_dir.display());
    println!();

    println!(
        "{:<6} {:>8} {:>8} {:>8} {:>8} {:>10} {:>10} {:>10}",
        "ONU", "MeanLen", "Load", "Queue", "Window", "Sent", "Blocked", "P(block)"
    );
    println!("{}", "-".repeat(75));
    for onu in olt.onus() {
        let c = onu.counters();
        let arrivals = onu.arrivals();
        println!(
            "{:<6} {:>8.3} {:>8.4} {:>8} {:>8.3} {:>10} {:>10} {:>10.4}",
            onu.id().0,
            arrivals.mean_message_length(),
            arrivals.mean_message_length() / arrivals.mean_arrival_period(),
            onu.queue_len(),
            olt.windows()[onu.id().index()],
            c.sent_total,
            c.blocked_total,
            c.blocking_ratio(),
        );
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args();
    let config = load_config(args.config.as_deref())?;
    config.validate()?;

    let paths = arange_paths(1e-3, 2.0, 0.2);
    let windows = paths[..ONU_COUNT].to_vec();

    println!("=== aco-dba — dynamic bandwidth allocation ===");
    println!(
        "ONUs: {ONU_COUNT}  |  Rounds: {}  |  Frames/round: {}  |  Seed: {}  |  Mode: {}",
        config.rounds,
        config.frames_per_round,
        config.seed,
        if args.fixed { "fixed" } else { "optimized" },
    );
    println!();

    let out_dir = next_run_dir(Path::new(OUTPUT_ROOT))?;
    info!(dir = %out_dir.display(), paths = paths.len(), "starting run");

    if args.fixed {
        run(build(config, FixedPlan, windows)?, &out_dir)
    } else {
        let optimizer = PheromoneOptimizer::new(AcoConfig::new(paths, ONU_COUNT))?;
        run(build(config, optimizer, windows)?, &out_dir)
    }
}

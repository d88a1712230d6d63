use orbsim::simulation::diagnostics;
use orbsim::{Scenario, ScenarioConfig};
use orbsim::{bench_gravity, bench_rk4};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Headless driver: plays a scenario frame by frame and prints positions
#[derive(Parser, Debug)]
struct Args {
    /// Scenario YAML, either a path or a file name under `scenarios/`
    #[arg(short, long, default_value = "two_body.yaml")]
    file_name: String,

    /// Frames to play after the seed frame, defaults to t_end / h0
    #[arg(short = 'n', long)]
    frames: Option<usize>,

    /// Print every k-th frame
    #[arg(long, default_value_t = 1)]
    every: usize,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = scenario_path(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let scenario_cfg = ScenarioConfig::from_reader(BufReader::new(file))?;
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.bench {
        bench_gravity();
        bench_rk4();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(&scenario_cfg)?;
    let frames = args.frames.unwrap_or_else(|| scenario.parameters().frame_count());
    let every = args.every.max(1);

    info!(
        name = scenario_cfg.name.as_deref().unwrap_or(&args.file_name),
        bodies = scenario.body_count(),
        h = scenario.step_size(),
        frames,
        "starting scenario"
    );

    scenario.reset()?;

    // Energy and momentum of the seed state, for the drift summary
    let (e0, p0) = match scenario.state() {
        Some((_, s)) => (
            diagnostics::total_energy(scenario.gravity(), s),
            diagnostics::total_momentum(scenario.masses(), &s.vel),
        ),
        None => anyhow::bail!("scenario not ready after reset"),
    };

    for i in 0..=frames {
        let frame = scenario.advance()?;
        if i % every == 0 || i == frames {
            let coords: Vec<String> = frame
                .positions
                .iter()
                .map(|p| format!("{:.6} {:.6} {:.6}", p.x, p.y, p.z))
                .collect();
            println!("{:.6} {}", frame.time, coords.join(" "));
        }
    }

    if let Some((t, s)) = scenario.state() {
        let e1 = diagnostics::total_energy(scenario.gravity(), s);
        let p1 = diagnostics::total_momentum(scenario.masses(), &s.vel);
        info!(
            t,
            min_separation = ?scenario.min_separation(),
            energy_drift = (e1 - e0) / e0.abs().max(f64::MIN_POSITIVE),
            momentum_drift = (p1 - p0).norm(),
            "done"
        );
    }

    Ok(())
}

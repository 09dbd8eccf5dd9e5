use orbswarm::{ScenarioConfig, Scenario, ScenarioOutcome};
use orbswarm::{bench_gravity, bench_steering};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Headless gravity sandbox and swarm runner")]
struct Args {
    /// Scenario file; bare names are looked up in `scenarios/`
    #[arg(short, default_value = "earth_moon.yaml")]
    file_name: String,

    /// Override the tick count from the scenario
    #[arg(long)]
    ticks: Option<u64>,

    /// Time both kernels instead of running a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig =
        serde_yaml::from_reader(reader).with_context(|| format!("parsing {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn report(outcome: &ScenarioOutcome) {
    if let Some(g) = &outcome.gravity {
        info!(
            t = g.t,
            launched = g.launched,
            deflected = g.deflected,
            earth_impacts = g.earth_impacts.len(),
            other_collisions = g.other_collisions,
            culled = g.culled,
            in_flight = g.remaining_asteroids,
            "gravity summary"
        );
    }
    if let Some(s) = &outcome.swarm {
        info!(
            ticks = s.ticks,
            signaled = s.signaled,
            damage = s.damage_dealt,
            depleted = s.resources_depleted,
            killed = s.killed,
            agents_left = s.remaining_agents,
            resources_left = s.remaining_resources,
            "swarm summary"
        );
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    if args.bench {
        bench_gravity();
        bench_steering();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("building scenario")?;
    let outcome = scenario.run(args.ticks).context("running scenario")?;
    report(&outcome);

    Ok(())
}

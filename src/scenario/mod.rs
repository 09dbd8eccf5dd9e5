//! Build fully-initialized scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - run settings (`RunConfig`)
//! - an optional gravity sandbox (`GravityScenario`)
//! - an optional swarm (`SwarmScenario`)
//!
//! Both halves are independent and run side by side for the same ticks.

pub mod gravity_run;
pub mod swarm_run;

use tracing::info;

use crate::configuration::config::{RunConfig, ScenarioConfig};
use crate::error::SimError;

pub use gravity_run::{GravityOutcome, GravityScenario};
pub use swarm_run::{params_from_config, spawn_agents, SwarmOutcome, SwarmScenario};

pub struct Scenario {
    pub run: RunConfig,
    pub gravity: Option<GravityScenario>,
    pub swarm: Option<SwarmScenario>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioOutcome {
    pub gravity: Option<GravityOutcome>,
    pub swarm: Option<SwarmOutcome>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        let gravity = cfg.gravity.map(GravityScenario::build_scenario).transpose()?;
        let swarm = cfg
            .swarm
            .map(|s| SwarmScenario::build_scenario(s, cfg.run.tick_ms))
            .transpose()?;
        if gravity.is_none() && swarm.is_none() {
            return Err(SimError::InvalidConfiguration("scenario has neither a gravity nor a swarm section".into()));
        }
        Ok(Self { run: cfg.run, gravity, swarm })
    }

    /// Run both halves for `ticks` (or the configured count)
    pub fn run(&mut self, ticks: Option<u64>) -> Result<ScenarioOutcome, SimError> {
        let ticks = ticks.unwrap_or(self.run.ticks);
        info!(ticks, "running scenario");

        for tick in 0..ticks {
            if let Some(g) = self.gravity.as_mut() {
                g.step(tick)?;
            }
            if let Some(s) = self.swarm.as_mut() {
                s.step(tick);
            }
        }

        Ok(ScenarioOutcome {
            gravity: self.gravity.as_ref().map(GravityScenario::outcome),
            swarm: self.swarm.as_ref().map(SwarmScenario::outcome),
        })
    }
}

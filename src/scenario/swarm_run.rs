//! Headless driver for the swarm
//!
//! Each tick: scheduled signals, one steering step, resource damage,
//! removal of depleted resources, then scheduled stomps. Tick `n` runs
//! at `n * tick_ms` milliseconds.

use std::f64::consts::PI;

use tracing::{debug, info, warn};

use crate::configuration::config::{AgentSpawnConfig, SignalConfig, SteeringParamsConfig, StompConfig, SwarmConfig};
use crate::error::SimError;
use crate::geometry::{NVec2, Rect};
use crate::steering::{
    advance_resource, advance_steering, contacting_agents, stomp, Agent, AgentSpawner, KillEvent, Resource,
    SteeringParams, WorldBounds,
};

/// Golden angle, spreads spawn points evenly without randomness
const GOLDEN_ANGLE: f64 = PI * 0.763_932_022_500_210_3;

/// Running totals for a swarm run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwarmOutcome {
    pub ticks: u64,
    pub signaled: usize,
    pub damage_dealt: u32,
    pub resources_depleted: usize,
    pub killed: usize,
    pub remaining_agents: usize,
    pub remaining_resources: usize,
}

pub struct SwarmScenario {
    pub params: SteeringParams,
    pub goal: NVec2,
    pub agents: Vec<Agent>,
    pub resources: Vec<Resource>,
    pub blocks: Vec<Rect>,
    pub spawner: AgentSpawner,
    pub tick_ms: u64,
    signals: Vec<SignalConfig>,
    stomps: Vec<StompConfig>,
    last_kills: Vec<KillEvent>,
    outcome: SwarmOutcome,
}

/// Overlay configured values on the engine defaults, then validate
pub fn params_from_config(c: &SteeringParamsConfig) -> Result<SteeringParams, SimError> {
    let d = SteeringParams::default();
    let world = c.world.map(|[w, h]| NVec2::new(w, h)).unwrap_or(d.bounds.max);
    SteeringParams {
        max_speed: c.max_speed.unwrap_or(d.max_speed),
        max_force: c.max_force.unwrap_or(d.max_force),
        neighbor_radius: c.neighbor_radius.unwrap_or(d.neighbor_radius),
        separation_radius: c.separation_radius.unwrap_or(d.separation_radius),
        object_separation_radius: c.object_separation_radius.unwrap_or(d.object_separation_radius),
        attraction_radius: c.attraction_radius.unwrap_or(d.attraction_radius),
        broadcast_radius: c.broadcast_radius.unwrap_or(d.broadcast_radius),
        object_push_force: c.object_push_force.unwrap_or(d.object_push_force),
        push_trigger_distance: c.push_trigger_distance.unwrap_or(d.push_trigger_distance),
        goal_radius: c.goal_radius.unwrap_or(d.goal_radius),
        park_grace_ms: c.park_grace_ms.unwrap_or(d.park_grace_ms),
        signal_duration_ms: c.signal_duration_ms.or(d.signal_duration_ms),
        agent_radius: c.agent_radius.unwrap_or(d.agent_radius),
        bounds: WorldBounds::new(world.x, world.y, c.margin.unwrap_or(d.bounds.margin)),
        alignment_weight: c.alignment_weight.unwrap_or(d.alignment_weight),
        cohesion_weight: c.cohesion_weight.unwrap_or(d.cohesion_weight),
        separation_weight: c.separation_weight.unwrap_or(d.separation_weight),
        seek_weight: c.seek_weight.unwrap_or(d.seek_weight),
        attraction_weight: c.attraction_weight.unwrap_or(d.attraction_weight),
        damage_interval_ms: c.damage_interval_ms.unwrap_or(d.damage_interval_ms),
    }
    .validate()
}

/// Sunflower layout: agent `i` of `count` at radius `spread * sqrt((i + 0.5) / count)`
pub fn spawn_agents(spawner: &mut AgentSpawner, cfg: &AgentSpawnConfig) -> Vec<Agent> {
    let center = NVec2::new(cfg.center[0], cfg.center[1]);
    (0..cfg.count)
        .map(|i| {
            let theta = i as f64 * GOLDEN_ANGLE;
            let rho = cfg.spread * ((i as f64 + 0.5) / cfg.count as f64).sqrt();
            let position = center + NVec2::new(theta.cos(), theta.sin()) * rho;
            let heading = theta + PI / 2.0;
            let velocity = NVec2::new(heading.cos(), heading.sin()) * cfg.speed;
            spawner.spawn(position, velocity)
        })
        .collect()
}

impl SwarmScenario {
    pub fn build_scenario(cfg: SwarmConfig, tick_ms: u64) -> Result<Self, SimError> {
        let params = params_from_config(&cfg.params)?;
        if tick_ms == 0 {
            return Err(SimError::InvalidConfiguration("tick_ms must be > 0".into()));
        }

        let mut spawner = AgentSpawner::new();
        let agents = spawn_agents(&mut spawner, &cfg.agents);
        let resources = cfg
            .resources
            .iter()
            .map(|rc| Resource::new(NVec2::new(rc.x[0], rc.x[1]), rc.radius, rc.health))
            .collect::<Result<Vec<_>, _>>()?;
        let blocks = cfg.blocks.iter().map(|&[x, y, w, h]| Rect::new(x, y, w, h)).collect();

        info!(agents = agents.len(), resources = resources.len(), "swarm spawned");

        Ok(Self {
            params,
            goal: NVec2::new(cfg.goal[0], cfg.goal[1]),
            agents,
            resources,
            blocks,
            spawner,
            tick_ms,
            signals: cfg.signals,
            stomps: cfg.stomps,
            last_kills: Vec::new(),
            outcome: SwarmOutcome::default(),
        })
    }

    pub fn outcome(&self) -> SwarmOutcome {
        SwarmOutcome {
            remaining_agents: self.agents.len(),
            remaining_resources: self.resources.len(),
            ..self.outcome.clone()
        }
    }

    /// Kill events from the most recent tick, for a renderer to flash
    pub fn last_kills(&self) -> &[KillEvent] {
        &self.last_kills
    }

    pub fn step(&mut self, tick: u64) {
        let now_ms = tick * self.tick_ms;
        self.last_kills.clear();

        for sc in self.signals.iter().filter(|s| s.tick == tick) {
            match self.agents.get_mut(sc.agent) {
                Some(agent) => {
                    agent.signal(NVec2::new(sc.goal[0], sc.goal[1]), now_ms);
                    info!(id = %agent.id, "agent signaled");
                    self.outcome.signaled += 1;
                }
                None => warn!(index = sc.agent, "signal targets a missing agent, skipping"),
            }
        }

        let report = advance_steering(&mut self.agents, &self.blocks, &mut self.resources, self.goal, now_ms, &self.params);
        self.outcome.signaled += report.newly_signaled.len();

        for resource in self.resources.iter_mut() {
            let touching = contacting_agents(resource, &self.agents, self.params.agent_radius);
            self.outcome.damage_dealt += advance_resource(resource, &touching, now_ms, self.params.damage_interval_ms);
        }
        let before = self.resources.len();
        self.resources.retain(|r| !r.is_depleted());
        let depleted = before - self.resources.len();
        if depleted > 0 {
            info!(depleted, remaining = self.resources.len(), "resource destroyed");
            self.outcome.resources_depleted += depleted;
        }

        for sc in self.stomps.iter().filter(|s| s.tick == tick) {
            let events = stomp(&mut self.agents, NVec2::new(sc.x[0], sc.x[1]), sc.radius);
            info!(killed = events.len(), "stomp");
            self.outcome.killed += events.len();
            self.last_kills.extend(events);
        }

        self.outcome.ticks = tick + 1;
        debug!(tick, agents = self.agents.len(), pushes = report.pushes, "swarm tick");
    }

    pub fn run(&mut self, ticks: u64) -> SwarmOutcome {
        for tick in 0..ticks {
            self.step(tick);
        }
        self.outcome()
    }
}

//! Configuration types for loading scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`RunConfig`]     – how many ticks to run and how long a tick lasts
//! - [`GravityConfig`] – the gravity sandbox: primaries, orbits, launches
//! - [`SwarmConfig`]   – the steering swarm: params, agents, resources, events
//! - [`ScenarioConfig`] – top-level wrapper; both sections are optional
//!
//! # YAML format
//!
//! ```yaml
//! run:
//!   ticks: 600
//!   tick_ms: 16
//!
//! gravity:
//!   G: 0.1
//!   dt: 1.0
//!   trail_limit: 400
//!   world: [800, 600]
//!   bodies:
//!     - name: earth
//!       x: [400, 300]
//!       v: [0, 0]
//!       m: 10000
//!       radius: 20
//!   orbits:
//!     - name: moon
//!       anchor: earth
//!       r: 120
//!       m: 100
//!       radius: 8
//!       clockwise: true
//!   launches:
//!     - tick: 5
//!       x: [400, 580]
//!       angle_deg: 90
//!       speed_kmh: 60000
//!   deflections:
//!     - tick: 40
//!
//! swarm:
//!   goal: [700, 300]
//!   params:
//!     max_speed: 3.0
//!     max_force: 0.05
//!   agents:
//!     count: 30
//!     center: [200, 300]
//!     spread: 60
//!   resources:
//!     - x: [300, 300]
//!       radius: 12
//!       health: 20
//!   blocks:
//!     - [450, 200, 40, 200]   # x, y, w, h
//!   signals:
//!     - tick: 100
//!       agent: 0
//!       goal: [400, 100]
//!   stomps:
//!     - tick: 300
//!       x: [250, 300]
//!       radius: 40
//! ```
//!
//! The scenario builder maps these into the runtime kernel types.

use serde::Deserialize;

/// Run length and the millisecond duration of one tick
#[derive(Deserialize, Debug, Clone)]
pub struct RunConfig {
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64, // converts ticks into the ms timestamps the swarm uses
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { ticks: default_ticks(), tick_ms: default_tick_ms() }
    }
}

fn default_ticks() -> u64 {
    600
}

fn default_tick_ms() -> u64 {
    16
}

/// Initial state of one fixed or free body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: Option<String>,
    pub x: [f64; 2], // position (px)
    #[serde(default)]
    pub v: [f64; 2], // velocity (px/tick)
    pub m: f64, // mass
    pub radius: f64, // collision / visual radius (px)
}

/// A body placed on a circular orbit around a named anchor
#[derive(Deserialize, Debug, Clone)]
pub struct OrbitConfig {
    pub name: Option<String>,
    pub anchor: String,
    pub r: f64,
    pub m: f64,
    pub radius: f64,
    #[serde(default = "default_true")]
    pub clockwise: bool,
}

fn default_true() -> bool {
    true
}

/// Asteroid fired from the launcher at a given tick
#[derive(Deserialize, Debug, Clone)]
pub struct LaunchConfig {
    pub tick: u64,
    pub name: Option<String>,
    pub x: [f64; 2],
    pub angle_deg: f64, // 90 = straight up the screen
    pub speed_kmh: Option<f64>, // missing -> fallback speed
    pub diameter_m: Option<f64>,
    pub density: Option<f64>,
}

/// Kinetic-impactor deflection of the most recently launched asteroid
#[derive(Deserialize, Debug, Clone)]
pub struct DeflectionConfig {
    pub tick: u64,
    pub impactor_mass: Option<f64>,
    pub impactor_speed: Option<f64>,
    pub beta: Option<f64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GravityConfig {
    #[serde(rename = "G", default = "default_g")]
    pub g: f64, // gravitational constant (game units)
    #[serde(default = "default_dt")]
    pub dt: f64,
    pub trail_limit: Option<usize>,
    #[serde(default = "default_world")]
    pub world: [f64; 2], // culling area (width, height)
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub orbits: Vec<OrbitConfig>,
    #[serde(default)]
    pub launches: Vec<LaunchConfig>,
    #[serde(default)]
    pub deflections: Vec<DeflectionConfig>,
}

fn default_g() -> f64 {
    0.1
}

fn default_dt() -> f64 {
    1.0
}

fn default_world() -> [f64; 2] {
    [800.0, 600.0]
}

/// Steering tuning; every field falls back to the engine default
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SteeringParamsConfig {
    pub max_speed: Option<f64>,
    pub max_force: Option<f64>,
    pub neighbor_radius: Option<f64>,
    pub separation_radius: Option<f64>,
    pub object_separation_radius: Option<f64>,
    pub attraction_radius: Option<f64>,
    pub broadcast_radius: Option<f64>,
    pub object_push_force: Option<f64>,
    pub push_trigger_distance: Option<f64>,
    pub goal_radius: Option<f64>,
    pub park_grace_ms: Option<u64>,
    pub signal_duration_ms: Option<u64>,
    pub agent_radius: Option<f64>,
    pub world: Option<[f64; 2]>,
    pub margin: Option<f64>,
    pub alignment_weight: Option<f64>,
    pub cohesion_weight: Option<f64>,
    pub separation_weight: Option<f64>,
    pub seek_weight: Option<f64>,
    pub attraction_weight: Option<f64>,
    pub damage_interval_ms: Option<u64>,
}

/// Agents placed deterministically around `center`
#[derive(Deserialize, Debug, Clone)]
pub struct AgentSpawnConfig {
    pub count: usize,
    pub center: [f64; 2],
    #[serde(default = "default_spread")]
    pub spread: f64,
    #[serde(default)]
    pub speed: f64, // initial speed, heading varies per agent
}

fn default_spread() -> f64 {
    50.0
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResourceConfig {
    pub x: [f64; 2],
    pub radius: f64,
    pub health: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SignalConfig {
    pub tick: u64,
    pub agent: usize, // index into the live agent list at that tick
    pub goal: [f64; 2],
}

#[derive(Deserialize, Debug, Clone)]
pub struct StompConfig {
    pub tick: u64,
    pub x: [f64; 2],
    pub radius: f64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SwarmConfig {
    pub goal: [f64; 2],
    #[serde(default)]
    pub params: SteeringParamsConfig,
    pub agents: AgentSpawnConfig,
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
    #[serde(default)]
    pub blocks: Vec<[f64; 4]>, // x, y, w, h
    #[serde(default)]
    pub signals: Vec<SignalConfig>,
    #[serde(default)]
    pub stomps: Vec<StompConfig>,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub run: RunConfig,
    pub gravity: Option<GravityConfig>,
    pub swarm: Option<SwarmConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }
}

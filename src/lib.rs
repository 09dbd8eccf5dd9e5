pub mod error;
pub mod geometry;
pub mod gravity;
pub mod steering;
pub mod configuration;
pub mod scenario;
pub mod benchmark;

pub use error::SimError;
pub use geometry::{NVec2, Rect};

pub use gravity::{advance_gravity, euler_integrator, make_circular_orbit, orbital_period, pairwise_force};
pub use gravity::{Body, System, Force, ForceSet, NewtonianGravity, GravityParams};

pub use steering::{advance_steering, advance_resource, contacting_agents, kill_agent, stomp, steering_force};
pub use steering::{Agent, AgentId, AgentSpawner, KillEvent, Resource, SteeringParams, WorldBounds};

pub use configuration::config::{ScenarioConfig, GravityConfig, SwarmConfig, RunConfig};
pub use scenario::{Scenario, ScenarioOutcome, GravityScenario, SwarmScenario};

pub use benchmark::benchmark::{bench_gravity, bench_steering};

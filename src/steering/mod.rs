pub mod states;
pub mod params;
pub mod spatial;
pub mod behaviors;
pub mod broadcast;
pub mod resource;
pub mod engine;

pub use states::{Agent, AgentId, AgentSpawner, KillEvent, Resource};
pub use params::{SteeringParams, WorldBounds};
pub use spatial::SpatialGrid;
pub use broadcast::{broadcast_signals, expire_signals};
pub use resource::{advance_resource, contacting_agents};
pub use engine::{advance_steering, integrate, kill_agent, steering_force, stomp, SteeringReport};

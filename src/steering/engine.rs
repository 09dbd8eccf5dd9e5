//! One tick of the swarm
//!
//! Order within a tick:
//! 1. expire stale signals, then run the broadcast wave
//! 2. force pass over the start-of-tick snapshot (no agent moves yet)
//! 3. apply resource pushes and update parking
//! 4. integrate: `v += a`, clamp speed, `x += v`, `a = 0`, then resolve
//!    block collisions and reflect off the world bounds

use tracing::debug;

use crate::geometry::{limit, NVec2, Rect};
use super::behaviors::{alignment, cohesion, push_toward, resource_attraction, seek, separation};
use super::broadcast::{broadcast_signals, expire_signals};
use super::params::{SteeringParams, WorldBounds};
use super::spatial::SpatialGrid;
use super::states::{Agent, AgentId, KillEvent, Resource};

/// What happened during one `advance_steering` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SteeringReport {
    pub newly_signaled: Vec<AgentId>,
    pub expired_signals: usize,
    pub pushes: usize,
}

/// Read-only view of the tick's start-of-tick state
struct Frame<'a> {
    agents: &'a [Agent],
    positions: Vec<NVec2>,
    grid: SpatialGrid,
    blocks: &'a [Rect],
    resources: &'a [Resource],
    goal: NVec2,
    now_ms: u64,
    params: &'a SteeringParams,
}

impl<'a> Frame<'a> {
    fn new(
        agents: &'a [Agent],
        blocks: &'a [Rect],
        resources: &'a [Resource],
        goal: NVec2,
        now_ms: u64,
        params: &'a SteeringParams,
    ) -> Self {
        let positions: Vec<NVec2> = agents.iter().map(|a| a.position).collect();
        let grid = SpatialGrid::build(positions.iter().copied(), params.query_radius());
        Self { agents, positions, grid, blocks, resources, goal, now_ms, params }
    }

    /// Weighted sum of every rule for agent `i`, plus the resource it pushes
    fn steer(&self, i: usize) -> (NVec2, Option<usize>) {
        let params = self.params;
        let me = &self.agents[i];
        let neighbors = self.grid.query(&self.positions, &me.position, params.query_radius());

        // Unsignaled agents head for the shared goal; a signal redirects them
        let target = if me.signaled { me.goal } else { self.goal };
        let attraction = resource_attraction(me, self.resources, self.now_ms, params);

        let force = alignment(i, self.agents, &neighbors, params) * params.alignment_weight
            + cohesion(i, self.agents, &neighbors, params) * params.cohesion_weight
            + separation(i, self.agents, &neighbors, self.blocks, params) * params.separation_weight
            + seek(&me.position, &me.velocity, &target, params) * params.seek_weight
            + attraction.force * params.attraction_weight;

        (force, attraction.push)
    }
}

/// Steering acceleration agent `i` would receive this tick (read-only)
pub fn steering_force(
    i: usize,
    agents: &[Agent],
    blocks: &[Rect],
    resources: &[Resource],
    goal: NVec2,
    now_ms: u64,
    params: &SteeringParams,
) -> NVec2 {
    Frame::new(agents, blocks, resources, goal, now_ms, params).steer(i).0
}

/// Advance every agent by one tick
///
/// `params` must pass [`SteeringParams::check`]; debug builds assert it
pub fn advance_steering(
    agents: &mut [Agent],
    blocks: &[Rect],
    resources: &mut [Resource],
    goal: NVec2,
    now_ms: u64,
    params: &SteeringParams,
) -> SteeringReport {
    debug_assert!(params.check().is_ok(), "advance_steering called with invalid params");
    let mut report = SteeringReport {
        expired_signals: expire_signals(agents, now_ms, params),
        newly_signaled: broadcast_signals(agents, now_ms, params.broadcast_radius),
        pushes: 0,
    };

    // Force pass over the snapshot
    let mut pushes = Vec::new();
    let steer: Vec<NVec2> = {
        let frame = Frame::new(agents, blocks, resources, goal, now_ms, params);
        (0..agents.len())
            .map(|i| {
                let (force, push) = frame.steer(i);
                pushes.extend(push);
                force
            })
            .collect()
    };

    // Pushes are applied one at a time so a crowd cannot shove past the goal
    for &k in &pushes {
        let delta = push_toward(&resources[k].position, &goal, params.object_push_force);
        resources[k].position += delta;
    }
    report.pushes = pushes.len();
    update_parking(resources, &goal, now_ms, params.goal_radius);

    for (agent, a) in agents.iter_mut().zip(steer) {
        agent.acceleration += a;
        integrate(agent, blocks, params);
    }

    if !report.newly_signaled.is_empty() || report.expired_signals > 0 {
        debug!(
            signaled = report.newly_signaled.len(),
            expired = report.expired_signals,
            "signal wave"
        );
    }
    report
}

/// Stamp resources entering the goal zone, clear those that left it
pub fn update_parking(resources: &mut [Resource], goal: &NVec2, now_ms: u64, goal_radius: f64) {
    for r in resources.iter_mut() {
        let inside = (r.position - goal).norm() <= goal_radius;
        match (inside, r.parked_since) {
            (true, None) => r.parked_since = Some(now_ms),
            (false, Some(_)) => r.parked_since = None,
            _ => {}
        }
    }
}

/// Kinematics for one agent, then collision and bounds handling
pub fn integrate(agent: &mut Agent, blocks: &[Rect], params: &SteeringParams) {
    agent.velocity = limit(agent.velocity + agent.acceleration, params.max_speed);
    agent.position += agent.velocity;
    agent.acceleration = NVec2::zeros();

    for block in blocks {
        resolve_block(agent, &block.inflate(params.agent_radius));
    }
    reflect_in_bounds(agent, &params.bounds);
}

/// Push an agent out of `block` along the shallowest axis and turn its velocity outward
fn resolve_block(agent: &mut Agent, block: &Rect) {
    let p = agent.position;
    if !block.contains(&p) {
        return;
    }
    let left = p.x - block.min.x;
    let right = block.max.x - p.x;
    let top = p.y - block.min.y;
    let bottom = block.max.y - p.y;
    let shallowest = left.min(right).min(top).min(bottom);

    if shallowest == left {
        agent.position.x = block.min.x;
        agent.velocity.x = -agent.velocity.x.abs();
    } else if shallowest == right {
        agent.position.x = block.max.x;
        agent.velocity.x = agent.velocity.x.abs();
    } else if shallowest == top {
        agent.position.y = block.min.y;
        agent.velocity.y = -agent.velocity.y.abs();
    } else {
        agent.position.y = block.max.y;
        agent.velocity.y = agent.velocity.y.abs();
    }
}

/// Clamp into the margin-reduced bounds, flipping the velocity on the violated axis
fn reflect_in_bounds(agent: &mut Agent, bounds: &WorldBounds) {
    let lo = bounds.inner_min();
    let hi = bounds.inner_max();
    if agent.position.x < lo.x {
        agent.position.x = lo.x;
        agent.velocity.x = agent.velocity.x.abs();
    } else if agent.position.x > hi.x {
        agent.position.x = hi.x;
        agent.velocity.x = -agent.velocity.x.abs();
    }
    if agent.position.y < lo.y {
        agent.position.y = lo.y;
        agent.velocity.y = agent.velocity.y.abs();
    } else if agent.position.y > hi.y {
        agent.position.y = hi.y;
        agent.velocity.y = -agent.velocity.y.abs();
    }
}

/// Remove one agent by id
pub fn kill_agent(agents: &mut Vec<Agent>, id: AgentId) -> Option<KillEvent> {
    let index = agents.iter().position(|a| a.id == id)?;
    let agent = agents.remove(index);
    Some(KillEvent { id: agent.id, position: agent.position })
}

/// Remove every agent within `radius` of `center` (a player stomp)
/// A negative or NaN radius kills nothing
pub fn stomp(agents: &mut Vec<Agent>, center: NVec2, radius: f64) -> Vec<KillEvent> {
    let mut events = Vec::new();
    if radius.is_nan() || radius < 0.0 {
        return events;
    }
    let r2 = radius * radius;
    agents.retain(|a| {
        let hit = (a.position - center).norm_squared() <= r2;
        if hit {
            events.push(KillEvent { id: a.id, position: a.position });
        }
        !hit
    });
    events
}

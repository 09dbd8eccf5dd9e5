//! Steering rules
//!
//! Each rule returns a desired change in velocity for one agent, clamped
//! to `max_force`. Rules only read state; the engine sums their weighted
//! outputs and integrates afterwards.
//!
//! `neighbors` is a candidate list from the spatial query and may contain
//! the agent itself; every rule filters by index and its own radius.

use crate::geometry::{distance, limit, normalize_or_zero, set_magnitude, NVec2, Rect};
use super::params::SteeringParams;
use super::states::{Agent, Resource};

/// Steer toward `target` at full speed
pub fn seek(position: &NVec2, velocity: &NVec2, target: &NVec2, params: &SteeringParams) -> NVec2 {
    let desired = target - position;
    if desired.norm_squared() == 0.0 {
        return NVec2::zeros();
    }
    limit(set_magnitude(desired, params.max_speed) - velocity, params.max_force)
}

/// Match the mean velocity of nearby agents
pub fn alignment(i: usize, agents: &[Agent], neighbors: &[usize], params: &SteeringParams) -> NVec2 {
    let me = &agents[i];
    let r2 = params.neighbor_radius * params.neighbor_radius;
    let mut sum = NVec2::zeros();
    let mut count = 0usize;
    for &j in neighbors {
        if j == i || (agents[j].position - me.position).norm_squared() > r2 {
            continue;
        }
        sum += agents[j].velocity;
        count += 1;
    }
    if count == 0 {
        return NVec2::zeros();
    }
    let mean = sum / count as f64;
    if mean.norm_squared() == 0.0 {
        return NVec2::zeros();
    }
    limit(set_magnitude(mean, params.max_speed) - me.velocity, params.max_force)
}

/// Head for the centroid of nearby agents
pub fn cohesion(i: usize, agents: &[Agent], neighbors: &[usize], params: &SteeringParams) -> NVec2 {
    let me = &agents[i];
    let r2 = params.neighbor_radius * params.neighbor_radius;
    let mut sum = NVec2::zeros();
    let mut count = 0usize;
    for &j in neighbors {
        if j == i || (agents[j].position - me.position).norm_squared() > r2 {
            continue;
        }
        sum += agents[j].position;
        count += 1;
    }
    if count == 0 {
        return NVec2::zeros();
    }
    seek(&me.position, &me.velocity, &(sum / count as f64), params)
}

/// Move away from crowding agents and from blocks, weighted by 1/d
pub fn separation(
    i: usize,
    agents: &[Agent],
    neighbors: &[usize],
    blocks: &[Rect],
    params: &SteeringParams,
) -> NVec2 {
    let me = &agents[i];
    let mut sum = NVec2::zeros();
    let mut count = 0usize;

    let mut push_away = |from: NVec2, radius: f64| {
        let away = me.position - from;
        let d = away.norm();
        if d > 0.0 && d < radius {
            sum += normalize_or_zero(away) / d;
            count += 1;
        }
    };

    for &j in neighbors {
        if j != i {
            push_away(agents[j].position, params.separation_radius);
        }
    }
    // agent inside a block has d == 0 here; collision resolution handles it
    for block in blocks {
        push_away(block.closest_point(&me.position), params.object_separation_radius);
    }

    if count == 0 {
        return NVec2::zeros();
    }
    let mean = sum / count as f64;
    if mean.norm_squared() == 0.0 {
        return NVec2::zeros();
    }
    limit(set_magnitude(mean, params.max_speed) - me.velocity, params.max_force)
}

/// Result of the resource rule: attraction plus the resource to nudge, if any
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attraction {
    pub force: NVec2,
    pub push: Option<usize>,
}

/// Index of the nearest resource still worth chasing
pub fn nearest_resource(position: &NVec2, resources: &[Resource], now_ms: u64, params: &SteeringParams) -> Option<(usize, f64)> {
    resources
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.is_depleted() && !r.parked_longer_than(now_ms, params.park_grace_ms))
        .map(|(k, r)| (k, distance(position, &r.position)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Chase the nearest unparked resource and, when close enough, push it
pub fn resource_attraction(agent: &Agent, resources: &[Resource], now_ms: u64, params: &SteeringParams) -> Attraction {
    let none = Attraction { force: NVec2::zeros(), push: None };
    let Some((k, d)) = nearest_resource(&agent.position, resources, now_ms, params) else {
        return none;
    };
    if d > params.attraction_radius {
        return none;
    }
    Attraction {
        force: seek(&agent.position, &agent.velocity, &resources[k].position, params),
        push: (d <= params.push_trigger_distance).then_some(k),
    }
}

/// Displacement moving `from` toward `goal` by at most `step`
pub fn push_toward(from: &NVec2, goal: &NVec2, step: f64) -> NVec2 {
    let dir = goal - from;
    let d = dir.norm();
    if d == 0.0 {
        return NVec2::zeros();
    }
    normalize_or_zero(dir) * step.min(d)
}

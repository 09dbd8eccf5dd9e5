//! Resource damage under sustained contact
//!
//! Damage needs continuous touching: each agent has a timer that starts
//! at first contact and is dropped as soon as contact breaks. Every full
//! `damage_interval_ms` of contact costs one point of health.

use tracing::debug;

use super::states::{Agent, AgentId, Resource};

/// Agents within `resource.radius + agent_radius` of the resource
pub fn contacting_agents(resource: &Resource, agents: &[Agent], agent_radius: f64) -> Vec<AgentId> {
    let reach = resource.radius + agent_radius;
    let reach2 = reach * reach;
    agents
        .iter()
        .filter(|a| (a.position - resource.position).norm_squared() <= reach2)
        .map(|a| a.id)
        .collect()
}

/// Update touch timers and apply damage; returns the health removed
pub fn advance_resource(resource: &mut Resource, contacting: &[AgentId], now_ms: u64, damage_interval_ms: u64) -> u32 {
    let interval = damage_interval_ms.max(1);
    let timers = resource.touch_timers_mut();

    // Contact must be continuous: forget anyone who let go
    timers.retain(|id, _| contacting.contains(id));

    let mut due = 0u32;
    for id in contacting {
        let start = timers.entry(*id).or_insert(now_ms);
        while now_ms.saturating_sub(*start) >= interval {
            due = due.saturating_add(1);
            *start += interval;
        }
    }

    if due == 0 || resource.is_depleted() {
        return 0;
    }
    let dealt = resource.take_damage(due);
    debug!(dealt, health = resource.health(), "resource damaged");
    dealt
}

//! Core state types for the swarm.
//!
//! - `Agent`    a steering entity ("boid") with a stable `AgentId`
//! - `Resource` a health-bearing object agents wear down by touching it
//! - `KillEvent` what a stomp leaves behind for the renderer
//!
//! Timestamps are tick times in milliseconds supplied by the caller.

use std::collections::HashMap;
use std::fmt;

use crate::error::{check_non_negative, SimError};
use crate::geometry::NVec2;

/// Stable handle assigned at spawn; never reused by the same spawner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub position: NVec2,
    pub velocity: NVec2,
    pub acceleration: NVec2, // per-tick accumulator, zeroed by integration
    pub signaled: bool,
    pub signal_time: Option<u64>, // ms timestamp of the signal event
    pub goal: NVec2, // meaningful while signaled
}

impl Agent {
    /// Mark the agent signaled with `goal`; `time` is the originating event's timestamp
    pub fn signal(&mut self, goal: NVec2, time: u64) {
        self.signaled = true;
        self.goal = goal;
        self.signal_time = Some(time);
    }

    pub fn clear_signal(&mut self) {
        self.signaled = false;
        self.signal_time = None;
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}

/// Hands out agents with increasing ids
#[derive(Debug, Default)]
pub struct AgentSpawner {
    next_id: u32,
}

impl AgentSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, position: NVec2, velocity: NVec2) -> Agent {
        let id = AgentId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        Agent {
            id,
            position,
            velocity,
            acceleration: NVec2::zeros(),
            signaled: false,
            signal_time: None,
            goal: position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Resource {
    pub position: NVec2,
    pub radius: f64, // contact radius
    health: u32,
    max_health: u32,
    touch_timers: HashMap<AgentId, u64>, // agent -> start of the current contact window
    pub parked_since: Option<u64>, // entered the goal zone at this ms
}

impl Resource {
    pub fn new(position: NVec2, radius: f64, max_health: u32) -> Result<Self, SimError> {
        check_non_negative("resource radius", radius)?;
        if !(position.x.is_finite() && position.y.is_finite()) {
            return Err(SimError::InvalidConfiguration("resource position must be finite".into()));
        }
        Ok(Self {
            position,
            radius,
            health: max_health,
            max_health,
            touch_timers: HashMap::new(),
            parked_since: None,
        })
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Health reached zero; the caller should remove it
    pub fn is_depleted(&self) -> bool {
        self.health == 0
    }

    /// Restore full health and forget all contacts
    pub fn reset(&mut self) {
        self.health = self.max_health;
        self.touch_timers.clear();
        self.parked_since = None;
    }

    /// Sat inside the goal zone for strictly longer than `grace_ms`
    pub fn parked_longer_than(&self, now_ms: u64, grace_ms: u64) -> bool {
        self.parked_since.is_some_and(|since| now_ms.saturating_sub(since) > grace_ms)
    }

    pub fn touch_started(&self, id: AgentId) -> Option<u64> {
        self.touch_timers.get(&id).copied()
    }

    pub(crate) fn touch_timers_mut(&mut self) -> &mut HashMap<AgentId, u64> {
        &mut self.touch_timers
    }

    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.health);
        self.health -= dealt;
        dealt
    }
}

/// Transient record of a killed agent, drawn by the renderer and discarded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KillEvent {
    pub id: AgentId,
    pub position: NVec2,
}

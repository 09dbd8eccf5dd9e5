//! Same-tick signal propagation
//!
//! A signaled agent passes its goal to every unsignaled agent within the
//! broadcast radius, and those pass it on in turn before the tick ends.
//! The wave runs as a breadth-first work queue: an agent joins the queue
//! only when it flips from unsignaled to signaled, so each agent is
//! visited at most once and the loop terminates.
//!
//! Relayed signals keep the originating `signal_time`, so a whole chain
//! expires together instead of re-signaling its own source.

use std::collections::VecDeque;

use super::params::SteeringParams;
use super::states::{Agent, AgentId};

/// Clear signals older than `signal_duration_ms`; returns how many expired
pub fn expire_signals(agents: &mut [Agent], now_ms: u64, params: &SteeringParams) -> usize {
    let Some(duration) = params.signal_duration_ms else {
        return 0;
    };
    let mut expired = 0;
    for agent in agents.iter_mut().filter(|a| a.signaled) {
        let since = agent.signal_time.unwrap_or(now_ms);
        if now_ms.saturating_sub(since) >= duration {
            agent.clear_signal();
            expired += 1;
        }
    }
    expired
}

/// Propagate signals through chains of agents closer than `radius`
/// Returns the ids signaled during this call, in visit order
pub fn broadcast_signals(agents: &mut [Agent], now_ms: u64, radius: f64) -> Vec<AgentId> {
    let mut newly = Vec::new();
    if radius.is_nan() || radius < 0.0 {
        return newly;
    }
    let r2 = radius * radius;

    // Frontier starts with everything already signaled
    let mut queue: VecDeque<usize> = agents
        .iter()
        .enumerate()
        .filter(|(_, a)| a.signaled)
        .map(|(i, _)| i)
        .collect();

    while let Some(i) = queue.pop_front() {
        let origin = agents[i].position;
        let goal = agents[i].goal;
        let time = agents[i].signal_time.unwrap_or(now_ms);

        for j in 0..agents.len() {
            let other = &mut agents[j];
            if other.signaled || (other.position - origin).norm_squared() > r2 {
                continue;
            }
            other.signal(goal, time);
            newly.push(other.id);
            queue.push_back(j);
        }
    }
    newly
}

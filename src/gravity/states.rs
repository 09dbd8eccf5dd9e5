//! Core state types for the gravity sandbox.
//!
//! - `Body`   a point mass with a display radius and a position trail
//! - `System` the list of bodies and the current simulation time `t`
//!
//! Bodies carry no identity; the caller adds and removes them between ticks.

use std::collections::VecDeque;

use crate::geometry::NVec2;

/// Position history kept for drawing orbit trails
/// `limit = None` keeps every point, otherwise the oldest points are dropped
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<NVec2>,
    limit: Option<usize>,
}

impl Trail {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn bounded(limit: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(limit.min(1024)),
            limit: Some(limit),
        }
    }

    pub fn push(&mut self, p: NVec2) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.points.len() >= limit {
                self.points.pop_front();
            }
        }
        self.points.push_back(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&NVec2> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NVec2> {
        self.points.iter()
    }
}

/// Physical parameters of a launched asteroid, used only by the impact
/// and deflection models (the integrator works with `m` alone)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    pub diameter_m: f64, // diameter in metres
    pub density: f64, // kg/m^3
}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position (px)
    pub v: NVec2, // velocity (px/tick)
    pub m: f64, // mass (game units)
    pub radius: f64, // collision / visual radius (px)
    pub trail: Trail, // past positions
    pub name: Option<String>, // display label
    pub asteroid: Option<Asteroid>, // set for launched asteroids
}

impl Body {
    pub fn new(x: NVec2, v: NVec2, m: f64, radius: f64) -> Self {
        Self {
            x,
            v,
            m,
            radius,
            trail: Trail::unbounded(),
            name: None,
            asteroid: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_trail_limit(mut self, limit: Option<usize>) -> Self {
        self.trail = match limit {
            Some(n) => Trail::bounded(n),
            None => Trail::unbounded(),
        };
        self
    }

    pub fn with_asteroid(mut self, asteroid: Asteroid) -> Self {
        self.asteroid = Some(asteroid);
        self
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // collection of bodies
    pub t: f64, // time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }
}

//! Tuning parameters for the steering engine
//!
//! One immutable value passed into every call. `validate` rejects
//! settings that would silently produce wrong motion.

use crate::error::{check_non_negative, check_positive, SimError};
use crate::geometry::NVec2;

/// Visible area; agents are kept inside `[min + margin, max - margin]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min: NVec2,
    pub max: NVec2,
    pub margin: f64,
}

impl WorldBounds {
    pub fn new(width: f64, height: f64, margin: f64) -> Self {
        Self {
            min: NVec2::zeros(),
            max: NVec2::new(width, height),
            margin,
        }
    }

    pub fn inner_min(&self) -> NVec2 {
        self.min + NVec2::new(self.margin, self.margin)
    }

    pub fn inner_max(&self) -> NVec2 {
        self.max - NVec2::new(self.margin, self.margin)
    }

    pub fn contains_inner(&self, p: &NVec2) -> bool {
        let (lo, hi) = (self.inner_min(), self.inner_max());
        p.x >= lo.x && p.x <= hi.x && p.y >= lo.y && p.y <= hi.y
    }

    fn validate(&self) -> Result<(), SimError> {
        check_non_negative("bounds margin", self.margin)?;
        let finite = [self.min.x, self.min.y, self.max.x, self.max.y].iter().all(|v| v.is_finite());
        let (lo, hi) = (self.inner_min(), self.inner_max());
        if !finite || lo.x > hi.x || lo.y > hi.y {
            return Err(SimError::InvalidConfiguration(format!(
                "bounds {:?}..{:?} leave no room inside margin {}",
                (self.min.x, self.min.y),
                (self.max.x, self.max.y),
                self.margin
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SteeringParams {
    pub max_speed: f64,
    pub max_force: f64, // cap on each rule's output
    pub neighbor_radius: f64, // alignment / cohesion
    pub separation_radius: f64,
    pub object_separation_radius: f64, // distance kept from blocks
    pub attraction_radius: f64, // resources closer than this attract
    pub broadcast_radius: f64,
    pub object_push_force: f64, // px a resource is nudged per pushing agent per tick
    pub push_trigger_distance: f64,
    pub goal_radius: f64, // resource counts as parked inside this
    pub park_grace_ms: u64,
    pub signal_duration_ms: Option<u64>, // None = signals never expire
    pub agent_radius: f64,
    pub bounds: WorldBounds,
    pub alignment_weight: f64,
    pub cohesion_weight: f64,
    pub separation_weight: f64,
    pub seek_weight: f64,
    pub attraction_weight: f64,
    pub damage_interval_ms: u64,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            max_speed: 3.0,
            max_force: 0.05,
            neighbor_radius: 50.0,
            separation_radius: 25.0,
            object_separation_radius: 30.0,
            attraction_radius: 150.0,
            broadcast_radius: 40.0,
            object_push_force: 0.5,
            push_trigger_distance: 20.0,
            goal_radius: 30.0,
            park_grace_ms: 2_000,
            signal_duration_ms: None,
            agent_radius: 5.0,
            bounds: WorldBounds::new(800.0, 600.0, 10.0),
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            separation_weight: 1.5,
            seek_weight: 1.0,
            attraction_weight: 1.0,
            damage_interval_ms: 1_000,
        }
    }
}

impl SteeringParams {
    /// Check every field, returning the params unchanged when valid
    pub fn validate(self) -> Result<Self, SimError> {
        self.check()?;
        Ok(self)
    }

    /// Same rules as `validate` without taking ownership
    pub fn check(&self) -> Result<(), SimError> {
        check_positive("max_speed", self.max_speed)?;
        check_positive("max_force", self.max_force)?;
        for (name, value) in [
            ("neighbor_radius", self.neighbor_radius),
            ("separation_radius", self.separation_radius),
            ("object_separation_radius", self.object_separation_radius),
            ("attraction_radius", self.attraction_radius),
            ("broadcast_radius", self.broadcast_radius),
            ("object_push_force", self.object_push_force),
            ("push_trigger_distance", self.push_trigger_distance),
            ("goal_radius", self.goal_radius),
            ("agent_radius", self.agent_radius),
            ("alignment_weight", self.alignment_weight),
            ("cohesion_weight", self.cohesion_weight),
            ("separation_weight", self.separation_weight),
            ("seek_weight", self.seek_weight),
            ("attraction_weight", self.attraction_weight),
        ] {
            check_non_negative(name, value)?;
        }
        if self.damage_interval_ms == 0 {
            return Err(SimError::InvalidConfiguration("damage_interval_ms must be > 0".into()));
        }
        self.bounds.validate()
    }

    /// Widest radius any per-agent rule looks at
    pub fn query_radius(&self) -> f64 {
        self.neighbor_radius.max(self.separation_radius)
    }
}

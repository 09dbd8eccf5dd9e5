//! Numerical and physical parameters for the gravity integrator
//!
//! `g` is a tuning constant for pixel-space play, not the SI value

use crate::error::{check_positive, SimError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityParams {
    pub g: f64, // gravitational constant
    pub dt: f64, // step size (ticks)
}

impl GravityParams {
    /// Validated constructor: both values must be finite and > 0
    pub fn new(g: f64, dt: f64) -> Result<Self, SimError> {
        let params = Self { g, dt };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        check_positive("G", self.g)?;
        check_positive("dt", self.dt)
    }
}

impl Default for GravityParams {
    fn default() -> Self {
        Self { g: 0.1, dt: 1.0 }
    }
}

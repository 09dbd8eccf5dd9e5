//! Circular-orbit placement
//!
//! Pure construction helpers, not part of the per-tick loop

use std::f64::consts::PI;

use crate::error::{check_positive, SimError};
use crate::geometry::NVec2;
use super::states::Body;

/// Build an orbiter on a circular orbit of radius `r` around `anchor`
///
/// The orbiter is placed at `anchor.x + (r, 0)` with speed
/// `sqrt(G * M_anchor / r)` perpendicular to the radius vector:
/// `-y` when `clockwise`, `+y` otherwise. The anchor's own velocity is
/// added so a moving anchor keeps its satellite.
pub fn make_circular_orbit(
    anchor: &Body,
    r: f64,
    orbiter_mass: f64,
    orbiter_radius: f64,
    g: f64,
    clockwise: bool,
) -> Result<Body, SimError> {
    check_positive("orbit radius", r)?;
    check_positive("orbiter radius", orbiter_radius)?;
    check_positive("G", g)?;
    if !(anchor.m.is_finite() && anchor.m > 0.0) {
        return Err(SimError::InvalidMass { index: 0, mass: anchor.m });
    }
    if !(orbiter_mass.is_finite() && orbiter_mass > 0.0) {
        return Err(SimError::InvalidMass { index: 1, mass: orbiter_mass });
    }

    let speed = circular_speed(anchor.m, r, g);
    let x = anchor.x + NVec2::new(r, 0.0);
    let vy = if clockwise { -speed } else { speed };
    let v = anchor.v + NVec2::new(0.0, vy);

    Ok(Body::new(x, v, orbiter_mass, orbiter_radius))
}

/// Speed of a circular orbit: `sqrt(G M / r)`
pub fn circular_speed(anchor_mass: f64, r: f64, g: f64) -> f64 {
    (g * anchor_mass / r).sqrt()
}

/// Period of a circular orbit in ticks: `2 pi sqrt(r^3 / (G M))`
pub fn orbital_period(anchor_mass: f64, r: f64, g: f64) -> f64 {
    2.0 * PI * (r * r * r / (g * anchor_mass)).sqrt()
}

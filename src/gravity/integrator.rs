//! Fixed-step time integrator for the gravity sandbox
//!
//! Forward Euler over forces sampled at the start of the tick, with the
//! velocity updated before the position (`v += a dt; x += v dt`)

use tracing::trace;

use crate::error::SimError;
use crate::geometry::NVec2;
use super::forces::{ForceSet, NewtonianGravity};
use super::params::GravityParams;
use super::states::{Body, System};

/// Reject any body whose mass is not finite and > 0
pub fn validate_masses(bodies: &[Body]) -> Result<(), SimError> {
    match bodies.iter().position(|b| !(b.m.is_finite() && b.m > 0.0)) {
        Some(index) => Err(SimError::InvalidMass { index, mass: bodies[index].m }),
        None => Ok(()),
    }
}

/// Advance `bodies` one step with the given force set
/// Nothing is mutated if validation fails
pub fn step_bodies(bodies: &mut [Body], forces: &ForceSet, dt: f64) -> Result<(), SimError> {
    validate_masses(bodies)?;
    let n = bodies.len();
    if n == 0 { // no bodies, nothing to do
        return Ok(());
    }

    // Force pass reads the untouched snapshot
    let mut f_total = vec![NVec2::zeros(); n];
    forces.accumulate_forces(bodies, &mut f_total);

    for (b, f) in bodies.iter_mut().zip(f_total.iter()) {
        let a = *f / b.m;
        b.v += a * dt;
        b.x += b.v * dt;
        b.trail.push(b.x);
    }
    trace!(bodies = n, dt, "gravity step");
    Ok(())
}

/// Advance the system by one step and move `sys.t` forward by `params.dt`
pub fn euler_integrator(sys: &mut System, forces: &ForceSet, params: &GravityParams) -> Result<(), SimError> {
    params.validate()?;
    step_bodies(&mut sys.bodies, forces, params.dt)?;
    sys.t += params.dt;
    Ok(())
}

/// One tick of mutual Newtonian gravity over `bodies`, in place
pub fn advance_gravity(bodies: &mut [Body], dt: f64, g: f64) -> Result<(), SimError> {
    let params = GravityParams::new(g, dt)?;
    let forces = ForceSet::new().with(NewtonianGravity { g: params.g });
    step_bodies(bodies, &forces, params.dt)
}

//! Asteroid launch and kinetic-impactor deflection
//!
//! Converts between game units (px, ticks) and physical units (m, s).
//! Screen space has +y pointing down, so a launch angle of 90 degrees
//! fires straight up the screen.

use crate::geometry::NVec2;
use super::impact::mass_from_diameter;
use super::states::{Asteroid, Body};

pub const M_PER_PX: f64 = 1_000.0; // 1 px ~ 1 km
pub const SECONDS_PER_TICK: f64 = 1.0;
pub const KM_PER_PX: f64 = M_PER_PX / 1_000.0;
pub const KMH_TO_PPF: f64 = 0.000_03; // real km/h -> px per tick
pub const FALLBACK_SPEED_KMH: f64 = 20_000.0;

pub const ASTEROID_MASS: f64 = 2.0;
pub const ASTEROID_RADIUS: f64 = 5.0;

pub const DEFAULT_DIAMETER_M: f64 = 150.0;
pub const DEFAULT_DENSITY: f64 = 3_000.0; // stony
pub const DEFAULT_IMPACTOR_MASS: f64 = 1_000_000.0; // kg
pub const DEFAULT_IMPACTOR_SPEED: f64 = 10_000.0; // m/s
pub const DEFAULT_BETA: f64 = 3.0; // momentum enhancement

pub fn px_per_tick_to_mps(v: f64) -> f64 {
    v * M_PER_PX / SECONDS_PER_TICK
}

pub fn mps_to_px_per_tick(v: f64) -> f64 {
    v / (M_PER_PX / SECONDS_PER_TICK)
}

pub fn kmh_to_px_per_tick(kmh: f64) -> f64 {
    kmh * KMH_TO_PPF
}

/// Game speed for a feed entry; missing or unusable data falls back to 20000 km/h
pub fn speed_from_kmh(kmh: Option<f64>) -> f64 {
    let kmh = kmh.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(FALLBACK_SPEED_KMH);
    kmh_to_px_per_tick(kmh)
}

/// A launched asteroid at `launch_pos` travelling at `speed` px/tick along `angle_rad`
pub fn make_asteroid(launch_pos: NVec2, angle_rad: f64, speed: f64, asteroid: Asteroid) -> Body {
    let v = NVec2::new(speed * angle_rad.cos(), -speed * angle_rad.sin());
    Body::new(launch_pos, v, ASTEROID_MASS, ASTEROID_RADIUS).with_asteroid(asteroid)
}

/// Kinetic impactor parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impactor {
    pub mass: f64, // kg
    pub speed: f64, // m/s
    pub beta: f64, // momentum enhancement factor
}

impl Default for Impactor {
    fn default() -> Self {
        Self {
            mass: DEFAULT_IMPACTOR_MASS,
            speed: DEFAULT_IMPACTOR_SPEED,
            beta: DEFAULT_BETA,
        }
    }
}

/// Momentum-transfer estimate `beta * (m_imp / m_ast) * v_imp`, 0 for a massless asteroid
pub fn delta_v_kinetic(m_impactor: f64, v_impactor: f64, m_asteroid: f64, beta: f64) -> f64 {
    if m_asteroid <= 0.0 {
        return 0.0;
    }
    beta * (m_impactor / m_asteroid) * v_impactor
}

/// `v` after adding `dv` along `direction_rad`
pub fn add_delta_v(v: NVec2, dv: f64, direction_rad: f64) -> NVec2 {
    v + NVec2::new(dv * direction_rad.cos(), dv * direction_rad.sin())
}

/// Nudge `body` perpendicular to its velocity; returns the applied dv in px/tick
///
/// Bodies without asteroid parameters use the default stony asteroid
pub fn deflect(body: &mut Body, impactor: &Impactor) -> f64 {
    let a = body.asteroid.unwrap_or(Asteroid {
        diameter_m: DEFAULT_DIAMETER_M,
        density: DEFAULT_DENSITY,
    });
    let m_ast = mass_from_diameter(a.diameter_m, a.density);
    let dv_mps = delta_v_kinetic(impactor.mass, impactor.speed, m_ast, impactor.beta);

    let direction = body.v.y.atan2(body.v.x) + std::f64::consts::FRAC_PI_2;
    let dv = mps_to_px_per_tick(dv_mps);
    body.v = add_delta_v(body.v, dv, direction);
    dv
}

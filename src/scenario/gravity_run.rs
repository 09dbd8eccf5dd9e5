//! Headless driver for the gravity sandbox
//!
//! Plays the part of the game loop: fires scheduled launches and
//! deflections, advances gravity, then removes asteroids that hit a
//! primary or leave the world. Primaries sit at the front of
//! `system.bodies`; everything after `primary_count` is an asteroid.

use tracing::{debug, info, warn};

use crate::configuration::config::{BodyConfig, DeflectionConfig, GravityConfig, LaunchConfig};
use crate::error::{check_positive, SimError};
use crate::geometry::NVec2;
use crate::gravity::collision::{circles_overlap, in_bounds};
use crate::gravity::impact::{impact_effects, ImpactEffects};
use crate::gravity::launch::{
    deflect, make_asteroid, px_per_tick_to_mps, speed_from_kmh, Impactor, DEFAULT_DENSITY, DEFAULT_DIAMETER_M,
};
use crate::gravity::{euler_integrator, make_circular_orbit, Asteroid, Body, ForceSet, GravityParams, NewtonianGravity, System};

/// Entry angle handed to the impact model (ignored by the current formulas)
const IMPACT_ANGLE_DEG: f64 = 90.0;

/// Running totals for a gravity run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GravityOutcome {
    pub launched: usize,
    pub deflected: usize,
    pub earth_impacts: Vec<ImpactEffects>,
    pub other_collisions: usize,
    pub culled: usize,
    pub remaining_asteroids: usize,
    pub t: f64,
}

pub struct GravityScenario {
    pub params: GravityParams,
    pub system: System,
    pub forces: ForceSet,
    pub primary_count: usize,
    pub world: (f64, f64),
    trail_limit: Option<usize>,
    launches: Vec<LaunchConfig>,
    deflections: Vec<DeflectionConfig>,
    outcome: GravityOutcome,
}

fn body_from_config(bc: &BodyConfig, index: usize, trail_limit: Option<usize>) -> Result<Body, SimError> {
    if !(bc.m.is_finite() && bc.m > 0.0) {
        return Err(SimError::InvalidMass { index, mass: bc.m });
    }
    check_positive("body radius", bc.radius)?;
    let mut body = Body::new(NVec2::new(bc.x[0], bc.x[1]), NVec2::new(bc.v[0], bc.v[1]), bc.m, bc.radius)
        .with_trail_limit(trail_limit);
    body.name = bc.name.clone();
    Ok(body)
}

impl GravityScenario {
    pub fn build_scenario(cfg: GravityConfig) -> Result<Self, SimError> {
        let params = GravityParams::new(cfg.g, cfg.dt)?;
        check_positive("world width", cfg.world[0])?;
        check_positive("world height", cfg.world[1])?;

        // Primaries: fixed bodies first, then orbiters around named anchors
        let mut bodies = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| body_from_config(bc, i, cfg.trail_limit))
            .collect::<Result<Vec<_>, _>>()?;

        for oc in &cfg.orbits {
            let Some(anchor) = bodies.iter().find(|b| b.is_named(&oc.anchor)) else {
                warn!(anchor = %oc.anchor, "orbit anchor not found, skipping orbit");
                continue;
            };
            let mut orbiter = make_circular_orbit(anchor, oc.r, oc.m, oc.radius, params.g, oc.clockwise)?
                .with_trail_limit(cfg.trail_limit);
            orbiter.name = oc.name.clone();
            info!(name = ?orbiter.name, r = oc.r, speed = orbiter.v.norm(), "placed orbiter");
            bodies.push(orbiter);
        }

        let primary_count = bodies.len();

        Ok(Self {
            params,
            system: System::new(bodies),
            forces: ForceSet::new().with(NewtonianGravity { g: params.g }),
            primary_count,
            world: (cfg.world[0], cfg.world[1]),
            trail_limit: cfg.trail_limit,
            launches: cfg.launches,
            deflections: cfg.deflections,
            outcome: GravityOutcome::default(),
        })
    }

    pub fn asteroids(&self) -> &[Body] {
        &self.system.bodies[self.primary_count..]
    }

    pub fn outcome(&self) -> GravityOutcome {
        GravityOutcome {
            remaining_asteroids: self.asteroids().len(),
            t: self.system.t,
            ..self.outcome.clone()
        }
    }

    /// Launch an asteroid now
    pub fn launch(&mut self, lc: &LaunchConfig) {
        let speed = speed_from_kmh(lc.speed_kmh);
        let asteroid = Asteroid {
            diameter_m: lc.diameter_m.unwrap_or(DEFAULT_DIAMETER_M),
            density: lc.density.unwrap_or(DEFAULT_DENSITY),
        };
        let mut body = make_asteroid(NVec2::new(lc.x[0], lc.x[1]), lc.angle_deg.to_radians(), speed, asteroid)
            .with_trail_limit(self.trail_limit);
        body.name = lc.name.clone();
        info!(name = ?body.name, speed_px_per_tick = speed, "launched asteroid");
        self.system.bodies.push(body);
        self.outcome.launched += 1;
    }

    /// Deflect the most recent asteroid, if any is still in flight
    pub fn deflect_last(&mut self, dc: &DeflectionConfig) {
        if self.system.bodies.len() <= self.primary_count {
            debug!("no asteroid in flight to deflect");
            return;
        }
        let defaults = Impactor::default();
        let impactor = Impactor {
            mass: dc.impactor_mass.unwrap_or(defaults.mass),
            speed: dc.impactor_speed.unwrap_or(defaults.speed),
            beta: dc.beta.unwrap_or(defaults.beta),
        };
        if let Some(target) = self.system.bodies.last_mut() {
            let dv = deflect(target, &impactor);
            info!(name = ?target.name, dv_px_per_tick = dv, "deflected asteroid");
            self.outcome.deflected += 1;
        }
    }

    /// One tick: scheduled events, gravity, then collisions and culling
    pub fn step(&mut self, tick: u64) -> Result<(), SimError> {
        let due: Vec<LaunchConfig> = self.launches.iter().filter(|l| l.tick == tick).cloned().collect();
        for lc in &due {
            self.launch(lc);
        }
        let due: Vec<DeflectionConfig> = self.deflections.iter().filter(|d| d.tick == tick).cloned().collect();
        for dc in &due {
            self.deflect_last(dc);
        }

        euler_integrator(&mut self.system, &self.forces, &self.params)?;
        self.handle_collisions_and_culling();
        debug!(tick, asteroids = self.asteroids().len(), "gravity tick");
        Ok(())
    }

    fn handle_collisions_and_culling(&mut self) {
        let (primaries, asteroids) = self.system.bodies.split_at(self.primary_count);
        let mut keep = Vec::with_capacity(asteroids.len());

        for asteroid in asteroids {
            match primaries.iter().find(|p| circles_overlap(asteroid, p)) {
                Some(hit) if hit.is_named("earth") => {
                    let a = asteroid.asteroid.unwrap_or(Asteroid {
                        diameter_m: DEFAULT_DIAMETER_M,
                        density: DEFAULT_DENSITY,
                    });
                    let v_mps = px_per_tick_to_mps(asteroid.v.norm());
                    let effects = impact_effects(a.diameter_m, a.density, v_mps, IMPACT_ANGLE_DEG);
                    info!(
                        name = ?asteroid.name,
                        yield_kt = effects.yield_kt,
                        crater_km = effects.crater_diameter_km,
                        "earth impact"
                    );
                    self.outcome.earth_impacts.push(effects);
                }
                Some(hit) => {
                    info!(name = ?asteroid.name, target = ?hit.name, "asteroid absorbed");
                    self.outcome.other_collisions += 1;
                }
                None if !in_bounds(asteroid, self.world.0, self.world.1) => {
                    debug!(name = ?asteroid.name, "asteroid left the world");
                    self.outcome.culled += 1;
                }
                None => keep.push(asteroid.clone()),
            }
        }

        self.system.bodies.truncate(self.primary_count);
        self.system.bodies.extend(keep);
    }

    pub fn run(&mut self, ticks: u64) -> Result<GravityOutcome, SimError> {
        for tick in 0..ticks {
            self.step(tick)?;
        }
        Ok(self.outcome())
    }
}

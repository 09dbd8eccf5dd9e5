use orbswarm::geometry::{NVec2, Rect};
use orbswarm::gravity::collision::{circles_overlap, in_bounds};
use orbswarm::gravity::impact::{blast_radii_km, crater_diameter_km, impact_effects, mass_from_diameter, tnt_kilotons};
use orbswarm::gravity::launch::{deflect, delta_v_kinetic, make_asteroid, speed_from_kmh, Impactor};
use orbswarm::gravity::{
    advance_gravity, euler_integrator, make_circular_orbit, orbital_period, pairwise_force, Asteroid, Body, ForceSet,
    GravityParams, NewtonianGravity, System,
};
use orbswarm::scenario::Scenario;
use orbswarm::steering::behaviors::{alignment, cohesion, nearest_resource, separation};
use orbswarm::steering::{
    advance_resource, advance_steering, broadcast_signals, contacting_agents, expire_signals, kill_agent,
    steering_force, stomp, Agent, AgentSpawner, Resource, SpatialGrid, SteeringParams, WorldBounds,
};
use orbswarm::{ScenarioConfig, SimError};

/// Body at rest with an unbounded trail
pub fn body_at(x: f64, y: f64, m: f64) -> Body {
    Body::new(NVec2::new(x, y), NVec2::zeros(), m, 5.0)
}

/// Earth-like anchor used by the orbit tests
pub fn earth() -> Body {
    body_at(400.0, 300.0, 10_000.0).named("earth")
}

/// Steering params with a large world so bounds never interfere
pub fn open_params() -> SteeringParams {
    SteeringParams {
        max_speed: 5.0,
        max_force: 1.0,
        bounds: WorldBounds {
            min: NVec2::new(-1_000.0, -1_000.0),
            max: NVec2::new(1_000.0, 1_000.0),
            margin: 0.0,
        },
        ..SteeringParams::default()
    }
}

pub fn agents_at(spawner: &mut AgentSpawner, points: &[(f64, f64)]) -> Vec<Agent> {
    points
        .iter()
        .map(|&(x, y)| spawner.spawn(NVec2::new(x, y), NVec2::zeros()))
        .collect()
}

fn assert_finite(v: &NVec2) {
    assert!(v.x.is_finite() && v.y.is_finite(), "non-finite vector {:?}", v);
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_force_is_symmetric() {
    let a = body_at(0.0, 0.0, 3.0);
    let b = body_at(3.0, 4.0, 5.0);

    let f_ab = pairwise_force(&a, &b, 0.1);
    let f_ba = pairwise_force(&b, &a, 0.1);

    assert!((f_ab + f_ba).norm() < 1e-12, "forces not opposite: {:?} {:?}", f_ab, f_ba);
    // F = G m1 m2 / d^2 = 0.1 * 15 / 25
    assert!((f_ab.norm() - 0.06).abs() < 1e-12);
    assert!(f_ab.dot(&(b.x - a.x)) > 0.0, "force on a should point toward b");
}

#[test]
fn gravity_net_force_is_zero() {
    let bodies = vec![body_at(0.0, 0.0, 2.0), body_at(10.0, 0.0, 3.0), body_at(4.0, 7.0, 11.0)];
    let forces = ForceSet::new().with(NewtonianGravity { g: 0.1 });

    let mut out = vec![NVec2::zeros(); 3];
    forces.accumulate_forces(&bodies, &mut out);

    let net = out.iter().fold(NVec2::zeros(), |acc, f| acc + f);
    assert!(net.norm() < 1e-12, "net force not zero: {:?}", net);
}

#[test]
fn gravity_inverse_square_law() {
    let near = pairwise_force(&body_at(0.0, 0.0, 1.0), &body_at(1.0, 0.0, 1.0), 0.1);
    let far = pairwise_force(&body_at(0.0, 0.0, 1.0), &body_at(2.0, 0.0, 1.0), 0.1);

    let ratio = near.norm() / far.norm();
    assert!((ratio - 4.0).abs() < 1e-9, "expected 4x, got {}", ratio);
}

#[test]
fn coincident_bodies_produce_no_force() {
    let a = body_at(50.0, 50.0, 10.0);
    let b = body_at(50.0, 50.0, 20.0);
    assert_eq!(pairwise_force(&a, &b, 0.1), NVec2::zeros());

    let mut bodies = vec![a, b];
    advance_gravity(&mut bodies, 1.0, 0.1).unwrap();
    for b in &bodies {
        assert_finite(&b.x);
        assert_finite(&b.v);
        assert_eq!(b.v, NVec2::zeros());
    }
}

#[test]
fn near_coincident_bodies_stay_finite() {
    // d^2 = 1e-310 is subnormal; G m1 m2 / d^3 overflows
    let a = body_at(0.0, 0.0, 1.0);
    let b = body_at(1e-155, 0.0, 1.0);
    assert_eq!(pairwise_force(&a, &b, 0.1), NVec2::zeros());

    let mut bodies = vec![a, b];
    advance_gravity(&mut bodies, 1.0, 0.1).unwrap();
    for b in &bodies {
        assert_finite(&b.x);
        assert_finite(&b.v);
    }
}

#[test]
fn huge_masses_do_not_overflow_into_nan() {
    let mut bodies = vec![body_at(0.0, 0.0, 1e300), body_at(1.0, 0.0, 1e300)];
    assert_finite(&pairwise_force(&bodies[0], &bodies[1], 0.1));

    advance_gravity(&mut bodies, 1.0, 0.1).unwrap();
    for b in &bodies {
        assert_finite(&b.x);
        assert_finite(&b.v);
    }
}

#[test]
fn body_at_rest_falls_toward_other_body() {
    let mut bodies = vec![body_at(400.0, 300.0, 10_000.0), body_at(600.0, 300.0, 100.0)];

    let mut last = (bodies[1].x - bodies[0].x).norm();
    for _ in 0..50 {
        advance_gravity(&mut bodies, 1.0, 0.1).unwrap();
        let d = (bodies[1].x - bodies[0].x).norm();
        assert!(d < last, "distance did not shrink: {} -> {}", last, d);
        last = d;
    }
}

#[test]
fn invalid_mass_is_rejected_without_mutation() {
    let mut bodies = vec![body_at(0.0, 0.0, 10.0), body_at(10.0, 0.0, 0.0)];

    let err = advance_gravity(&mut bodies, 1.0, 0.1).unwrap_err();
    assert_eq!(err, SimError::InvalidMass { index: 1, mass: 0.0 });

    assert_eq!(bodies[0].x, NVec2::new(0.0, 0.0));
    assert_eq!(bodies[0].v, NVec2::zeros());
    assert!(bodies[0].trail.is_empty());
}

#[test]
fn invalid_step_parameters_are_rejected() {
    let mut bodies = vec![body_at(0.0, 0.0, 10.0)];
    assert!(matches!(advance_gravity(&mut bodies, 0.0, 0.1), Err(SimError::InvalidConfiguration(_))));
    assert!(matches!(advance_gravity(&mut bodies, 1.0, f64::NAN), Err(SimError::InvalidConfiguration(_))));
}

#[test]
fn empty_body_set_is_a_no_op() {
    let mut bodies: Vec<Body> = Vec::new();
    assert!(advance_gravity(&mut bodies, 1.0, 0.1).is_ok());
}

#[test]
fn trail_records_each_tick_and_honours_limit() {
    let mut bodies = vec![
        body_at(0.0, 0.0, 1_000.0).with_trail_limit(Some(3)),
        body_at(100.0, 0.0, 1.0),
    ];
    for _ in 0..5 {
        advance_gravity(&mut bodies, 1.0, 0.1).unwrap();
    }
    assert_eq!(bodies[0].trail.len(), 3);
    assert_eq!(bodies[0].trail.last(), Some(&bodies[0].x));
    assert_eq!(bodies[1].trail.len(), 5);
}

#[test]
fn euler_integrator_advances_time() {
    let mut sys = System::new(vec![body_at(0.0, 0.0, 10.0), body_at(10.0, 0.0, 10.0)]);
    let forces = ForceSet::new().with(NewtonianGravity { g: 0.1 });
    let params = GravityParams::new(0.1, 0.5).unwrap();

    for _ in 0..4 {
        euler_integrator(&mut sys, &forces, &params).unwrap();
    }
    assert!((sys.t - 2.0).abs() < 1e-12);
}

// ==================================================================================
// Orbit tests
// ==================================================================================

#[test]
fn circular_orbit_speed_and_direction() {
    let anchor = earth();
    let moon = make_circular_orbit(&anchor, 120.0, 100.0, 8.0, 0.1, true).unwrap();

    let expected = (0.1_f64 * 10_000.0 / 120.0).sqrt();
    assert!((moon.v.norm() - expected).abs() < 1e-12);
    assert!((moon.v.norm() - 2.8868).abs() < 1e-4);

    let radial = moon.x - anchor.x;
    assert!((radial.norm() - 120.0).abs() < 1e-12);
    assert_eq!(radial.dot(&moon.v), 0.0, "velocity must be purely tangential");
    assert!(moon.v.y < 0.0, "clockwise orbiter moves toward -y");

    let ccw = make_circular_orbit(&anchor, 120.0, 100.0, 8.0, 0.1, false).unwrap();
    assert!(ccw.v.y > 0.0);
}

#[test]
fn circular_orbit_rejects_bad_input() {
    let anchor = earth();
    assert!(matches!(
        make_circular_orbit(&anchor, 0.0, 1.0, 1.0, 0.1, true),
        Err(SimError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        make_circular_orbit(&anchor, 100.0, -1.0, 1.0, 0.1, true),
        Err(SimError::InvalidMass { .. })
    ));
    let massless = body_at(0.0, 0.0, 0.0);
    assert!(matches!(
        make_circular_orbit(&massless, 100.0, 1.0, 1.0, 0.1, true),
        Err(SimError::InvalidMass { .. })
    ));
}

#[test]
fn orbiter_returns_after_one_period() {
    let g = 0.1;
    let anchor = body_at(0.0, 0.0, 10_000.0).with_trail_limit(Some(1));
    let orbiter = make_circular_orbit(&anchor, 120.0, 1e-3, 1.0, g, true)
        .unwrap()
        .with_trail_limit(Some(1));
    let start = orbiter.x;

    let dt = 0.01;
    let period = orbital_period(anchor.m, 120.0, g);
    assert!((period - 2.0 * std::f64::consts::PI * 1728.0_f64.sqrt()).abs() < 1e-9);

    let steps = (period / dt).round() as usize;
    let mut bodies = vec![anchor, orbiter];
    for _ in 0..steps {
        advance_gravity(&mut bodies, dt, g).unwrap();
    }

    let miss = (bodies[1].x - start).norm();
    assert!(miss < 0.5, "orbiter missed its start by {} px", miss);
    let r = (bodies[1].x - bodies[0].x).norm();
    assert!((r - 120.0).abs() < 0.5, "orbit radius drifted to {}", r);
}

// ==================================================================================
// Launch / deflection / impact tests
// ==================================================================================

#[test]
fn launch_points_up_the_screen() {
    let a = Asteroid { diameter_m: 150.0, density: 3_000.0 };
    let body = make_asteroid(NVec2::new(400.0, 580.0), std::f64::consts::FRAC_PI_2, 2.0, a);
    assert!(body.v.x.abs() < 1e-12);
    assert!((body.v.y + 2.0).abs() < 1e-12);
    assert_eq!(body.asteroid, Some(a));
}

#[test]
fn missing_feed_speed_falls_back() {
    assert!((speed_from_kmh(None) - 0.6).abs() < 1e-12);
    assert!((speed_from_kmh(Some(f64::NAN)) - 0.6).abs() < 1e-12);
    assert!((speed_from_kmh(Some(100_000.0)) - 3.0).abs() < 1e-12);
}

#[test]
fn kinetic_deflection_matches_momentum_estimate() {
    assert!((delta_v_kinetic(1e6, 1e4, 1e9, 3.0) - 30.0).abs() < 1e-9);
    assert_eq!(delta_v_kinetic(1e6, 1e4, 0.0, 3.0), 0.0);

    let mut body = body_at(0.0, 0.0, 2.0);
    body.v = NVec2::new(1.0, 0.0);
    let dv = deflect(&mut body, &Impactor::default());

    assert!(dv > 0.0);
    assert!((body.v.x - 1.0).abs() < 1e-9, "deflection must be perpendicular");
    assert!((body.v.y - dv).abs() < 1e-12);
}

#[test]
fn impact_effects_scale_with_yield() {
    let m = mass_from_diameter(150.0, 3_000.0);
    assert!((m - std::f64::consts::PI / 6.0 * 3_000.0 * 3_375_000.0).abs() < 1e-3);

    assert!((tnt_kilotons(4.184e12) - 1.0).abs() < 1e-12);
    assert!((crater_diameter_km(1_000.0) - 1.3).abs() < 1e-12);
    assert_eq!(crater_diameter_km(0.0), 0.0);

    let rings = blast_radii_km(1_000.0);
    let radii: Vec<f64> = rings.iter().map(|r| r.radius_km).collect();
    assert!((radii[0] - 3.0).abs() < 1e-12 && (radii[1] - 5.0).abs() < 1e-12 && (radii[2] - 12.0).abs() < 1e-12);

    let effects = impact_effects(150.0, 3_000.0, 20_000.0, 90.0);
    assert!((effects.energy_j - 0.5 * m * 4e8).abs() / effects.energy_j < 1e-12);
    assert_eq!(effects.blast_rings.len(), 3);
}

#[test]
fn overlap_and_bounds_checks() {
    let a = Body::new(NVec2::new(0.0, 0.0), NVec2::zeros(), 1.0, 5.0);
    let b = Body::new(NVec2::new(9.0, 0.0), NVec2::zeros(), 1.0, 5.0);
    let c = Body::new(NVec2::new(10.0, 0.0), NVec2::zeros(), 1.0, 5.0);
    assert!(circles_overlap(&a, &b));
    assert!(!circles_overlap(&a, &c));

    assert!(in_bounds(&b, 800.0, 600.0));
    let out = Body::new(NVec2::new(-1.0, 10.0), NVec2::zeros(), 1.0, 5.0);
    assert!(!in_bounds(&out, 800.0, 600.0));
}

// ==================================================================================
// Steering tests
// ==================================================================================

#[test]
fn lone_agent_seeks_goal_within_force_limit() {
    let params = open_params();
    let mut spawner = AgentSpawner::new();
    let mut agents = agents_at(&mut spawner, &[(0.0, 0.0)]);
    let goal = NVec2::new(100.0, 0.0);

    let force = steering_force(0, &agents, &[], &[], goal, 0, &params);
    assert!(force.norm() <= 1.0 + 1e-12);
    assert!(force.x > 0.0 && force.y.abs() < 1e-12);

    advance_steering(&mut agents, &[], &mut [], goal, 0, &params);
    let a = &agents[0];
    assert!((a.velocity.x - 1.0).abs() < 1e-12);
    assert!((a.position.x - 1.0).abs() < 1e-12);
    assert_eq!(a.acceleration, NVec2::zeros());
}

#[test]
fn speed_never_exceeds_max_and_agents_stay_inside() {
    let params = SteeringParams {
        max_speed: 4.0,
        max_force: 2.0,
        bounds: WorldBounds::new(400.0, 300.0, 10.0),
        ..SteeringParams::default()
    }
    .validate()
    .unwrap();

    let mut spawner = AgentSpawner::new();
    let mut agents: Vec<Agent> = (0..40)
        .map(|i| {
            let f = i as f64;
            let p = NVec2::new(200.0 + (f * 0.37).sin() * 150.0, 150.0 + (f * 0.13).cos() * 120.0);
            let v = NVec2::new((f * 1.7).cos(), (f * 1.7).sin()) * 50.0;
            spawner.spawn(p, v)
        })
        .collect();
    // two agents on the same spot
    agents[1].position = agents[0].position;

    let blocks = vec![Rect::new(150.0, 100.0, 40.0, 80.0)];
    let mut resources = vec![Resource::new(NVec2::new(250.0, 150.0), 10.0, 5).unwrap()];

    for tick in 0..200 {
        advance_steering(&mut agents, &blocks, &mut resources, NVec2::new(380.0, 20.0), tick * 16, &params);
        for a in &agents {
            assert_finite(&a.position);
            assert_finite(&a.velocity);
            assert!(a.speed() <= params.max_speed + 1e-9, "speed {} over cap", a.speed());
            assert!(params.bounds.contains_inner(&a.position), "agent escaped: {:?}", a.position);
        }
    }
}

#[test]
fn agent_reflects_off_the_boundary() {
    let params = SteeringParams {
        max_speed: 5.0,
        max_force: 0.01,
        bounds: WorldBounds::new(100.0, 100.0, 10.0),
        ..SteeringParams::default()
    };
    let mut spawner = AgentSpawner::new();
    let mut agents = vec![spawner.spawn(NVec2::new(88.0, 50.0), NVec2::new(5.0, 0.0))];

    advance_steering(&mut agents, &[], &mut [], NVec2::new(50.0, 50.0), 0, &params);
    assert_eq!(agents[0].position.x, 90.0);
    assert!(agents[0].velocity.x < 0.0);
}

#[test]
fn agent_is_pushed_out_of_blocks() {
    let params = open_params();
    let mut spawner = AgentSpawner::new();
    let mut agents = vec![spawner.spawn(NVec2::new(11.0, 50.0), NVec2::zeros())];
    let blocks = vec![Rect::new(10.0, 0.0, 100.0, 100.0)];

    advance_steering(&mut agents, &blocks, &mut [], NVec2::new(11.0, 50.0), 0, &params);
    let p = agents[0].position;
    assert!(!blocks[0].inflate(params.agent_radius - 1e-9).contains(&p), "agent still inside block at {:?}", p);
    assert!(agents[0].velocity.x <= 0.0);
}

#[test]
fn coincident_agents_do_not_produce_nan() {
    let params = open_params();
    let mut spawner = AgentSpawner::new();
    let mut agents = agents_at(&mut spawner, &[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);

    advance_steering(&mut agents, &[], &mut [], NVec2::new(5.0, 5.0), 0, &params);
    for a in &agents {
        assert_finite(&a.position);
        assert_finite(&a.velocity);
    }
}

#[test]
fn validate_rejects_bad_params() {
    let negative = SteeringParams { separation_radius: -1.0, ..SteeringParams::default() };
    assert!(matches!(negative.validate(), Err(SimError::InvalidConfiguration(_))));

    let stalled = SteeringParams { max_speed: 0.0, ..SteeringParams::default() };
    assert!(stalled.validate().is_err());

    let no_interval = SteeringParams { damage_interval_ms: 0, ..SteeringParams::default() };
    assert!(no_interval.validate().is_err());

    let cramped = SteeringParams { bounds: WorldBounds::new(10.0, 10.0, 6.0), ..SteeringParams::default() };
    assert!(cramped.validate().is_err());

    assert!(SteeringParams::default().validate().is_ok());
    assert!(SteeringParams { max_force: f64::NAN, ..SteeringParams::default() }.check().is_err());
}

#[test]
fn alignment_turns_toward_mean_heading_of_neighbors() {
    let params = open_params();
    let mut spawner = AgentSpawner::new();
    let mut agents = agents_at(&mut spawner, &[(0.0, 0.0), (10.0, 0.0), (100.0, 0.0)]);
    agents[0].velocity = NVec2::new(1.0, 0.0);
    agents[1].velocity = NVec2::new(0.0, 2.0);
    agents[2].velocity = NVec2::new(-5.0, 0.0); // outside neighbor_radius

    let force = alignment(0, &agents, &[0, 1, 2], &params);
    // desired (0, max_speed) minus current (1, 0), clamped to max_force
    let expected = NVec2::new(-1.0, 5.0).normalize() * params.max_force;
    assert!((force - expected).norm() < 1e-12, "got {:?}, expected {:?}", force, expected);

    assert_eq!(alignment(0, &agents, &[0, 2], &params), NVec2::zeros());
}

#[test]
fn cohesion_points_at_the_centroid() {
    let params = open_params();
    let mut spawner = AgentSpawner::new();
    let agents = agents_at(&mut spawner, &[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (-200.0, 0.0)]);

    // centroid of the two in-range neighbors is (5, 5)
    let force = cohesion(0, &agents, &[0, 1, 2, 3], &params);
    let expected = NVec2::new(1.0, 1.0).normalize() * params.max_force;
    assert!((force - expected).norm() < 1e-12, "got {:?}", force);

    assert_eq!(cohesion(0, &agents, &[0], &params), NVec2::zeros());
}

#[test]
fn separation_is_weighted_by_inverse_distance() {
    let params = open_params();
    let mut spawner = AgentSpawner::new();
    // near neighbor at d = 5, far one at d = 20, and one outside separation_radius
    let agents = agents_at(&mut spawner, &[(0.0, 0.0), (5.0, 0.0), (0.0, -20.0), (0.0, 30.0)]);

    let force = separation(0, &agents, &[0, 1, 2, 3], &[], &params);
    // (-1, 0) / 5 + (0, 1) / 20 points along (-4, 1)
    let expected = NVec2::new(-4.0, 1.0).normalize() * params.max_force;
    assert!((force - expected).norm() < 1e-12, "got {:?}", force);
    assert!(force.x.abs() > force.y.abs(), "nearer neighbor must dominate");
}

#[test]
fn separation_keeps_clear_of_nearby_blocks() {
    let params = open_params();
    let mut spawner = AgentSpawner::new();
    let agents = agents_at(&mut spawner, &[(0.0, 0.0)]);

    // closest point (10, 0) is inside object_separation_radius
    let near = Rect::new(10.0, -50.0, 20.0, 100.0);
    let force = separation(0, &agents, &[0], &[near], &params);
    assert!((force - NVec2::new(-params.max_force, 0.0)).norm() < 1e-12, "got {:?}", force);

    // closest point (40, 0) is beyond it
    let far = Rect::new(40.0, -50.0, 20.0, 100.0);
    assert_eq!(separation(0, &agents, &[0], &[far], &params), NVec2::zeros());
}

#[test]
fn spatial_grid_matches_brute_force() {
    let positions: Vec<NVec2> = (-20..20)
        .flat_map(|i| (-20..20).map(move |j| NVec2::new(i as f64 * 2.5, j as f64 * 2.5)))
        .collect();
    let grid = SpatialGrid::build(positions.iter().copied(), 10.0);

    let queries = [
        (NVec2::new(15.0, 15.0), 10.0),
        (NVec2::new(-3.0, -3.0), 7.5),
        (NVec2::zeros(), 25.0),
        (NVec2::new(0.3, -9.9), 0.0),
    ];
    for (center, radius) in queries {
        let mut found = grid.query(&positions, &center, radius);
        found.sort_unstable();
        let expected: Vec<usize> = (0..positions.len())
            .filter(|&i| (positions[i] - center).norm_squared() <= radius * radius)
            .collect();
        assert_eq!(found, expected, "query at {:?} r = {}", center, radius);
    }

    // exactly on the radius counts
    let edge = positions.iter().position(|p| *p == NVec2::new(25.0, 15.0)).unwrap();
    assert!(grid.query(&positions, &NVec2::new(15.0, 15.0), 10.0).contains(&edge));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "invalid params")]
fn unvalidated_params_are_caught_in_debug_builds() {
    let params = SteeringParams { max_speed: -1.0, ..open_params() };
    let mut spawner = AgentSpawner::new();
    let mut agents = agents_at(&mut spawner, &[(0.0, 0.0)]);
    advance_steering(&mut agents, &[], &mut [], NVec2::zeros(), 0, &params);
}

// ==================================================================================
// Broadcast tests
// ==================================================================================

#[test]
fn signal_spreads_along_a_chain_in_one_tick() {
    let mut spawner = AgentSpawner::new();
    let mut agents = agents_at(
        &mut spawner,
        &[(0.0, 0.0), (30.0, 0.0), (60.0, 0.0), (90.0, 0.0), (120.0, 0.0), (500.0, 0.0)],
    );
    let goal = NVec2::new(300.0, 300.0);
    agents[0].signal(goal, 0);

    let newly = broadcast_signals(&mut agents, 16, 40.0);
    let ids: Vec<u32> = newly.iter().map(|id| id.0).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    for a in &agents[..5] {
        assert!(a.signaled);
        assert_eq!(a.goal, goal);
        assert_eq!(a.signal_time, Some(0), "relays keep the origin timestamp");
    }
    assert!(!agents[5].signaled);

    // Nobody is signaled twice
    assert!(broadcast_signals(&mut agents, 32, 40.0).is_empty());
}

#[test]
fn chained_signals_expire_together() {
    let params = SteeringParams { signal_duration_ms: Some(1_000), ..open_params() };
    let mut spawner = AgentSpawner::new();
    let mut agents = agents_at(&mut spawner, &[(0.0, 0.0), (30.0, 0.0), (60.0, 0.0)]);
    agents[0].signal(NVec2::new(10.0, 10.0), 0);
    broadcast_signals(&mut agents, 500, 40.0);

    assert_eq!(expire_signals(&mut agents, 999, &params), 0);
    assert_eq!(expire_signals(&mut agents, 1_000, &params), 3);
    assert!(agents.iter().all(|a| !a.signaled));

    // and do not come back on the next tick
    let report = advance_steering(&mut agents, &[], &mut [], NVec2::zeros(), 1_016, &params);
    assert!(report.newly_signaled.is_empty());
}

#[test]
fn signaled_agent_seeks_its_own_goal() {
    let params = open_params();
    let mut spawner = AgentSpawner::new();
    let mut agents = agents_at(&mut spawner, &[(0.0, 0.0)]);
    agents[0].signal(NVec2::new(0.0, -100.0), 0);

    let force = steering_force(0, &agents, &[], &[], NVec2::new(100.0, 0.0), 0, &params);
    assert!(force.y < 0.0 && force.x.abs() < 1e-12);
}

// ==================================================================================
// Resource tests
// ==================================================================================

#[test]
fn sustained_contact_damages_once_per_interval() {
    let mut spawner = AgentSpawner::new();
    let agent = spawner.spawn(NVec2::new(0.0, 0.0), NVec2::zeros());
    let mut food = Resource::new(NVec2::new(0.0, 0.0), 10.0, 20).unwrap();

    let mut dealt = 0;
    for now in (0..=3_500).step_by(100) {
        dealt += advance_resource(&mut food, &[agent.id], now, 1_000);
    }
    assert_eq!(dealt, 3);
    assert_eq!(food.health(), 17);
}

#[test]
fn sustained_contact_with_fine_ticks() {
    let mut spawner = AgentSpawner::new();
    let agent = spawner.spawn(NVec2::zeros(), NVec2::zeros());
    let mut food = Resource::new(NVec2::zeros(), 10.0, 20).unwrap();

    for now in (0..=3_500).step_by(16) {
        advance_resource(&mut food, &[agent.id], now, 1_000);
    }
    assert_eq!(food.health(), 17);
}

#[test]
fn interrupted_contact_resets_the_timer() {
    let mut spawner = AgentSpawner::new();
    let agent = spawner.spawn(NVec2::zeros(), NVec2::zeros());
    let mut food = Resource::new(NVec2::zeros(), 10.0, 20).unwrap();

    for now in (0..=900).step_by(100) {
        advance_resource(&mut food, &[agent.id], now, 1_000);
    }
    advance_resource(&mut food, &[], 1_000, 1_000);
    assert_eq!(food.touch_started(agent.id), None);

    for now in (1_100..=2_000).step_by(100) {
        advance_resource(&mut food, &[agent.id], now, 1_000);
    }
    assert_eq!(food.health(), 20, "gap must reset the contact timer");

    advance_resource(&mut food, &[agent.id], 2_100, 1_000);
    assert_eq!(food.health(), 19);
}

#[test]
fn health_never_goes_negative() {
    let mut spawner = AgentSpawner::new();
    let ids: Vec<_> = (0..3).map(|_| spawner.spawn(NVec2::zeros(), NVec2::zeros()).id).collect();
    let mut food = Resource::new(NVec2::zeros(), 10.0, 2).unwrap();

    for now in (0..=5_000).step_by(250) {
        advance_resource(&mut food, &ids, now, 1_000);
    }
    assert_eq!(food.health(), 0);
    assert!(food.is_depleted());
    assert_eq!(advance_resource(&mut food, &ids, 6_000, 1_000), 0);

    food.reset();
    assert_eq!(food.health(), 2);
}

#[test]
fn contact_uses_both_radii() {
    let mut spawner = AgentSpawner::new();
    let agents = agents_at(&mut spawner, &[(14.0, 0.0), (16.0, 0.0)]);
    let food = Resource::new(NVec2::zeros(), 10.0, 5).unwrap();

    let touching = contacting_agents(&food, &agents, 5.0);
    assert_eq!(touching, vec![agents[0].id]);
}

#[test]
fn agent_pushes_resource_toward_goal() {
    let params = open_params();
    let mut spawner = AgentSpawner::new();
    let mut agents = agents_at(&mut spawner, &[(95.0, 0.0)]);
    let mut resources = vec![Resource::new(NVec2::new(100.0, 0.0), 5.0, 10).unwrap()];

    let report = advance_steering(&mut agents, &[], &mut resources, NVec2::new(200.0, 0.0), 0, &params);
    assert_eq!(report.pushes, 1);
    assert!((resources[0].position.x - (100.0 + params.object_push_force)).abs() < 1e-12);
    assert_eq!(resources[0].position.y, 0.0);
}

#[test]
fn parked_resources_stop_attracting() {
    let params = open_params();
    let mut food = Resource::new(NVec2::new(10.0, 0.0), 5.0, 10).unwrap();
    food.parked_since = Some(0);

    assert!(nearest_resource(&NVec2::zeros(), std::slice::from_ref(&food), 1_000, &params).is_some());
    let late = 1 + params.park_grace_ms;
    assert!(nearest_resource(&NVec2::zeros(), std::slice::from_ref(&food), late, &params).is_none());
}

// ==================================================================================
// Kill tests
// ==================================================================================

#[test]
fn stomp_removes_agents_inside_radius() {
    let mut spawner = AgentSpawner::new();
    let mut agents = agents_at(&mut spawner, &[(0.0, 0.0), (10.0, 0.0), (30.0, 0.0)]);

    let events = stomp(&mut agents, NVec2::zeros(), 15.0);
    assert_eq!(events.len(), 2);
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].position, NVec2::new(30.0, 0.0));

    let id = agents[0].id;
    let event = kill_agent(&mut agents, id).unwrap();
    assert_eq!(event.id, id);
    assert!(agents.is_empty());
    assert!(kill_agent(&mut agents, id).is_none());
}

#[test]
fn negative_stomp_radius_kills_nothing() {
    let mut spawner = AgentSpawner::new();
    let mut agents = agents_at(&mut spawner, &[(0.0, 0.0), (5.0, 0.0)]);

    assert!(stomp(&mut agents, NVec2::zeros(), -10.0).is_empty());
    assert!(stomp(&mut agents, NVec2::zeros(), f64::NAN).is_empty());
    assert_eq!(agents.len(), 2);

    // zero radius still hits an agent standing on the center
    assert_eq!(stomp(&mut agents, NVec2::zeros(), 0.0).len(), 1);
}

#[test]
fn spawner_hands_out_unique_ids() {
    let mut spawner = AgentSpawner::new();
    let a = spawner.spawn(NVec2::zeros(), NVec2::zeros());
    let b = spawner.spawn(NVec2::zeros(), NVec2::zeros());
    assert_ne!(a.id, b.id);
    assert!(b.id > a.id);
}

// ==================================================================================
// Scenario tests
// ==================================================================================

const EARTH_ONLY: &str = r#"
run:
  ticks: 400
gravity:
  G: 0.1
  world: [800, 600]
  bodies:
    - name: earth
      x: [400, 300]
      m: 10000
      radius: 20
  launches:
    - tick: 0
      x: [400, 580]
      angle_deg: 90
      speed_kmh: 60000
    - tick: 0
      x: [400, 580]
      angle_deg: 270
      speed_kmh: 60000
"#;

#[test]
fn scenario_asteroid_hits_earth_and_stray_is_culled() {
    let cfg = ScenarioConfig::from_yaml_str(EARTH_ONLY).unwrap();
    let mut scenario = Scenario::build_scenario(cfg).unwrap();
    let outcome = scenario.run(None).unwrap();

    let g = outcome.gravity.unwrap();
    assert_eq!(g.launched, 2);
    assert_eq!(g.earth_impacts.len(), 1);
    assert!(g.earth_impacts[0].yield_kt > 0.0);
    assert_eq!(g.culled, 1);
    assert_eq!(g.remaining_asteroids, 0);
    assert!((g.t - 400.0).abs() < 1e-9);
    assert!(outcome.swarm.is_none());
}

#[test]
fn scenario_launches_fire_on_their_tick_in_any_order() {
    let yaml = r#"
run:
  ticks: 10
gravity:
  bodies:
    - name: earth
      x: [400, 300]
      m: 10000
      radius: 20
  launches:
    - tick: 5
      x: [100, 100]
      angle_deg: 0
    - tick: 2
      x: [100, 200]
      angle_deg: 0
"#;
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    let mut scenario = Scenario::build_scenario(cfg).unwrap();
    let g = scenario.gravity.as_mut().unwrap();

    for tick in 0..3 {
        g.step(tick).unwrap();
    }
    assert_eq!(g.asteroids().len(), 1);
    assert!((g.asteroids()[0].x.y - 200.0).abs() < 1.0);

    for tick in 3..10 {
        g.step(tick).unwrap();
    }
    assert_eq!(g.outcome().launched, 2);
    assert_eq!(g.asteroids().len(), 2);
}

#[test]
fn scenario_places_moon_on_orbit() {
    let yaml = r#"
gravity:
  bodies:
    - name: earth
      x: [400, 300]
      m: 10000
      radius: 20
  orbits:
    - name: moon
      anchor: earth
      r: 120
      m: 100
      radius: 8
    - anchor: pluto
      r: 50
      m: 1
      radius: 1
"#;
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();
    let g = scenario.gravity.as_ref().unwrap();

    // unknown anchor is skipped
    assert_eq!(g.primary_count, 2);
    let moon = &g.system.bodies[1];
    assert!(moon.is_named("moon"));
    assert!((moon.v.norm() - 2.8868).abs() < 1e-4);
}

#[test]
fn scenario_rejects_invalid_mass() {
    let yaml = r#"
gravity:
  bodies:
    - x: [0, 0]
      m: -5
      radius: 3
"#;
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    assert!(matches!(Scenario::build_scenario(cfg), Err(SimError::InvalidMass { index: 0, .. })));
}

#[test]
fn scenario_needs_a_section() {
    let cfg = ScenarioConfig::from_yaml_str("run:\n  ticks: 5\n").unwrap();
    assert!(Scenario::build_scenario(cfg).is_err());
}

#[test]
fn swarm_scenario_stomp_and_damage() {
    let yaml = r#"
run:
  ticks: 120
  tick_ms: 100
swarm:
  goal: [400, 300]
  params:
    max_speed: 2.0
    world: [800, 600]
  agents:
    count: 12
    center: [400, 300]
    spread: 10
  resources:
    - x: [400, 300]
      radius: 30
      health: 3
  stomps:
    - tick: 60
      x: [400, 300]
      radius: 1000
"#;
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    let mut scenario = Scenario::build_scenario(cfg).unwrap();
    let outcome = scenario.run(None).unwrap();

    let s = outcome.swarm.unwrap();
    assert_eq!(s.ticks, 120);
    assert_eq!(s.killed, 12);
    assert_eq!(s.remaining_agents, 0);
    assert_eq!(s.resources_depleted, 1);
    assert_eq!(s.remaining_resources, 0);
    assert_eq!(s.damage_dealt, 3);
}

#[test]
fn swarm_scenario_rejects_negative_radius() {
    let yaml = r#"
swarm:
  goal: [400, 300]
  params:
    neighbor_radius: -3
  agents:
    count: 3
    center: [100, 100]
"#;
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    assert!(matches!(Scenario::build_scenario(cfg), Err(SimError::InvalidConfiguration(_))));
}

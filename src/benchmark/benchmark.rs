//! Wall-clock timing of both kernels across growing counts
//! Output is CSV so it can be pasted into a spreadsheet

use std::time::Instant;

use crate::geometry::NVec2;
use crate::gravity::{advance_gravity, Body};
use crate::steering::{advance_steering, Agent, AgentSpawner, SteeringParams, WorldBounds};

/// Deterministic positions, no rand needed
fn make_bodies(n: usize) -> Vec<Body> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec2::new(400.0 + (i_f * 0.37).sin() * 250.0, 300.0 + (i_f * 0.13).cos() * 250.0);
            Body::new(x, NVec2::zeros(), 1.0 + (i % 7) as f64, 3.0).with_trail_limit(Some(64))
        })
        .collect()
}

fn make_agents(n: usize, spawner: &mut AgentSpawner) -> Vec<Agent> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec2::new(400.0 + (i_f * 0.37).sin() * 350.0, 300.0 + (i_f * 0.13).cos() * 250.0);
            let v = NVec2::new((i_f * 0.07).cos(), (i_f * 0.07).sin());
            spawner.spawn(x, v)
        })
        .collect()
}

/// Average milliseconds per `advance_gravity` tick
pub fn bench_gravity() {
    println!("N,gravity_ms");
    let steps = 20;

    for n in [10, 20, 50, 100, 200, 400, 800] {
        let mut bodies = make_bodies(n);

        // Warm up
        if advance_gravity(&mut bodies, 1.0, 0.1).is_err() {
            continue;
        }

        let t0 = Instant::now();
        for _ in 0..steps {
            if let Err(e) = advance_gravity(&mut bodies, 1.0, 0.1) {
                eprintln!("N = {n}: {e}");
                break;
            }
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;
        println!("{},{:.6}", n, ms);
    }
}

/// Average milliseconds per `advance_steering` tick
pub fn bench_steering() {
    println!("N,steering_ms");
    let steps = 20;
    let params = SteeringParams {
        bounds: WorldBounds::new(800.0, 600.0, 10.0),
        ..SteeringParams::default()
    };
    let goal = NVec2::new(700.0, 300.0);

    for n in [50, 100, 200, 400, 800, 1600, 3200] {
        let mut spawner = AgentSpawner::new();
        let mut agents = make_agents(n, &mut spawner);

        // Warm up
        advance_steering(&mut agents, &[], &mut [], goal, 0, &params);

        let t0 = Instant::now();
        for step in 0..steps {
            advance_steering(&mut agents, &[], &mut [], goal, step * 16, &params);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;
        println!("{},{:.6}", n, ms);
    }
}

//! Force contributors for the gravity integrator
//!
//! A `ForceSet` sums any number of `Force` terms into one force vector
//! per body. Terms read the start-of-tick snapshot only; nothing is
//! mutated until every term has run.

use crate::geometry::NVec2;
use super::states::Body;

/// Collection of force terms (gravity, thrust, drag, etc.)
/// Each term implements [`Force`] and their contributions are summed
/// into a single force vector per body
#[derive(Default)]
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total forces for all `bodies`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_forces(&self, bodies: &[Body], out: &mut [NVec2]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.force(bodies, out);
        }
    }
}

/// A force source operating on a body snapshot
/// Implementations add their contribution into `out[i]` for each body
pub trait Force {
    fn force(&self, bodies: &[Body], out: &mut [NVec2]);
}

/// Force on `a` exerted by `b` under Newtonian gravity
/// Coincident positions, or a pair so close the force overflows, give a zero vector
pub fn pairwise_force(a: &Body, b: &Body, g: f64) -> NVec2 {
    let r = b.x - a.x; // displacement a -> b
    let d2 = r.norm_squared();
    if d2 == 0.0 || !d2.is_finite() {
        return NVec2::zeros();
    }
    // G m1 m2 / d^3, so that r * scale has magnitude G m1 m2 / d^2
    let scale = g * a.m * b.m / (d2 * d2.sqrt());
    let f = r * scale;
    if scale.is_finite() && f.x.is_finite() && f.y.is_finite() {
        f
    } else {
        NVec2::zeros()
    }
}

/// Unsoftened Newtonian gravity over every unordered pair
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
}

impl Force for NewtonianGravity {
    fn force(&self, bodies: &[Body], out: &mut [NVec2]) {
        let n = bodies.len();
        if n < 2 {
            return;
        }

        // Each pair once; i is pulled along +r, j along -r
        for i in 0..n {
            for j in (i + 1)..n {
                let f = pairwise_force(&bodies[i], &bodies[j], self.g);
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}

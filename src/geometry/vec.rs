//! 2D vector alias and zero-safe helpers
//!
//! nalgebra's `normalize` divides by the norm and yields NaN for a zero
//! vector, so every helper here checks the length first and falls back
//! to a zero vector

use nalgebra::Vector2;

pub type NVec2 = Vector2<f64>;

/// Unit vector along `v`, or zero if `v` has no length
pub fn normalize_or_zero(v: NVec2) -> NVec2 {
    let n = v.norm();
    if n > 0.0 && n.is_finite() {
        v / n
    } else {
        NVec2::zeros()
    }
}

/// Clamp the magnitude of `v` to at most `max`
pub fn limit(v: NVec2, max: f64) -> NVec2 {
    let n2 = v.norm_squared();
    if n2 > max * max {
        normalize_or_zero(v) * max
    } else {
        v
    }
}

/// Rescale `v` to exactly `mag` (zero stays zero)
pub fn set_magnitude(v: NVec2, mag: f64) -> NVec2 {
    normalize_or_zero(v) * mag
}

pub fn distance(a: &NVec2, b: &NVec2) -> f64 {
    (b - a).norm()
}

//! Collision and culling predicates for the driving loop

use crate::geometry::distance;
use super::states::Body;

/// True when the two discs intersect
pub fn circles_overlap(a: &Body, b: &Body) -> bool {
    distance(&a.x, &b.x) < a.radius + b.radius
}

/// True while the body centre is inside `[0, width] x [0, height]`
pub fn in_bounds(body: &Body, width: f64, height: f64) -> bool {
    (0.0..=width).contains(&body.x.x) && (0.0..=height).contains(&body.x.y)
}

//! Shared 2D primitives
//!
//! The only types the gravity and steering kernels have in common:
//! the `NVec2` vector alias, zero-safe vector helpers and `Rect`

pub mod vec;
pub mod rect;

pub use vec::{NVec2, normalize_or_zero, limit, set_magnitude, distance};
pub use rect::Rect;

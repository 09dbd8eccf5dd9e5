//! Error type shared by both kernels
//!
//! Degenerate geometry (coincident positions, zero-length vectors) is not
//! an error: it is guarded locally and produces a zero vector. Only inputs
//! that would make the physics meaningless are rejected.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A body with mass <= 0 (or non-finite) was handed to the integrator
    InvalidMass { index: usize, mass: f64 },
    /// Parameters that fail validation at construction time
    InvalidConfiguration(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidMass { index, mass } => {
                write!(f, "body {index} has invalid mass {mass} (must be finite and > 0)")
            }
            SimError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}

/// Fail with `InvalidConfiguration` unless `value` is finite and `>= 0`
pub(crate) fn check_non_negative(name: &str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidConfiguration(format!("{name} must be finite and >= 0, got {value}")))
    }
}

/// Fail with `InvalidConfiguration` unless `value` is finite and `> 0`
pub(crate) fn check_positive(name: &str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidConfiguration(format!("{name} must be finite and > 0, got {value}")))
    }
}

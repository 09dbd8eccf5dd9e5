//! Toy impact-consequence model
//!
//! Cube-root scaling laws good enough for an on-screen overlay, not for
//! hazard assessment

use std::f64::consts::PI;

pub const TNT_J_PER_TON: f64 = 4.184e9;

/// Blast overpressure ring: `psi` at `radius_km`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlastRing {
    pub psi: f64,
    pub radius_km: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImpactEffects {
    pub mass_kg: f64,
    pub energy_j: f64,
    pub yield_kt: f64,
    pub crater_diameter_km: f64,
    pub blast_rings: Vec<BlastRing>,
}

/// Mass of a sphere: pi/6 * rho * D^3
pub fn mass_from_diameter(diameter_m: f64, density: f64) -> f64 {
    (PI / 6.0) * density * diameter_m.powi(3)
}

pub fn kinetic_energy(mass_kg: f64, v_mps: f64) -> f64 {
    0.5 * mass_kg * v_mps * v_mps
}

pub fn tnt_kilotons(energy_j: f64) -> f64 {
    energy_j / TNT_J_PER_TON / 1_000.0
}

/// About 1.3 km at 1 Mt, scaling with yield^(1/3)
pub fn crater_diameter_km(kt: f64) -> f64 {
    if kt <= 0.0 {
        return 0.0;
    }
    1.3 * (kt / 1_000.0).cbrt()
}

/// 10, 5 and 1 psi rings; 3, 5 and 12 km at 1 Mt
pub fn blast_radii_km(kt: f64) -> Vec<BlastRing> {
    let scale = if kt > 0.0 { (kt / 1_000.0).cbrt() } else { 0.0 };
    [(10.0, 3.0), (5.0, 5.0), (1.0, 12.0)]
        .into_iter()
        .map(|(psi, base)| BlastRing { psi, radius_km: base * scale })
        .collect()
}

/// Entry angle is accepted for API symmetry but ignored by this model
pub fn impact_effects(diameter_m: f64, density: f64, v_mps: f64, _angle_deg: f64) -> ImpactEffects {
    let mass_kg = mass_from_diameter(diameter_m, density);
    let energy_j = kinetic_energy(mass_kg, v_mps);
    let yield_kt = tnt_kilotons(energy_j);

    ImpactEffects {
        mass_kg,
        energy_j,
        yield_kt,
        crater_diameter_km: crater_diameter_km(yield_kt),
        blast_rings: blast_radii_km(yield_kt),
    }
}

pub mod states;
pub mod params;
pub mod forces;
pub mod integrator;
pub mod orbits;
pub mod launch;
pub mod impact;
pub mod collision;

pub use states::{Asteroid, Body, System, Trail};
pub use params::GravityParams;
pub use forces::{pairwise_force, Force, ForceSet, NewtonianGravity};
pub use integrator::{advance_gravity, euler_integrator, validate_masses};
pub use orbits::{circular_speed, make_circular_orbit, orbital_period};

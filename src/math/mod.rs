// src/math/mod.rs

pub mod integrator;

pub use integrator::central_difference;
pub use integrator::step;
pub use integrator::CentralDifferenceState;

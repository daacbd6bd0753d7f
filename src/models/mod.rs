// src/models/mod.rs

pub mod diagnostics;
pub mod force;
pub mod lattice;

pub use lattice::{Chain, Coefficients};

// src/config/mod.rs

pub mod parameters;
pub mod scenario;

pub use parameters::SimulationParameters;
pub use scenario::InitialCondition;

// src/lib.rs

//! Fermi-Pasta-Ulam 格子のシミュレーション
//!
//! 非線形ばねで結合した1次元粒子列を中心差分法で時間発展させ、
//! 全エネルギー・モードエネルギー・中央粒子の力を時系列として記録する。
//! 描画や動画出力は行わず、完成した [`TimeSeries`] を外部に渡す。

pub mod config;
pub mod error;
pub mod math;
pub mod models;
pub mod simulation;

pub use config::{InitialCondition, SimulationParameters};
pub use error::SimulationError;
pub use models::{Chain, Coefficients};
pub use simulation::framework::{run, run_scenario, run_with_options, RunOptions};
pub use simulation::{EnergyRecord, TimeSeries};

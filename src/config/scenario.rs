// src/config/scenario.rs

use serde::Deserialize;

/// 初期条件（正弦波で励起するモード番号と振幅）
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct InitialCondition {
    pub mode: u32,              // 励起するモード番号 (1 以上)
    pub amplitude: Option<f64>, // 振幅。省略時は 10·sqrt(2/(N+1))
}

impl Default for InitialCondition {
    fn default() -> Self {
        InitialCondition {
            mode: 1,
            amplitude: None,
        }
    }
}

impl InitialCondition {
    /// 粒子数 N に対する実際の振幅
    pub fn resolved_amplitude(&self, n_particles: usize) -> f64 {
        self.amplitude
            .unwrap_or_else(|| default_amplitude(n_particles))
    }
}

/// 既定の振幅 A = 10·sqrt(2/(N+1))
pub fn default_amplitude(n_particles: usize) -> f64 {
    10.0 * (2.0 / (n_particles as f64 + 1.0)).sqrt()
}

// src/config/parameters.rs

use log::warn;
use serde::Deserialize;

use crate::config::scenario::InitialCondition;
use crate::error::SimulationError;
use crate::models::lattice::Coefficients;

/// シミュレーション全体のパラメータ（YAML から読み込む）
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationParameters {
    pub n_particles: usize, // 可動粒子数 N（両端の固定粒子を除く）
    pub dt: f64,            // 時間ステップ
    pub t_max: f64,         // 最大時刻
    pub alpha: f64,         // 2次の非線形係数
    pub beta: f64,          // 3次の非線形係数
    pub initial_condition: InitialCondition,
    pub tracked_modes: Vec<u32>, // エネルギーを記録するモード番号
    pub check_divergence: bool,  // NaN / 無限大を検出したら中断する
    pub record_chains: bool,     // 各ステップの変位を保存する
}

impl Default for SimulationParameters {
    fn default() -> Self {
        SimulationParameters {
            n_particles: 32,
            dt: 0.2,
            t_max: 20000.0,
            alpha: 0.0,
            beta: 0.3,
            initial_condition: InitialCondition::default(),
            tracked_modes: vec![1, 2, 3],
            check_divergence: true,
            record_chains: true,
        }
    }
}

impl SimulationParameters {
    /// ループ開始前の設定値チェック
    ///
    /// # 戻り値
    /// - 不正な値があれば `SimulationError::InvalidConfiguration`
    pub fn validate(&self) -> Result<(), SimulationError> {
        check_configuration(self.n_particles, &self.coefficients(), self.t_max)?;
        if self.initial_condition.mode < 1 {
            return Err(SimulationError::InvalidConfiguration(
                "initial_condition.mode は 1 以上が必要です".to_string(),
            ));
        }
        check_modes(&self.tracked_modes)
    }

    pub fn coefficients(&self) -> Coefficients {
        Coefficients {
            alpha: self.alpha,
            beta: self.beta,
            dt: self.dt,
        }
    }
}

/// 粒子数・係数・最大時刻のチェック
pub fn check_configuration(
    n_particles: usize,
    coeffs: &Coefficients,
    t_max: f64,
) -> Result<(), SimulationError> {
    if n_particles < 2 {
        return Err(SimulationError::InvalidConfiguration(format!(
            "n_particles は 2 以上が必要です (n_particles = {})",
            n_particles
        )));
    }
    if !coeffs.dt.is_finite() || coeffs.dt <= 0.0 {
        return Err(SimulationError::InvalidConfiguration(format!(
            "dt は正の有限値が必要です (dt = {})",
            coeffs.dt
        )));
    }
    if !t_max.is_finite() || t_max < 0.0 {
        return Err(SimulationError::InvalidConfiguration(format!(
            "t_max は 0 以上の有限値が必要です (t_max = {})",
            t_max
        )));
    }
    if !coeffs.alpha.is_finite() || !coeffs.beta.is_finite() {
        return Err(SimulationError::InvalidConfiguration(format!(
            "alpha, beta は有限値が必要です (alpha = {}, beta = {})",
            coeffs.alpha, coeffs.beta
        )));
    }

    // 線形格子の安定限界は dt < 1 付近
    if coeffs.dt >= 1.0 {
        warn!(
            "dt = {} は線形格子の安定限界を超えている可能性があります",
            coeffs.dt
        );
    }
    Ok(())
}

/// 記録するモード番号のチェック
pub fn check_modes(modes: &[u32]) -> Result<(), SimulationError> {
    match modes.iter().find(|&&k| k < 1) {
        Some(k) => Err(SimulationError::InvalidConfiguration(format!(
            "tracked_modes のモード番号は 1 以上が必要です (k = {})",
            k
        ))),
        None => Ok(()),
    }
}

// src/models/lattice.rs

use std::f64::consts::PI;

/// 格子の変位（両端の固定粒子を含む N+2 個）
///
/// 添字 0 と N+1 は固定端で、常に 0 である。
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub displacements: Vec<f64>,
}

/// 結合係数と時間ステップ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub alpha: f64, // 2次の非線形係数
    pub beta: f64,  // 3次の非線形係数
    pub dt: f64,    // 時間ステップ
}

impl Chain {
    /// 変位列から格子を作る。両端は 0 に固定される。
    pub fn new(mut displacements: Vec<f64>) -> Self {
        if let Some(first) = displacements.first_mut() {
            *first = 0.0;
        }
        if let Some(last) = displacements.last_mut() {
            *last = 0.0;
        }
        Chain { displacements }
    }

    /// 全粒子が静止位置にある格子
    pub fn at_rest(n_particles: usize) -> Self {
        Chain {
            displacements: vec![0.0; n_particles + 2],
        }
    }

    /// 正弦波の初期条件
    ///
    /// x[j] = A·sin(2πj / (λ(N+1)))、λ = 2 / mode
    ///
    /// # 引数
    /// - `n_particles`: 可動粒子数 N
    /// - `mode`: 励起するモード番号
    /// - `amplitude`: 振幅 A
    pub fn sine_mode(n_particles: usize, mode: u32, amplitude: f64) -> Self {
        let lambda = 2.0 / mode as f64;
        let length = lambda * (n_particles as f64 + 1.0);
        let displacements = (0..n_particles + 2)
            .map(|j| amplitude * (2.0 * PI * j as f64 / length).sin())
            .collect();
        Chain::new(displacements)
    }

    /// 可動粒子数 N
    pub fn n_particles(&self) -> usize {
        self.displacements.len().saturating_sub(2)
    }

    pub fn len(&self) -> usize {
        self.displacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displacements.is_empty()
    }

    pub fn is_finite(&self) -> bool {
        self.displacements.iter().all(|x| x.is_finite())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.displacements
    }
}

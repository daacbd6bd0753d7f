// src/simulation/mod.rs

pub mod analysis;
pub mod csv;
pub mod framework;
pub mod load_parameters;

use crate::models::lattice::Chain;

/// 事前確保するレコード数の上限
const MAX_PREALLOCATED_RECORDS: usize = 1 << 22;

/// 1時刻分の診断量
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyRecord {
    pub time: f64,
    pub total_energy: f64,
    pub mode_energies: Vec<f64>, // TimeSeries::modes と同じ順序
    pub central_force: f64,
}

/// 追記専用の時系列
///
/// レコード i の時刻は i·dt（浮動小数点の累積ではなく添字から計算する）。
#[derive(Debug, Clone)]
pub struct TimeSeries {
    dt: f64,
    modes: Vec<u32>,
    records: Vec<EnergyRecord>,
    chains: Vec<Chain>,
}

impl TimeSeries {
    /// 想定レコード数で領域を確保した空の時系列
    pub fn with_capacity(dt: f64, modes: Vec<u32>, capacity: usize, record_chains: bool) -> Self {
        let capacity = capacity.min(MAX_PREALLOCATED_RECORDS);
        TimeSeries {
            dt,
            modes,
            records: Vec::with_capacity(capacity),
            chains: if record_chains {
                Vec::with_capacity(capacity)
            } else {
                Vec::new()
            },
        }
    }

    pub(crate) fn push(&mut self, record: EnergyRecord, chain: Option<Chain>) {
        self.records.push(record);
        if let Some(chain) = chain {
            self.chains.push(chain);
        }
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn modes(&self) -> &[u32] {
        &self.modes
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 完了したステップ数（t = 0 のレコードを除く）
    pub fn steps(&self) -> usize {
        self.records.len().saturating_sub(1)
    }

    pub fn records(&self) -> &[EnergyRecord] {
        &self.records
    }

    /// 各時刻の格子（record_chains = false の場合は空）
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn times(&self) -> Vec<f64> {
        (0..self.records.len()).map(|i| i as f64 * self.dt).collect()
    }

    pub fn total_energies(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.total_energy).collect()
    }

    pub fn central_forces(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.central_force).collect()
    }

    /// モード k のエネルギー列。k を記録していなければ None
    pub fn mode_energies(&self, k: u32) -> Option<Vec<f64>> {
        let slot = self.modes.iter().position(|&m| m == k)?;
        Some(
            self.records
                .iter()
                .map(|r| r.mode_energies[slot])
                .collect(),
        )
    }
}

/// t_max / dt から必要なレコード数の見積もり
pub fn expected_records(t_max: f64, dt: f64) -> usize {
    let steps = (t_max / dt).ceil();
    if steps.is_finite() && steps >= 0.0 {
        // 累積誤差で1ステップ多くなる場合がある
        (steps as usize).saturating_add(2)
    } else {
        1
    }
}

// src/simulation/framework.rs

use log::{debug, info, warn};

use crate::config::parameters::{check_configuration, check_modes};
use crate::config::SimulationParameters;
use crate::error::SimulationError;
use crate::math::{central_difference, CentralDifferenceState};
use crate::models::diagnostics::{central_force, mode_basis, mode_energy_with_basis, total_energy};
use crate::models::lattice::{Chain, Coefficients};
use crate::simulation::{expected_records, EnergyRecord, TimeSeries};

/// 時間発展ループの動作設定
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub tracked_modes: Vec<u32>,
    pub check_divergence: bool,
    pub record_chains: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            tracked_modes: vec![1, 2, 3],
            check_divergence: true,
            record_chains: true,
        }
    }
}

impl RunOptions {
    pub fn from_parameters(params: &SimulationParameters) -> Self {
        RunOptions {
            tracked_modes: params.tracked_modes.clone(),
            check_divergence: params.check_divergence,
            record_chains: params.record_chains,
        }
    }
}

/// 記録対象モードの基底（ステップごとの再計算を避ける）
struct ModeProjector {
    modes: Vec<u32>,
    bases: Vec<Vec<f64>>,
}

impl ModeProjector {
    fn new(n_particles: usize, modes: &[u32]) -> Self {
        ModeProjector {
            modes: modes.to_vec(),
            bases: modes.iter().map(|&k| mode_basis(n_particles, k)).collect(),
        }
    }

    fn energies(&self, x: &Chain, x_old: &Chain, dt: f64) -> Vec<f64> {
        self.modes
            .iter()
            .zip(self.bases.iter())
            .map(|(&k, basis)| mode_energy_with_basis(x, x_old, basis, k, dt))
            .collect()
    }
}

/// パラメータファイルの内容から初期格子を作る
pub fn initialize_lattice(params: &SimulationParameters) -> Chain {
    let ic = &params.initial_condition;
    Chain::sine_mode(
        params.n_particles,
        ic.mode,
        ic.resolved_amplitude(params.n_particles),
    )
}

/// パラメータからシミュレーションを実行する
pub fn run_scenario(params: &SimulationParameters) -> Result<TimeSeries, SimulationError> {
    params.validate()?;
    let initial = initialize_lattice(params);
    run_with_options(
        initial,
        params.coefficients(),
        params.t_max,
        &RunOptions::from_parameters(params),
    )
}

/// 既定の設定（モード 1..3 を記録、発散検出あり）で実行する
pub fn run(
    initial: Chain,
    coeffs: Coefficients,
    t_max: f64,
) -> Result<TimeSeries, SimulationError> {
    run_with_options(initial, coeffs, t_max, &RunOptions::default())
}

/// 時間発展ループ
///
/// 初速度 0 (x_old = x) から始め、累積時刻 t が t_max 未満の間ステップを進める。
/// 各ステップの後に (x_next, x) の組で診断量を計算し、時系列に追記する。
///
/// # 引数
/// - `initial`: 初期格子（両端は 0 に直される）
/// - `coeffs`: 結合係数と時間ステップ
/// - `t_max`: 最大時刻
/// - `options`: 記録するモードなど
///
/// # 戻り値
/// - t = 0 を含む時系列
pub fn run_with_options(
    initial: Chain,
    coeffs: Coefficients,
    t_max: f64,
    options: &RunOptions,
) -> Result<TimeSeries, SimulationError> {
    let initial = Chain::new(initial.displacements);
    check_configuration(initial.n_particles(), &coeffs, t_max)?;
    check_modes(&options.tracked_modes)?;

    let n_particles = initial.n_particles();
    let capacity = expected_records(t_max, coeffs.dt);
    let progress_interval = (capacity / 10).max(1);
    info!(
        "シミュレーション開始: N = {}, dt = {}, t_max = {}, alpha = {}, beta = {}",
        n_particles, coeffs.dt, t_max, coeffs.alpha, coeffs.beta
    );

    let projector = ModeProjector::new(n_particles, &options.tracked_modes);
    let mut series = TimeSeries::with_capacity(
        coeffs.dt,
        options.tracked_modes.clone(),
        capacity,
        options.record_chains,
    );

    let mut state = CentralDifferenceState::at_rest(initial);
    let record = record_diagnostics(&state.current, &state.previous, &projector, coeffs.dt, 0.0);
    series.push(record, options.record_chains.then(|| state.current.clone()));

    let mut t = 0.0;
    let mut steps = 0usize;
    while t < t_max {
        state = central_difference(state, &coeffs);
        steps += 1;

        let time = steps as f64 * coeffs.dt;
        let record = record_diagnostics(&state.current, &state.previous, &projector, coeffs.dt, time);

        if options.check_divergence
            && (!record.total_energy.is_finite() || !state.current.is_finite())
        {
            warn!("数値が発散しました: step = {}, t = {}", steps, time);
            return Err(SimulationError::NumericalDivergence { step: steps, time });
        }

        series.push(record, options.record_chains.then(|| state.current.clone()));

        if steps % progress_interval == 0 {
            debug!("step {} (t = {:.3})", steps, time);
        }
        t += coeffs.dt;
    }

    info!(
        "シミュレーション終了: {} ステップ, {} レコード",
        series.steps(),
        series.len()
    );
    Ok(series)
}

/// (x, x_old) の組から1レコード分の診断量を計算する
fn record_diagnostics(
    x: &Chain,
    x_old: &Chain,
    projector: &ModeProjector,
    dt: f64,
    time: f64,
) -> EnergyRecord {
    EnergyRecord {
        time,
        total_energy: total_energy(x, x_old, dt),
        mode_energies: projector.energies(x, x_old, dt),
        central_force: central_force(x.as_slice()),
    }
}

// src/math/integrator.rs

use crate::models::force::force;
use crate::models::lattice::{Chain, Coefficients};

/// 中心差分法の積分器の状態（直近2時刻の格子）
#[derive(Debug, Clone, PartialEq)]
pub struct CentralDifferenceState {
    pub current: Chain,
    pub previous: Chain,
}

impl CentralDifferenceState {
    /// 初速度 0 で始める（previous = current = 初期条件）
    pub fn at_rest(initial: Chain) -> Self {
        CentralDifferenceState {
            previous: initial.clone(),
            current: initial,
        }
    }
}

/// 中心差分法による1ステップ
///
/// x_next[i] = 2·x[i] - x_old[i] + dt²·force(i)
///
/// 結果は新しい格子として返し、両端は必ず 0 にする。
///
/// # 引数
/// - `x`: 現在の格子
/// - `x_old`: 1ステップ前の格子
/// - `coeffs`: 結合係数と時間ステップ
///
/// # 戻り値
/// - 次の時刻の格子
pub fn step(x: &Chain, x_old: &Chain, coeffs: &Coefficients) -> Chain {
    debug_assert_eq!(x.len(), x_old.len());

    let cur = x.as_slice();
    let old = x_old.as_slice();
    let len = cur.len();
    let dtq = coeffs.dt * coeffs.dt;

    let mut next = vec![0.0; len];
    for i in 1..len.saturating_sub(1) {
        let accel = force(cur, i, coeffs.alpha, coeffs.beta);
        next[i] = 2.0 * cur[i] - old[i] + dtq * accel;
    }
    Chain { displacements: next }
}

/// 状態を1ステップ進める
///
/// # 戻り値
/// - 更新後の積分器の状態（current が新しい格子）
pub fn central_difference(
    state: CentralDifferenceState,
    coeffs: &Coefficients,
) -> CentralDifferenceState {
    let next = step(&state.current, &state.previous, coeffs);
    CentralDifferenceState {
        previous: state.current,
        current: next,
    }
}

// src/models/diagnostics.rs

use std::f64::consts::PI;

use crate::models::lattice::Chain;

pub use crate::models::force::central_force;

/// 系の全エネルギー
///
/// 速度 v[i] = (x[i] - x_old[i]) / dt、ひずみ
/// dx[i] = (x[i] + x_old[i] - x[i-1] - x_old[i-1]) / 2 を全添字で計算する。
/// i = 0 の隣は末尾に巡回し、その後 v[0] と dx[0] を 0 にする。
///
/// # 引数
/// - `x`: 現在の格子
/// - `x_old`: 1ステップ前の格子
/// - `dt`: 時間ステップ
pub fn total_energy(x: &Chain, x_old: &Chain, dt: f64) -> f64 {
    let cur = x.as_slice();
    let old = x_old.as_slice();
    let len = cur.len();

    (0..len)
        .map(|i| {
            let prev = (i + len - 1) % len;
            let mut v = (cur[i] - old[i]) / dt;
            let mut dx = (cur[i] + old[i] - cur[prev] - old[prev]) / 2.0;
            if i == 0 {
                v = 0.0;
                dx = 0.0;
            }
            0.5 * v * v + 0.5 * dx * dx
        })
        .sum()
}

/// モード k の基底 sin(j·k·π/(N+1))、j = 0..N+1
///
/// j = N+1 の添字は 0 に置き換えてから正弦を取る。
pub fn mode_basis(n_particles: usize, k: u32) -> Vec<f64> {
    let denom = n_particles as f64 + 1.0;
    (0..n_particles + 2)
        .map(|j| if j == n_particles + 1 { 0 } else { j })
        .map(|j| ((j as f64) * (k as f64) * PI / denom).sin())
        .collect()
}

/// 格子をモード k へ射影した振幅 sqrt(2/(N+1))·Σ x[j]·basis[j]
pub fn mode_amplitude(x: &Chain, basis: &[f64]) -> f64 {
    let n = x.n_particles() as f64;
    let dot: f64 = x
        .as_slice()
        .iter()
        .zip(basis.iter())
        .map(|(a, b)| a * b)
        .sum();
    (2.0 / (n + 1.0)).sqrt() * dot
}

/// モード k の調和振動子エネルギー
///
/// 連続する2時刻のモード振幅 m, m_old から
/// 0.5·(m - m_old)²/dt² + 0.5·(m + m_old)²·sin²(πk/(2(N+1))) を返す。
pub fn mode_energy(x: &Chain, x_old: &Chain, k: u32, dt: f64) -> f64 {
    let basis = mode_basis(x.n_particles(), k);
    mode_energy_with_basis(x, x_old, &basis, k, dt)
}

/// 基底を事前計算済みの場合のモードエネルギー
pub fn mode_energy_with_basis(x: &Chain, x_old: &Chain, basis: &[f64], k: u32, dt: f64) -> f64 {
    let n = x.n_particles() as f64;
    let m = mode_amplitude(x, basis);
    let m_old = mode_amplitude(x_old, basis);
    let omega_half = (PI * k as f64 / (2.0 * (n + 1.0))).sin();
    0.5 * (m - m_old).powi(2) / dt.powi(2) + 0.5 * (m + m_old).powi(2) * omega_half.powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_total_energy_at_rest_is_zero() {
        let chain = Chain::at_rest(8);
        assert_eq!(total_energy(&chain, &chain, 0.2), 0.0);
    }

    #[test]
    fn test_total_energy_static_strain() {
        // 静止状態ではひずみエネルギーのみ
        let x = Chain::new(vec![0.0, 1.0, 0.0, 0.0]);
        // dx = [0(強制), 1, -1, 0] -> 0.5*(1 + 1) = 1
        assert_relative_eq!(total_energy(&x, &x, 0.1), 1.0);
    }

    #[test]
    fn test_total_energy_kinetic_part() {
        let x = Chain::new(vec![0.0, 0.2, 0.0, 0.0]);
        let x_old = Chain::at_rest(2);
        let dt = 0.1;
        // v[1] = 2 -> 0.5*4 = 2
        // dx[1] = 0.1, dx[2] = -0.1 -> 0.5*(0.01 + 0.01) = 0.01
        assert_relative_eq!(total_energy(&x, &x_old, dt), 2.01, epsilon = 1e-12);
    }

    #[test]
    fn test_total_energy_ignores_wrapped_neighbour() {
        // 固定端を破った格子でも i = 0 の寄与は 0 になる
        let x = Chain {
            displacements: vec![5.0, 0.0, 0.0, 3.0],
        };
        // i=0 は除外、i=1: dx = -5, i=2: 0, i=3: 3 (v は全て 0)
        assert_relative_eq!(total_energy(&x, &x, 0.1), 0.5 * 25.0 + 0.5 * 9.0);
    }

    #[test]
    fn test_mode_basis_endpoint_is_zero() {
        let basis = mode_basis(4, 3);
        assert_eq!(basis.len(), 6);
        assert_eq!(basis[0], 0.0);
        assert_eq!(basis[5], 0.0);
        assert_relative_eq!(basis[1], (3.0 * PI / 5.0).sin());
    }

    #[test]
    fn test_pure_mode_projection() {
        let n = 16;
        let amplitude = 0.7;
        let chain = Chain::sine_mode(n, 1, amplitude);
        let basis1 = mode_basis(n, 1);
        let basis2 = mode_basis(n, 2);

        // 正規化された基底で sqrt((N+1)/2)·A の振幅になる
        let expected = amplitude * ((n as f64 + 1.0) / 2.0).sqrt();
        assert_relative_eq!(mode_amplitude(&chain, &basis1), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(mode_amplitude(&chain, &basis2), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_static_mode_energy_matches_total() {
        // 静止した純モードでは、モードエネルギーと全エネルギーが一致する
        let n = 32;
        let chain = Chain::sine_mode(n, 1, 10.0 * (2.0f64 / 33.0).sqrt());
        let e_total = total_energy(&chain, &chain, 0.2);
        let e_mode = mode_energy(&chain, &chain, 1, 0.2);
        assert_relative_eq!(e_mode, e_total, max_relative = 1e-12);
        assert_abs_diff_eq!(mode_energy(&chain, &chain, 2, 0.2), 0.0, epsilon = 1e-20);
    }

    #[test]
    fn test_mode_energy_with_basis_matches() {
        let n = 8;
        let x = Chain::sine_mode(n, 2, 1.0);
        let x_old = Chain::sine_mode(n, 2, 0.9);
        let basis = mode_basis(n, 2);
        assert_eq!(
            mode_energy(&x, &x_old, 2, 0.1),
            mode_energy_with_basis(&x, &x_old, &basis, 2, 0.1)
        );
    }
}

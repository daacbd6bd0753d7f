// src/models/force.rs

/// 粒子 i に働く復元力（加速度）
///
/// 線形項に α·(差分の2乗差) と β·(差分の3乗差) を加えたもの。
/// 1 <= i <= N の可動粒子に対してのみ呼び出すこと。
///
/// # 引数
/// - `x`: 格子の変位（N+2 個）
/// - `i`: 粒子の添字
/// - `alpha`: 2次の非線形係数
/// - `beta`: 3次の非線形係数
pub fn force(x: &[f64], i: usize, alpha: f64, beta: f64) -> f64 {
    let right = x[i + 1] - x[i];
    let left = x[i] - x[i - 1];
    linear_coupling(x[i - 1], x[i], x[i + 1])
        + alpha * (right.powi(2) - left.powi(2))
        + beta * (right.powi(3) - left.powi(3))
}

/// 線形結合項 x[i+1] + x[i-1] - 2·x[i]
pub fn linear_coupling(left: f64, center: f64, right: f64) -> f64 {
    right + left - 2.0 * center
}

/// 中央の粒子に働く線形の力（記録用）
///
/// 中央の添字は固定端を含めた全長の半分 p = len / 2。
/// N が小さい場合は固定端が隣接粒子になる。
pub fn central_force(x: &[f64]) -> f64 {
    let p = x.len() / 2;
    linear_coupling(x[p - 1], x[p], x[p + 1])
}

// src/simulation/analysis.rs

use crate::simulation::TimeSeries;

/// 全エネルギーの統計
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub records: usize,
    pub final_time: f64,
    pub initial_energy: f64,
    pub min_energy: f64,
    pub max_energy: f64,
    pub max_relative_drift: f64, // max |E - E0| / |E0|
}

impl SeriesSummary {
    pub fn from_series(series: &TimeSeries) -> Option<Self> {
        let energies = series.total_energies();
        let initial_energy = *energies.first()?;
        let (min_energy, max_energy) = energies
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &e| {
                (lo.min(e), hi.max(e))
            });
        let scale = if initial_energy.abs() > 1e-12 {
            initial_energy.abs()
        } else {
            1.0
        };
        let max_relative_drift = energies
            .iter()
            .map(|e| (e - initial_energy).abs() / scale)
            .fold(0.0, f64::max);

        Some(SeriesSummary {
            records: energies.len(),
            final_time: (energies.len() - 1) as f64 * series.dt(),
            initial_energy,
            min_energy,
            max_energy,
            max_relative_drift,
        })
    }
}

/// FPU 再帰（モード k へのエネルギーの回帰）
#[derive(Debug, Clone, PartialEq)]
pub struct Recurrence {
    pub trough_index: usize,
    pub trough_share: f64,
    pub return_index: usize,
    pub return_share: f64,
    pub return_time: f64,
}

/// 各時刻でのモード k のエネルギー比（モードエネルギー / 全エネルギー）
pub fn mode_share(series: &TimeSeries, k: u32) -> Option<Vec<f64>> {
    let modes = series.mode_energies(k)?;
    Some(
        modes
            .iter()
            .zip(series.records())
            .map(|(&m, r)| {
                if r.total_energy.abs() > 0.0 {
                    m / r.total_energy
                } else {
                    0.0
                }
            })
            .collect(),
    )
}

/// モード k のエネルギー比のピーク検出による再帰の判定
///
/// 比が `depth` を下回った後、`recovery` 以上に戻るまでの最小値を谷とし、
/// そこから再び `depth` を下回るまでの最大値を回帰点とする。
/// 速い振動で `recovery` を一瞬だけ超える場合があるため、区間の終端は `depth` で判定する。
///
/// # 戻り値
/// - 再帰が見つからない、または k を記録していない場合は None
pub fn detect_recurrence(
    series: &TimeSeries,
    k: u32,
    depth: f64,
    recovery: f64,
) -> Option<Recurrence> {
    let share = mode_share(series, k)?;

    let drop = share.iter().position(|&s| s < depth)?;
    let rise = drop + share[drop..].iter().position(|&s| s >= recovery)?;

    let (trough_index, trough_share) = argmin(&share[drop..rise]);
    let trough_index = trough_index + drop;

    let end = share[rise..]
        .iter()
        .position(|&s| s < depth)
        .map_or(share.len(), |p| rise + p);
    let (return_index, return_share) = argmax(&share[rise..end]);
    let return_index = return_index + rise;

    Some(Recurrence {
        trough_index,
        trough_share,
        return_index,
        return_share,
        return_time: return_index as f64 * series.dt(),
    })
}

fn argmin(values: &[f64]) -> (usize, f64) {
    values
        .iter()
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, &v)| if v < best.1 { (i, v) } else { best })
}

fn argmax(values: &[f64]) -> (usize, f64) {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, &v)| if v > best.1 { (i, v) } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lattice::Chain;
    use crate::simulation::EnergyRecord;
    use approx::assert_relative_eq;

    fn series_from_shares(shares: &[f64]) -> TimeSeries {
        let mut series = TimeSeries::with_capacity(0.5, vec![1], shares.len(), false);
        for (i, &s) in shares.iter().enumerate() {
            series.push(
                EnergyRecord {
                    time: i as f64 * 0.5,
                    total_energy: 2.0,
                    mode_energies: vec![2.0 * s],
                    central_force: 0.0,
                },
                None::<Chain>,
            );
        }
        series
    }

    #[test]
    fn test_mode_share() {
        let series = series_from_shares(&[1.0, 0.5]);
        assert_eq!(mode_share(&series, 1), Some(vec![1.0, 0.5]));
        assert_eq!(mode_share(&series, 2), None);
    }

    #[test]
    fn test_detect_recurrence() {
        let shares = [1.0, 0.9, 0.7, 0.6, 0.65, 0.8, 0.96, 0.99, 0.97, 0.9];
        let series = series_from_shares(&shares);
        let rec = detect_recurrence(&series, 1, 0.75, 0.95).unwrap();
        assert_eq!(rec.trough_index, 3);
        assert_relative_eq!(rec.trough_share, 0.6);
        assert_eq!(rec.return_index, 7);
        assert_relative_eq!(rec.return_share, 0.99);
        assert_relative_eq!(rec.return_time, 3.5);
    }

    #[test]
    fn test_return_peak_found_after_brief_crossing() {
        let shares = [1.0, 0.7, 0.6, 0.96, 0.9, 0.93, 0.99, 0.92, 0.7];
        let series = series_from_shares(&shares);
        let rec = detect_recurrence(&series, 1, 0.75, 0.95).unwrap();
        assert_eq!(rec.trough_index, 2);
        assert_eq!(rec.return_index, 6);
    }

    #[test]
    fn test_no_recurrence_without_return() {
        let series = series_from_shares(&[1.0, 0.7, 0.6, 0.8, 0.9]);
        assert!(detect_recurrence(&series, 1, 0.75, 0.95).is_none());
    }

    #[test]
    fn test_no_recurrence_without_drop() {
        let series = series_from_shares(&[1.0, 0.99, 0.98, 0.99]);
        assert!(detect_recurrence(&series, 1, 0.75, 0.95).is_none());
    }

    #[test]
    fn test_summary() {
        let mut series = TimeSeries::with_capacity(0.1, vec![], 3, false);
        for (i, e) in [2.0, 2.2, 1.9].iter().enumerate() {
            series.push(
                EnergyRecord {
                    time: i as f64 * 0.1,
                    total_energy: *e,
                    mode_energies: vec![],
                    central_force: 0.0,
                },
                None,
            );
        }
        let summary = SeriesSummary::from_series(&series).unwrap();
        assert_eq!(summary.records, 3);
        assert_relative_eq!(summary.final_time, 0.2);
        assert_eq!(summary.min_energy, 1.9);
        assert_eq!(summary.max_energy, 2.2);
        assert_relative_eq!(summary.max_relative_drift, 0.1, epsilon = 1e-12);
    }
}

// src/simulation/csv.rs

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::SimulationError;
use crate::simulation::{EnergyRecord, TimeSeries};

/// エネルギー時系列を CSV ファイルに書き出す
pub fn export_energy_csv(path: &Path, series: &TimeSeries) -> Result<(), SimulationError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_energy_csv(&mut writer, series)?;
    writer.flush()?;
    Ok(())
}

/// 格子の変位を CSV ファイルに書き出す（先頭 `max_frames` 時刻分）
pub fn export_positions_csv(
    path: &Path,
    series: &TimeSeries,
    max_frames: usize,
) -> Result<(), SimulationError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_positions_csv(&mut writer, series, max_frames)?;
    writer.flush()?;
    Ok(())
}

/// CSVヘッダーの作成
pub fn energy_header(modes: &[u32]) -> String {
    let mut header = String::from("time,total_energy,");
    for k in modes {
        header.push_str(&format!("mode{},", k));
    }
    header.push_str("central_force\n");
    header
}

/// CSV行の作成
pub fn energy_row(time: f64, record: &EnergyRecord) -> String {
    let mut row = format!("{},{},", time, record.total_energy);
    for energy in &record.mode_energies {
        row.push_str(&format!("{},", energy));
    }
    row.push_str(&format!("{}\n", record.central_force));
    row
}

pub fn write_energy_csv<W: Write>(writer: &mut W, series: &TimeSeries) -> Result<(), std::io::Error> {
    writer.write_all(energy_header(series.modes()).as_bytes())?;
    for (time, record) in series.times().into_iter().zip(series.records()) {
        writer.write_all(energy_row(time, record).as_bytes())?;
    }
    Ok(())
}

pub fn write_positions_csv<W: Write>(
    writer: &mut W,
    series: &TimeSeries,
    max_frames: usize,
) -> Result<(), std::io::Error> {
    let width = series.chains().first().map_or(0, |c| c.len());
    let mut header = String::from("time");
    for j in 0..width {
        header.push_str(&format!(",x{}", j));
    }
    header.push('\n');
    writer.write_all(header.as_bytes())?;

    let times = series.times();
    for (time, chain) in times.iter().zip(series.chains()).take(max_frames) {
        let mut row = format!("{}", time);
        for x in chain.as_slice() {
            row.push_str(&format!(",{}", x));
        }
        row.push('\n');
        writer.write_all(row.as_bytes())?;
    }
    Ok(())
}

// src/simulation/load_parameters.rs

use std::fs::File;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::config::SimulationParameters;
use crate::error::SimulationError;

/// YAML ファイルの読み込み（共通）
pub fn parse_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, SimulationError> {
    let file = File::open(path)?;
    let data: T = serde_yaml::from_reader(file)?;
    Ok(data)
}

/// シミュレーションパラメータの読み込みと検証
pub fn load_parameters(path: &Path) -> Result<SimulationParameters, SimulationError> {
    let params: SimulationParameters = parse_yaml(path)?;
    params.validate()?;
    Ok(params)
}

/// 文字列からのパラメータ読み込み
pub fn parse_parameters(text: &str) -> Result<SimulationParameters, SimulationError> {
    let params: SimulationParameters = serde_yaml::from_str(text)?;
    params.validate()?;
    Ok(params)
}

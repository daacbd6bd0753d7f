// src/error.rs

use thiserror::Error;

/// シミュレーション全体で使うエラー型
#[derive(Error, Debug)]
pub enum SimulationError {
    /// ループ開始前に検出される設定値の不正
    #[error("設定値が不正です: {0}")]
    InvalidConfiguration(String),

    /// ステップ計算後に NaN / 無限大を検出した
    #[error("数値が発散しました (step {step}, t = {time})")]
    NumericalDivergence { step: usize, time: f64 },

    #[error("ファイル入出力に失敗しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML の解析に失敗しました: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divergence_message_contains_step() {
        let err = SimulationError::NumericalDivergence { step: 42, time: 8.4 };
        let message = err.to_string();
        assert!(message.contains("step 42"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SimulationError = io.into();
        match err {
            SimulationError::Io(_) => (),
            _ => panic!("Expected SimulationError::Io"),
        }
    }
}

// src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use fpusim::simulation::analysis::{detect_recurrence, SeriesSummary};
use fpusim::simulation::csv::{export_energy_csv, export_positions_csv};
use fpusim::simulation::load_parameters::load_parameters;
use fpusim::{run_scenario, SimulationParameters};

#[derive(Parser)]
#[command(name = "fpusim")]
#[command(about = "Simulation of the Fermi-Pasta-Ulam problem", long_about = None)]
struct Cli {
    /// Parameter YAML file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Energy CSV output path
    #[arg(short, long, default_value = "output/energy.csv")]
    output: PathBuf,

    /// Particle position CSV output path
    #[arg(long)]
    positions: Option<PathBuf>,

    /// Maximum number of frames written to the position CSV
    #[arg(long, default_value_t = 1000)]
    max_frames: usize,

    #[arg(long)]
    n_particles: Option<usize>,

    #[arg(long)]
    dt: Option<f64>,

    #[arg(long)]
    t_max: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    alpha: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    beta: Option<f64>,

    /// Initially excited mode
    #[arg(long)]
    mode: Option<u32>,
}

impl Cli {
    fn apply_overrides(&self, params: &mut SimulationParameters) {
        if let Some(n) = self.n_particles {
            params.n_particles = n;
        }
        if let Some(dt) = self.dt {
            params.dt = dt;
        }
        if let Some(t_max) = self.t_max {
            params.t_max = t_max;
        }
        if let Some(alpha) = self.alpha {
            params.alpha = alpha;
        }
        if let Some(beta) = self.beta {
            params.beta = beta;
        }
        if let Some(mode) = self.mode {
            params.initial_condition.mode = mode;
        }
        if self.positions.is_none() {
            params.record_chains = false;
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    // 設定の読み込み
    let mut params = match &cli.config {
        Some(path) => load_parameters(path)
            .with_context(|| format!("failed to load parameters from {}", path.display()))?,
        None => SimulationParameters::default(),
    };
    cli.apply_overrides(&mut params);

    let series = run_scenario(&params).context("simulation failed")?;

    // CSV出力
    if let Some(dir) = cli.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    export_energy_csv(&cli.output, &series)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!("エネルギーを書き出しました: {}", cli.output.display());

    if let Some(path) = &cli.positions {
        export_positions_csv(path, &series, cli.max_frames)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("変位を書き出しました: {}", path.display());
    }

    if let Some(summary) = SeriesSummary::from_series(&series) {
        println!("records:             {}", summary.records);
        println!("final time:          {}", summary.final_time);
        println!("initial energy:      {:.6}", summary.initial_energy);
        println!("energy range:        [{:.6}, {:.6}]", summary.min_energy, summary.max_energy);
        println!("max relative drift:  {:.3e}", summary.max_relative_drift);
    }
    match detect_recurrence(&series, params.initial_condition.mode, 0.8, 0.95) {
        Some(rec) => println!(
            "mode {} recurrence:   share {:.3} at t = {:.1}, back to {:.3} at t = {:.1}",
            params.initial_condition.mode,
            rec.trough_share,
            rec.trough_index as f64 * series.dt(),
            rec.return_share,
            rec.return_time
        ),
        None => println!("mode {} recurrence:   not detected", params.initial_condition.mode),
    }

    Ok(())
}

//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use serde::Deserialize;

use lvsim::{Float, lotka_volterra::Preset, solve::Method};

#[derive(Parser, Debug)]
#[command(name = "lvsim")]
#[command(about = "Lotka-Volterra predator-prey simulation", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub input: InputArgs,

    /// YAML or JSON request file; flags take precedence over its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output CSV file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Model and solver inputs. Unset flags fall back to the request file, then
/// to the defaults noted on each flag.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Prey growth rate, in [0.1, 5.0] [default: 1.0]
    #[arg(long)]
    pub alpha: Option<Float>,
    /// Predation rate, in [0.1, 5.0] [default: 0.1]
    #[arg(long)]
    pub beta: Option<Float>,
    /// Predator growth per predation, in [0.1, 5.0] [default: 0.1]
    #[arg(long)]
    pub delta: Option<Float>,
    /// Predator death rate, in [0.1, 5.0] [default: 1.0]
    #[arg(long)]
    pub gamma: Option<Float>,
    /// Initial prey population, in [1, 1000] [default: 40]
    #[arg(long)]
    pub prey: Option<Float>,
    /// Initial predator population, in [1, 1000] [default: 9]
    #[arg(long)]
    pub predator: Option<Float>,
    /// Simulated time, in [1.0, 100.0] [default: 50.0]
    #[arg(long)]
    pub t_max: Option<Float>,
    /// Parameter bundle that replaces all model inputs [default: none]
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,
    /// Number of evenly spaced output points [default: 500]
    #[arg(long)]
    pub points: Option<usize>,
    /// Integration method [default: rk45]
    #[arg(long, value_enum)]
    pub method: Option<SolverMethod>,
    /// Relative tolerance [default: 1e-6]
    #[arg(long)]
    pub rtol: Option<Float>,
    /// Absolute tolerance [default: 1e-6]
    #[arg(long)]
    pub atol: Option<Float>,
    /// Which series to export [default: all]
    #[arg(long, value_enum)]
    pub chart: Option<Chart>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetArg {
    None,
    StableEcosystem,
    SharpPreyDecline,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::None => Preset::None,
            PresetArg::StableEcosystem => Preset::StableEcosystem,
            PresetArg::SharpPreyDecline => Preset::SharpPreyDecline,
        }
    }
}

#[derive(ValueEnum, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SolverMethod {
    #[default]
    Rk45,
    Rk23,
}

impl From<SolverMethod> for Method {
    fn from(method: SolverMethod) -> Self {
        match method {
            SolverMethod::Rk45 => Method::RK45,
            SolverMethod::Rk23 => Method::RK23,
        }
    }
}

/// Columns written to the CSV output.
#[derive(ValueEnum, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Chart {
    /// Both populations against time
    #[default]
    All,
    /// Prey population against time
    Prey,
    /// Predator against prey (phase portrait)
    Phase,
}

//! Error type for the command-line front end.

use std::path::PathBuf;

use lvsim::Float;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{name} must be within [{min}, {max}] (got {value})")]
    OutOfBounds {
        name: &'static str,
        value: Float,
        min: Float,
        max: Float,
    },

    #[error("--points must be at least 1")]
    NoPoints,

    #[error("failed to read request file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse JSON request file {}: {source}", path.display())]
    ConfigJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML request file {}: {source}", path.display())]
    ConfigYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),

    #[error(transparent)]
    Simulation(#[from] lvsim::Error),
}

pub type CliResult<T> = Result<T, CliError>;

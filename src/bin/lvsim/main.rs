//! `lvsim`: run one Lotka-Volterra simulation and export the plot series as CSV.

mod cli;
mod config;
mod error;
mod export;

use std::{
    fs::File,
    io::{self, BufWriter},
    process::ExitCode,
};

use clap::Parser;
use tracing::{error, info};

use lvsim::{
    lotka_volterra::{EvaluationGrid, SimulationRequest, TimeSpan, simulate_with},
    solve::IVPOptions,
};

use crate::{
    cli::Cli,
    config::{RequestFile, RunConfig, resolve},
    error::CliResult,
    export::write_csv,
};

fn main() -> ExitCode {
    // Logs go to stderr so CSV on stdout stays clean.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let file = match &cli.config {
        Some(path) => RequestFile::load(path)?,
        None => RequestFile::default(),
    };
    let config = resolve(&cli.input, file)?;
    let RunConfig {
        preset,
        scenario,
        points,
        method,
        rtol,
        atol,
        chart,
    } = config;

    info!(preset = preset.label(), t_max = scenario.t_max, points, "running simulation");

    let span = TimeSpan::from_zero(scenario.t_max);
    let request = SimulationRequest::with_grid(
        scenario.parameters,
        scenario.initial,
        span,
        EvaluationGrid::uniform(span, points),
    );
    let options = IVPOptions::builder()
        .method(method.into())
        .rtol(rtol)
        .atol(atol)
        .build();
    let trajectory = simulate_with(&request, options)?;

    info!(
        samples = trajectory.len(),
        nfev = trajectory.evals().ode,
        steps = trajectory.steps().total,
        "simulation complete"
    );

    match &cli.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_csv(&mut out, &trajectory, chart)?;
            info!(path = %path.display(), "wrote csv");
        }
        None => write_csv(&mut io::stdout().lock(), &trajectory, chart)?,
    }
    Ok(())
}

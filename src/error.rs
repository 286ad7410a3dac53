//! Errors for integration methods and the high-level solve entry points.

use thiserror::Error;

use crate::{Float, core::status::Status};

/// Errors returned by [`solve_ivp`](crate::solve::solve_ivp) and
/// [`simulate`](crate::lotka_volterra::simulate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The request itself is malformed; integration was never attempted.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// One or more solver settings are out of range.
    #[error("invalid solver settings: {}", join(.0))]
    InvalidSettings(Vec<SettingsError>),

    /// The method could not complete the requested interval.
    #[error("integration failed at t = {t}: {status}")]
    IntegrationFailure { t: Float, status: Status },
}

/// Problems with the span, initial state or evaluation grid of a request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("time span must be increasing (got t_start = {t_start}, t_end = {t_end})")]
    NonIncreasingSpan { t_start: Float, t_end: Float },

    #[error("{what} must be finite (got {value})")]
    NonFinite { what: &'static str, value: Float },

    #[error("initial state is empty")]
    EmptyState,

    #[error("evaluation grid is empty")]
    EmptyGrid,

    #[error("evaluation point {t} at index {index} lies outside [{t_start}, {t_end}]")]
    GridOutOfSpan {
        index: usize,
        t: Float,
        t_start: Float,
        t_end: Float,
    },

    #[error("evaluation grid must be strictly increasing (t[{index}] = {t} follows {previous})")]
    GridNotIncreasing {
        index: usize,
        t: Float,
        previous: Float,
    },

    #[error("{which} tolerance has {got} components but the state has {expected}")]
    ToleranceLength {
        which: &'static str,
        got: usize,
        expected: usize,
    },
}

/// Validation errors for integrator settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("max_steps must be positive (got {0})")]
    MaxStepsMustBePositive(usize),
    #[error("stiff_test must be positive (got {0})")]
    StiffTestMustBePositive(usize),
    #[error("uround must be in (1e-35, 1.0) (got {0})")]
    URoundOutOfRange(Float),
    #[error("safety_factor must be in (1e-4, 1.0) (got {0})")]
    SafetyFactorOutOfRange(Float),
    #[error("beta must be <= 0.2 (got {0})")]
    BetaTooLarge(Float),
    #[error("scale factors must satisfy 0 < scale_min < scale_max (got {0}, {1})")]
    InvalidScaleFactors(Float, Float),
    #[error("max_step must be positive and finite (got {0})")]
    InvalidMaxStep(Float),
    #[error("first_step must be non-zero and finite (got {0})")]
    InvalidStepSize(Float),
    #[error("tolerances must be non-negative and finite (got {0})")]
    InvalidTolerance(Float),
}

fn join(errors: &[SettingsError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

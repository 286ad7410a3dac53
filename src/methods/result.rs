//! A struct representing the outputted result of a numerical integrator.

use crate::{Float, core::status::Status};

/// Counts of right-hand side evaluations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Evals {
    pub ode: usize,
}

impl Evals {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Counts of attempted, accepted and rejected steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Steps {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl Steps {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The output of a numerical integrator
#[derive(Clone, Debug)]
pub struct IntegrationResult {
    /// The final value of the independent variable
    pub x: Float,
    /// The step size proposed for the next integration step
    pub h: Float,
    /// The status of the integration process
    pub status: Status,
    /// Function evaluation counts
    pub evals: Evals,
    /// Step counts
    pub steps: Steps,
}

impl IntegrationResult {
    pub fn new(x: Float, h: Float, status: Status, evals: Evals, steps: Steps) -> Self {
        Self {
            x,
            h,
            status,
            evals,
            steps,
        }
    }
}

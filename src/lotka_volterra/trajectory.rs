//! Sampled simulation output.

use crate::{
    Float,
    methods::result::{Evals, Steps},
    solve::IVPSolution,
};

use super::model::State;

/// Populations sampled on the evaluation grid, in grid order.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    time: Vec<Float>,
    states: Vec<State>,
    evals: Evals,
    steps: Steps,
}

impl Trajectory {
    pub(crate) fn from_solution(solution: IVPSolution) -> Self {
        let states = solution.y.iter().map(|y| State::from(y.as_slice())).collect();
        Self {
            time: solution.t,
            states,
            evals: solution.evals,
            steps: solution.steps,
        }
    }

    /// The times actually reported; equal to the requested grid.
    pub fn time(&self) -> &[Float] {
        &self.time
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn prey(&self) -> Vec<Float> {
        self.states.iter().map(|s| s.prey).collect()
    }

    pub fn predator(&self) -> Vec<Float> {
        self.states.iter().map(|s| s.predator).collect()
    }

    /// `(prey, predator)` pairs for a phase portrait.
    pub fn phase_plane(&self) -> impl Iterator<Item = (Float, Float)> + '_ {
        self.states.iter().map(|s| (s.prey, s.predator))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Float, State)> + '_ {
        self.time.iter().copied().zip(self.states.iter().copied())
    }

    pub fn first(&self) -> Option<State> {
        self.states.first().copied()
    }

    pub fn last(&self) -> Option<State> {
        self.states.last().copied()
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Right-hand side evaluations spent.
    pub fn evals(&self) -> Evals {
        self.evals
    }

    pub fn steps(&self) -> Steps {
        self.steps
    }
}

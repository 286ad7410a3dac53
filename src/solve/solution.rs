//! Rich solution type for solve_ivp: sampled data and run statistics.

use crate::{
    Float,
    core::status::Status,
    methods::result::{Evals, Steps},
};

/// Rich solution of solve_ivp: sampled data plus basic stats
#[derive(Debug, Clone, PartialEq)]
pub struct IVPSolution {
    /// Sample times, either `t_eval` or the accepted step endpoints.
    pub t: Vec<Float>,
    /// One state vector per entry of `t`.
    pub y: Vec<Vec<Float>>,
    pub evals: Evals,
    pub steps: Steps,
    pub status: Status,
}

impl IVPSolution {
    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// The last stored sample, if any.
    pub fn last(&self) -> Option<(Float, &[Float])> {
        Some((*self.t.last()?, self.y.last()?.as_slice()))
    }

    /// Iterate over stored sample pairs (t_i, y_i).
    pub fn iter(&self) -> SolutionIter<'_> {
        SolutionIter {
            t_iter: self.t.iter(),
            y_iter: self.y.iter(),
        }
    }

    /// The `component`-th state variable across all samples.
    pub fn component(&self, component: usize) -> Vec<Float> {
        self.y.iter().map(|yi| yi[component]).collect()
    }
}

/// Iterator over (t, y) pairs of stored samples in an IVPSolution.
pub struct SolutionIter<'a> {
    t_iter: std::slice::Iter<'a, Float>,
    y_iter: std::slice::Iter<'a, Vec<Float>>,
}

impl<'a> Iterator for SolutionIter<'a> {
    type Item = (Float, &'a [Float]);

    fn next(&mut self) -> Option<Self::Item> {
        match (self.t_iter.next(), self.y_iter.next()) {
            (Some(&t), Some(y)) => Some((t, y.as_slice())),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a IVPSolution {
    type Item = (Float, &'a [Float]);
    type IntoIter = SolutionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! Immutable description of one simulation run.

use serde::{Deserialize, Serialize};

use crate::Float;

use super::model::{ModelParameters, State};

/// Number of evenly spaced output points used when none is requested.
pub const DEFAULT_GRID_POINTS: usize = 500;

/// Integration interval `[t_start, t_end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub t_start: Float,
    pub t_end: Float,
}

impl TimeSpan {
    pub fn new(t_start: Float, t_end: Float) -> Self {
        Self { t_start, t_end }
    }

    /// `[0, t_max]`.
    pub fn from_zero(t_max: Float) -> Self {
        Self::new(0.0, t_max)
    }

    pub fn duration(&self) -> Float {
        self.t_end - self.t_start
    }
}

/// Times at which the solution is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationGrid(Vec<Float>);

impl EvaluationGrid {
    /// `n` evenly spaced points from `start` to `end`, both included.
    ///
    /// A single point grid is `[start]`; `n == 0` gives an empty grid.
    pub fn linspace(start: Float, end: Float, n: usize) -> Self {
        match n {
            0 => Self(Vec::new()),
            1 => Self(vec![start]),
            _ => {
                let step = (end - start) / (n - 1) as Float;
                let mut points: Vec<Float> =
                    (0..n).map(|i| start + i as Float * step).collect();
                points[n - 1] = end;
                Self(points)
            }
        }
    }

    /// `n` evenly spaced points covering `span`.
    pub fn uniform(span: TimeSpan, n: usize) -> Self {
        Self::linspace(span.t_start, span.t_end, n)
    }

    /// Arbitrary points; ordering and range are checked when solving.
    pub fn from_points(points: Vec<Float>) -> Self {
        Self(points)
    }

    pub fn as_slice(&self) -> &[Float] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Float> {
        self.0
    }
}

impl From<Vec<Float>> for EvaluationGrid {
    fn from(points: Vec<Float>) -> Self {
        Self(points)
    }
}

/// Everything one simulation needs, fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub parameters: ModelParameters,
    pub initial: State,
    pub span: TimeSpan,
    pub grid: EvaluationGrid,
}

impl SimulationRequest {
    /// Simulate `[0, t_max]` sampled at [`DEFAULT_GRID_POINTS`] evenly spaced points.
    pub fn new(parameters: ModelParameters, initial: State, t_max: Float) -> Self {
        let span = TimeSpan::from_zero(t_max);
        Self {
            parameters,
            initial,
            span,
            grid: EvaluationGrid::uniform(span, DEFAULT_GRID_POINTS),
        }
    }

    pub fn with_grid(
        parameters: ModelParameters,
        initial: State,
        span: TimeSpan,
        grid: EvaluationGrid,
    ) -> Self {
        Self {
            parameters,
            initial,
            span,
            grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_includes_both_endpoints() {
        let grid = EvaluationGrid::linspace(0.0, 50.0, 500);
        let points = grid.as_slice();
        assert_eq!(points.len(), 500);
        assert_eq!(points[0], 0.0);
        assert_eq!(points[499], 50.0);
        let step = 50.0 / 499.0;
        for w in points.windows(2) {
            assert_relative_eq!(w[1] - w[0], step, max_relative = 1e-9);
        }
    }

    #[test]
    fn degenerate_linspace_sizes() {
        assert!(EvaluationGrid::linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(EvaluationGrid::linspace(2.0, 5.0, 1).as_slice(), &[2.0]);
        assert_eq!(EvaluationGrid::linspace(2.0, 5.0, 2).as_slice(), &[2.0, 5.0]);
    }

    #[test]
    fn default_request_starts_at_zero() {
        let request = SimulationRequest::new(ModelParameters::default(), State::default(), 50.0);
        assert_eq!(request.span, TimeSpan::new(0.0, 50.0));
        assert_eq!(request.grid.len(), DEFAULT_GRID_POINTS);
        assert_eq!(request.span.duration(), 50.0);
    }

    #[test]
    fn request_round_trips_through_json() {
        let request = SimulationRequest::with_grid(
            ModelParameters::new(1.0, 0.2, 0.1, 1.0),
            State::new(20.0, 15.0),
            TimeSpan::new(0.0, 2.0),
            EvaluationGrid::from_points(vec![0.0, 1.0, 2.0]),
        );
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"grid\":[0.0,1.0,2.0]"));
        let back: SimulationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}

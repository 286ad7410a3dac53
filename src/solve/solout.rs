//! Default SolOut that implements t_eval sampling and endpoint recording.

use crate::{
    Float,
    core::{
        interpolate::Interpolate,
        solout::{ControlFlag, SolOut},
    },
};

/// Collects the discrete output of a forward integration.
///
/// With `t_eval` every requested point is reported once, in order: points
/// that coincide with a step endpoint take the integrator's state verbatim,
/// points strictly inside a step are interpolated. Without `t_eval` every
/// step endpoint (including the initial point) is recorded.
///
/// Once the last requested point is filled the sampler asks the method to
/// stop; [`is_complete`](Self::is_complete) tells that apart from a real
/// interrupt.
pub struct DefaultSolOut<'a> {
    t_eval: Option<&'a [Float]>,
    next_idx: usize,
    t: Vec<Float>,
    y: Vec<Vec<Float>>,
}

impl<'a> DefaultSolOut<'a> {
    pub fn new(t_eval: Option<&'a [Float]>) -> Self {
        let capacity = t_eval.map_or(0, <[Float]>::len);
        Self {
            t_eval,
            next_idx: 0,
            t: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// Whether every `t_eval` point has been sampled. Always false without `t_eval`.
    pub fn is_complete(&self) -> bool {
        self.t_eval.is_some_and(|te| self.next_idx == te.len())
    }

    pub fn into_data(self) -> (Vec<Float>, Vec<Vec<Float>>) {
        (self.t, self.y)
    }

    fn push(&mut self, t: Float, y: Vec<Float>) {
        self.t.push(t);
        self.y.push(y);
    }
}

impl SolOut for DefaultSolOut<'_> {
    fn solout<I: Interpolate>(
        &mut self,
        _xold: Float,
        x: Float,
        y: &[Float],
        interpolator: Option<&I>,
    ) -> ControlFlag {
        let Some(te) = self.t_eval else {
            self.push(x, y.to_vec());
            return ControlFlag::Continue;
        };

        let mut i = self.next_idx;
        while i < te.len() && te[i] <= x {
            if te[i] == x {
                self.push(x, y.to_vec());
            } else if let Some(interp) = interpolator {
                let mut yi = vec![0.0; y.len()];
                interp.interpolate(te[i], &mut yi);
                self.push(te[i], yi);
            } else {
                // No interpolant for a point behind the current state.
                break;
            }
            i += 1;
        }
        self.next_idx = i;

        if self.is_complete() {
            ControlFlag::Interrupt
        } else {
            ControlFlag::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Linear interpolant between two known states.
    struct Linear {
        x0: Float,
        y0: Float,
        slope: Float,
    }

    fn line(x0: Float, y0: Float, slope: Float) -> Linear {
        Linear { x0, y0, slope }
    }

    impl Interpolate for Linear {
        fn interpolate(&self, xi: Float, yi: &mut [Float]) {
            yi[0] = self.y0 + self.slope * (xi - self.x0);
        }
    }

    #[test]
    fn records_step_endpoints_without_t_eval() {
        let mut out = DefaultSolOut::new(None);
        out.solout::<Linear>(0.0, 0.0, &[1.0], None);
        out.solout(0.0, 0.5, &[2.0], Some(&line(0.0, 1.0, 2.0)));
        let (t, y) = out.into_data();
        assert_eq!(t, vec![0.0, 0.5]);
        assert_eq!(y, vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn samples_requested_points_only() {
        let te = [0.0, 0.25, 0.5, 0.75];
        let mut out = DefaultSolOut::new(Some(&te));
        out.solout::<Linear>(0.0, 0.0, &[1.0], None);
        out.solout(0.0, 0.5, &[2.0], Some(&line(0.0, 1.0, 2.0)));
        out.solout(0.5, 1.0, &[3.0], Some(&line(0.5, 2.0, 2.0)));
        let (t, y) = out.into_data();
        assert_eq!(t, te.to_vec());
        assert_eq!(y, vec![vec![1.0], vec![1.5], vec![2.0], vec![2.5]]);
    }

    #[test]
    fn stops_once_the_grid_is_filled() {
        let te = [0.0, 0.25];
        let mut out = DefaultSolOut::new(Some(&te));
        let flag = out.solout::<Linear>(0.0, 0.0, &[1.0], None);
        assert_eq!(flag, ControlFlag::Continue);
        assert!(!out.is_complete());
        let flag = out.solout(0.0, 0.5, &[2.0], Some(&line(0.0, 1.0, 2.0)));
        assert_eq!(flag, ControlFlag::Interrupt);
        assert!(out.is_complete());
    }

    #[test]
    fn initial_call_only_takes_exact_matches() {
        let te = [0.1, 0.2];
        let mut out = DefaultSolOut::new(Some(&te));
        out.solout::<Linear>(0.0, 0.0, &[1.0], None);
        let (t, _) = out.into_data();
        assert!(t.is_empty());
    }
}

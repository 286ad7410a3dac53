#![allow(dead_code)]

use lvsim::prelude::*;

/// Simple harmonic oscillator: y0' = y1, y1' = -y0.
pub struct SHO;

impl ODE for SHO {
    fn ode(&self, _x: f64, y: &[f64], dydx: &mut [f64]) {
        dydx[0] = y[1];
        dydx[1] = -y[0];
    }
}

/// Tight tolerances sampled on `t_eval`.
pub fn tight_opts(method: Method, t_eval: Vec<f64>) -> IVPOptions {
    IVPOptions::builder()
        .method(method)
        .rtol(1e-10)
        .atol(1e-10)
        .t_eval(t_eval)
        .build()
}

pub fn classic_parameters() -> ModelParameters {
    ModelParameters::new(1.0, 0.1, 0.1, 1.0)
}

/// `(increases, decreases)` between consecutive samples.
pub fn direction_changes(values: &[f64]) -> (usize, usize) {
    values.windows(2).fold((0, 0), |(up, down), w| {
        if w[1] > w[0] {
            (up + 1, down)
        } else if w[1] < w[0] {
            (up, down + 1)
        } else {
            (up, down)
        }
    })
}

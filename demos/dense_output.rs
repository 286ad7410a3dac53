//! Example: Dense output sampling on a harmonic oscillator
//!
//! The grid below is unrelated to the steps the integrator takes; every
//! point inside a step is filled in by the method's interpolant.

use lvsim::prelude::*;
use std::f64::consts::PI;

struct SHO;

impl ODE for SHO {
    fn ode(&self, _x: f64, y: &[f64], dydx: &mut [f64]) {
        // y' = [y1, -y0]
        dydx[0] = y[1];
        dydx[1] = -y[0];
    }
}

fn main() {
    let f = SHO;
    let x0 = 0.0;
    let xend = 2.0 * PI; // one period
    let y0 = [1.0, 0.0];

    let npts = 41;
    let mut ts: Vec<f64> = (0..npts)
        .map(|i| x0 + (xend - x0) * (i as f64) / ((npts - 1) as f64))
        .collect();
    ts[npts - 1] = xend;

    for method in [Method::RK45, Method::RK23] {
        let options = IVPOptions::builder()
            .method(method)
            .rtol(1e-9)
            .atol(1e-9)
            .t_eval(ts.clone())
            .build();

        let sol = match solve_ivp(&f, x0, xend, &y0, options) {
            Ok(sol) => sol,
            Err(e) => {
                eprintln!("{method} failed: {e}");
                continue;
            }
        };
        println!(
            "{method}: {} samples from {} steps (accepted {} / rejected {})",
            sol.len(),
            sol.steps.total,
            sol.steps.accepted,
            sol.steps.rejected
        );

        for (i, (t, y)) in sol.iter().enumerate() {
            if i % 8 == 0 {
                println!(
                    "t = {:>7.4}, y = [{:>.6}, {:>.6}]  ref = [{:>.6}, {:>.6}]",
                    t,
                    y[0],
                    y[1],
                    t.cos(),
                    -t.sin()
                );
            }
        }
    }
}

//! # Example: Exponential Decay
//!
//! Solve the exponential decay equation with `solve_ivp` directly.
//!
//! Equations:
//! dy/dx = -y
//!
//! Initial condition: y(0) = 1.0
//!

use lvsim::prelude::*;

struct SimpleODE;

impl ODE for SimpleODE {
    fn ode(&self, _x: f64, y: &[f64], dydx: &mut [f64]) {
        for i in 0..y.len() {
            dydx[i] = -y[i];
        }
    }
}

fn main() {
    let f = SimpleODE;
    let x0 = 0.0;
    let xend = 5.0;
    let y0 = [1.0];
    let mut t_eval: Vec<f64> = (0..=50).map(|i| i as f64 * 0.1).collect();
    t_eval[50] = xend;

    let options = IVPOptions::builder()
        // Default method is RK45 (Dormand-Prince 5(4))
        .rtol(1e-6)
        .atol(1e-6)
        .t_eval(t_eval)
        .build();

    match solve_ivp(&f, x0, xend, &y0, options) {
        Ok(sol) => {
            println!("Final status: {}", sol.status);
            if let Some((t_last, y_last)) = sol.last() {
                println!("Final state: x = {t_last:.5}, y = {y_last:?}");
            }
            println!("Number of function evaluations: {}", sol.evals.ode);
            println!("Number of steps taken: {}", sol.steps.total);
            println!("Number of accepted steps: {}", sol.steps.accepted);
            println!("Number of rejected steps: {}", sol.steps.rejected);

            for (ti, yi) in &sol {
                println!("x = {ti:.4}, y = {yi:?}, exact = {:.6}", (-ti).exp());
            }
        }
        Err(e) => eprintln!("Integration failed: {e}"),
    }
}

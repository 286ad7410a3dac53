//! Compute an initial step size guess

use crate::{Float, core::ode::ODE, methods::settings::Tolerance};

/// Compute an initial step size guess for an explicit method of order `iord`.
///
/// Uses the estimate from Hairer, Nørsett & Wanner (II.4): take the smaller
/// of a first-derivative based guess and one derived from a finite-difference
/// estimate of the second derivative, capped by `100 * h` and `hmax`. Costs a
/// single extra call to `f`.
pub fn hinit<F>(
    f: &F,
    x: Float,
    y: &[Float],
    posneg: Float,
    f0: &[Float],
    f1: &mut [Float],
    y1: &mut [Float],
    iord: usize,
    hmax: Float,
    atol: &Tolerance,
    rtol: &Tolerance,
) -> Float
where
    F: ODE + ?Sized,
{
    let n = y.len();
    let mut dnf: Float = 0.0;
    let mut dny: Float = 0.0;

    for i in 0..n {
        let sk = atol[i] + rtol[i] * y[i].abs();
        dnf += (f0[i] / sk) * (f0[i] / sk);
        dny += (y[i] / sk) * (y[i] / sk);
    }

    let mut h: Float = if dnf <= 1e-10 || dny <= 1e-10 {
        1.0e-6
    } else {
        (dny / dnf).sqrt() * 0.01
    };
    h = h.min(hmax.abs());
    h = h.abs() * posneg.signum();

    // Explicit Euler step: y1 = y + h * f0
    for i in 0..n {
        y1[i] = y[i] + h * f0[i];
    }
    f.ode(x + h, y1, f1);

    // Estimate second derivative
    let mut der2: Float = 0.0;
    for i in 0..n {
        let sk = atol[i] + rtol[i] * y[i].abs();
        let df = (f1[i] - f0[i]) / sk;
        der2 += df * df;
    }
    der2 = der2.sqrt() / h.abs();

    let der12 = der2.abs().max(dnf.sqrt());
    let h1 = if der12 <= 1.0e-15 {
        (1.0e-6 as Float).max(h.abs() * 1.0e-3)
    } else {
        (0.01 / der12).powf(1.0 / iord as Float)
    };

    let h_final = (100.0 * h.abs()).min(h1).min(hmax.abs());
    h_final * posneg.signum()
}

//! User-supplied ODE system.

use crate::Float;

/// User-supplied ODE system.
///
/// Implement this trait for your problem to provide the right-hand side
/// function y' = f(x, y). The integrator repeatedly calls `ode` with the
/// current abscissa `x` and state `y` and expects you to fill `dydx` with the
/// derivative values. Calls happen at intermediate stage points chosen by the
/// method, not only at output times, so the function must be pure.
///
/// # Example
///
/// ```
/// use lvsim::prelude::*;
///
/// struct Decay { k: f64 }
///
/// impl ODE for Decay {
///     fn ode(&self, _x: f64, y: &[f64], dydx: &mut [f64]) {
///         dydx[0] = -self.k * y[0];
///     }
/// }
/// ```
pub trait ODE {
    fn ode(&self, x: Float, y: &[Float], dydx: &mut [Float]);
}

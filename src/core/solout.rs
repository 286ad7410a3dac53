//! User defined callback hook executed after each accepted step.

use crate::{Float, core::interpolate::Interpolate};

/// Return flags for [`SolOut`].
///
/// - `Continue`: proceed with integration as normal.
/// - `Interrupt`: stop integration and return control to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlag {
    Continue,
    Interrupt,
}

/// Callback hook executed after each accepted step.
///
/// The callback is invoked once before the main loop with `xold == x` and no
/// interpolator, then after every accepted step with the dense-output
/// interpolant for `[xold, x]`.
///
/// # Example
///
/// ```
/// use lvsim::prelude::*;
///
/// struct Printer { xout: f64, dx: f64 }
///
/// impl SolOut for Printer {
///     fn solout<I: Interpolate>(
///         &mut self,
///         _xold: f64,
///         x: f64,
///         y: &[f64],
///         interpolator: Option<&I>,
///     ) -> ControlFlag {
///         let Some(interp) = interpolator else {
///             println!("x = {x:.2}, y = {y:?}");
///             self.xout = x + self.dx;
///             return ControlFlag::Continue;
///         };
///         let mut yi = vec![0.0; y.len()];
///         while self.xout <= x {
///             interp.interpolate(self.xout, &mut yi);
///             println!("x = {:.2}, y = {yi:?}", self.xout);
///             self.xout += self.dx;
///         }
///         ControlFlag::Continue
///     }
/// }
/// ```
pub trait SolOut {
    fn solout<I: Interpolate>(
        &mut self,
        xold: Float,
        x: Float,
        y: &[Float],
        interpolator: Option<&I>,
    ) -> ControlFlag;
}

/// A [`SolOut`] that observes nothing, for callers that only need the final state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSolOut;

impl SolOut for NoSolOut {
    fn solout<I: Interpolate>(
        &mut self,
        _xold: Float,
        _x: Float,
        _y: &[Float],
        _interpolator: Option<&I>,
    ) -> ControlFlag {
        ControlFlag::Continue
    }
}

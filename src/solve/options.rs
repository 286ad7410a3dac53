//! Options and method selection for solve_ivp

use std::fmt;

use bon::Builder;

use crate::{Float, methods::settings::Tolerance};

/// Solver method selection (roughly mirroring scipy.integrate.solve_ivp)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Dormand–Prince 5(4) adaptive RK
    #[default]
    RK45,
    /// Bogacki–Shampine 3(2) adaptive RK
    RK23,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::RK45 => f.write_str("RK45"),
            Method::RK23 => f.write_str("RK23"),
        }
    }
}

/// Options for solve_ivp similar to SciPy
///
/// ```
/// use lvsim::prelude::*;
///
/// let options = IVPOptions::builder()
///     .method(Method::RK23)
///     .rtol(1e-8)
///     .atol([1e-9, 1e-9])
///     .t_eval(vec![0.0, 0.5, 1.0])
///     .build();
/// assert_eq!(options.method, Method::RK23);
/// ```
#[derive(Builder, Clone, Debug)]
pub struct IVPOptions {
    /// Method to use. Default: RK45 (Dormand–Prince 5(4)).
    #[builder(default)]
    pub method: Method,
    /// Relative tolerance for error estimation.
    #[builder(default = Tolerance::Scalar(1e-6), into)]
    pub rtol: Tolerance,
    /// Absolute tolerance for error estimation.
    #[builder(default = Tolerance::Scalar(1e-6), into)]
    pub atol: Tolerance,
    /// Points where the solution is requested. When set, dense output is used
    /// to sample exactly these points and step endpoints are not recorded.
    pub t_eval: Option<Vec<Float>>,
    /// Initial step suggestion (maps to `Settings::h0`).
    pub first_step: Option<Float>,
    /// Maximum step size (maps to `Settings::h_max`).
    pub max_step: Option<Float>,
    /// Maximum number of allowed steps.
    #[builder(default = 100_000)]
    pub max_steps: usize,
    /// Accepted steps between stiffness tests (RK45 only). Disabled by default.
    pub stiff_test: Option<usize>,
}

impl Default for IVPOptions {
    fn default() -> Self {
        IVPOptions::builder().build()
    }
}

//! SciPy-like solve_ivp entry point implementation

use tracing::{debug, warn};

use crate::{
    Float,
    core::{ode::ODE, status::Status},
    error::{Error, InputError},
    methods::{dp::dopri5, rk::rk23, settings::Settings},
};

use super::{
    options::{IVPOptions, Method},
    solout::DefaultSolOut,
    solution::IVPSolution,
};

/// Solve an initial value problem with SciPy-like options.
///
/// Integrates `f` forward from `t0` to `tend` starting at `y0`. When
/// `options.t_eval` is set the solution is reported at exactly those points;
/// otherwise at every accepted step endpoint. Integration stops as soon as
/// the last `t_eval` point is sampled, so a grid of just `[t0]` takes no
/// steps. Relative tolerances below `100 * uround` are raised to that floor.
///
/// # Errors
///
/// - [`Error::InvalidInput`] when `t0 >= tend`, `y0` is empty or non-finite,
///   `t_eval` is empty, not strictly increasing or leaves `[t0, tend]`, or a
///   vector tolerance has the wrong length. Nothing is integrated.
/// - [`Error::InvalidSettings`] when any tolerance or step setting is out of range.
/// - [`Error::IntegrationFailure`] when the method stops before the last
///   requested point (or `tend` without `t_eval`); the partial trajectory is
///   discarded.
///
/// # Example
///
/// ```
/// use lvsim::prelude::*;
///
/// struct Decay;
/// impl ODE for Decay {
///     fn ode(&self, _x: f64, y: &[f64], dydx: &mut [f64]) {
///         dydx[0] = -y[0];
///     }
/// }
///
/// let options = IVPOptions::builder().t_eval(vec![0.0, 1.0, 2.0]).build();
/// let sol = solve_ivp(&Decay, 0.0, 2.0, &[1.0], options).unwrap();
/// assert_eq!(sol.t, vec![0.0, 1.0, 2.0]);
/// assert!((sol.y[2][0] - (-2.0f64).exp()).abs() < 1e-5);
/// ```
pub fn solve_ivp<F>(
    f: &F,
    t0: Float,
    tend: Float,
    y0: &[Float],
    options: IVPOptions,
) -> Result<IVPSolution, Error>
where
    F: ODE + ?Sized,
{
    check_span(t0, tend)?;
    check_state(y0)?;
    if let Some(te) = options.t_eval.as_deref() {
        check_grid(te, t0, tend)?;
    }

    let settings = Settings::builder()
        .max_steps(options.max_steps)
        .maybe_h0(options.first_step)
        .maybe_h_max(options.max_step)
        .maybe_stiff_test(options.stiff_test)
        .build();

    debug!(
        method = %options.method,
        t0,
        tend,
        dim = y0.len(),
        samples = ?options.t_eval.as_ref().map(Vec::len),
        "solving initial value problem"
    );

    // Error norms break down when rtol is below 100 * uround.
    let rtol_floor = 100.0 * settings.uround;
    let rtol = options.rtol.floored(rtol_floor);
    if rtol != options.rtol {
        warn!(rtol = ?options.rtol, floor = rtol_floor, "raising rtol to its lower bound");
    }

    let mut y = y0.to_vec();
    let t_eval = options.t_eval.as_deref();
    let dense_output = t_eval.is_some();
    let mut sampler = DefaultSolOut::new(t_eval);

    let result = match options.method {
        Method::RK45 => dopri5(
            f,
            t0,
            tend,
            &mut y,
            &rtol,
            &options.atol,
            &mut sampler,
            dense_output,
            &settings,
        )?,
        Method::RK23 => rk23(
            f,
            t0,
            tend,
            &mut y,
            &rtol,
            &options.atol,
            &mut sampler,
            dense_output,
            &settings,
        )?,
    };

    // The sampler stops the method as soon as the last grid point is filled.
    let status = match result.status {
        Status::UserInterrupt if sampler.is_complete() => Status::Success,
        status => status,
    };

    if !status.is_success() {
        warn!(
            t = result.x,
            ?status,
            steps = result.steps.total,
            "integration stopped before the end of the span"
        );
        return Err(Error::IntegrationFailure {
            t: result.x,
            status,
        });
    }

    let (t, y) = sampler.into_data();
    if let Some(te) = t_eval {
        if t.len() != te.len() {
            warn!(
                expected = te.len(),
                got = t.len(),
                "dense output did not cover every requested point"
            );
            return Err(Error::IntegrationFailure {
                t: result.x,
                status,
            });
        }
    }

    debug!(
        nfev = result.evals.ode,
        steps = result.steps.total,
        accepted = result.steps.accepted,
        rejected = result.steps.rejected,
        "integration finished"
    );

    Ok(IVPSolution {
        t,
        y,
        evals: result.evals,
        steps: result.steps,
        status,
    })
}

fn check_span(t0: Float, tend: Float) -> Result<(), InputError> {
    if !t0.is_finite() {
        return Err(InputError::NonFinite {
            what: "t_start",
            value: t0,
        });
    }
    if !tend.is_finite() {
        return Err(InputError::NonFinite {
            what: "t_end",
            value: tend,
        });
    }
    if t0 >= tend {
        return Err(InputError::NonIncreasingSpan {
            t_start: t0,
            t_end: tend,
        });
    }
    Ok(())
}

fn check_state(y0: &[Float]) -> Result<(), InputError> {
    if y0.is_empty() {
        return Err(InputError::EmptyState);
    }
    match y0.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(InputError::NonFinite {
            what: "initial state",
            value,
        }),
        None => Ok(()),
    }
}

fn check_grid(t_eval: &[Float], t0: Float, tend: Float) -> Result<(), InputError> {
    if t_eval.is_empty() {
        return Err(InputError::EmptyGrid);
    }
    for (index, &t) in t_eval.iter().enumerate() {
        // NaN fails the range check as well.
        if !(t >= t0 && t <= tend) {
            return Err(InputError::GridOutOfSpan {
                index,
                t,
                t_start: t0,
                t_end: tend,
            });
        }
        if index > 0 && t <= t_eval[index - 1] {
            return Err(InputError::GridNotIncreasing {
                index,
                t,
                previous: t_eval[index - 1],
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    struct Decay;

    impl ODE for Decay {
        fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
            dydx[0] = -y[0];
        }
    }

    #[test]
    fn equal_span_is_rejected() {
        let err = solve_ivp(&Decay, 1.0, 1.0, &[1.0], IVPOptions::default()).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidInput(InputError::NonIncreasingSpan {
                t_start: 1.0,
                t_end: 1.0
            })
        );
    }

    #[test]
    fn grid_checks_report_the_offending_point() {
        assert_eq!(check_grid(&[], 0.0, 1.0), Err(InputError::EmptyGrid));
        assert_eq!(
            check_grid(&[0.0, 1.5], 0.0, 1.0),
            Err(InputError::GridOutOfSpan {
                index: 1,
                t: 1.5,
                t_start: 0.0,
                t_end: 1.0
            })
        );
        assert_eq!(
            check_grid(&[0.0, 0.5, 0.5], 0.0, 1.0),
            Err(InputError::GridNotIncreasing {
                index: 2,
                t: 0.5,
                previous: 0.5
            })
        );
        assert!(check_grid(&[0.0, 1.0], 0.0, 1.0).is_ok());
    }

    #[test]
    fn empty_and_non_finite_states_are_rejected() {
        assert_eq!(check_state(&[]), Err(InputError::EmptyState));
        assert!(matches!(
            check_state(&[1.0, Float::INFINITY]),
            Err(InputError::NonFinite { what: "initial state", .. })
        ));
    }

    #[test]
    fn step_endpoints_are_recorded_without_t_eval() {
        let sol = solve_ivp(&Decay, 0.0, 1.0, &[1.0], IVPOptions::default()).unwrap();
        assert_eq!(sol.t.len(), sol.steps.accepted + 1);
        assert_eq!(sol.t[0], 0.0);
        assert_eq!(*sol.t.last().unwrap(), 1.0);
        assert!(sol.t.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn both_methods_sample_the_grid() {
        let grid: Vec<Float> = (0..=10).map(|i| i as Float * 0.3).collect();
        for method in [Method::RK45, Method::RK23] {
            let options = IVPOptions::builder()
                .method(method)
                .rtol(1e-9)
                .atol(1e-9)
                .t_eval(grid.clone())
                .build();
            let sol = solve_ivp(&Decay, 0.0, 3.0, &[1.0], options).unwrap();
            assert_eq!(sol.status, Status::Success);
            assert_eq!(sol.t, grid);
            for (t, y) in sol.iter() {
                assert_abs_diff_eq!(y[0], (-t).exp(), epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn exhausted_step_budget_is_a_failure() {
        let options = IVPOptions::builder().max_steps(2).rtol(1e-12).atol(1e-12).build();
        let err = solve_ivp(&Decay, 0.0, 100.0, &[1.0], options).unwrap_err();
        assert!(matches!(
            err,
            Error::IntegrationFailure {
                status: Status::NeedLargerNMax,
                ..
            }
        ));
    }

    struct BlowUp;

    impl ODE for BlowUp {
        fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
            dydx[0] = y[0] * y[0];
        }
    }

    #[test]
    fn finite_time_blow_up_is_a_failure() {
        // y = 1 / (1 - t) is singular at t = 1.
        let err = solve_ivp(&BlowUp, 0.0, 2.0, &[1.0], IVPOptions::default()).unwrap_err();
        assert!(matches!(err, Error::IntegrationFailure { .. }));
    }

    #[test]
    fn tolerance_length_mismatch_is_invalid_input() {
        let options = IVPOptions::builder().atol([1e-6, 1e-6]).build();
        let err = solve_ivp(&Decay, 0.0, 1.0, &[1.0], options).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InputError::ToleranceLength { which: "absolute", .. })
        ));
    }
}

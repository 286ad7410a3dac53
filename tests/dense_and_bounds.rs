use lvsim::prelude::*;
use lvsim::error::InputError;

mod common;
use common::{SHO, tight_opts};

#[test]
fn dense_output_tracks_the_oscillator_between_steps() {
    let tend = 2.0 * std::f64::consts::PI;
    let mut grid: Vec<f64> = (0..=97).map(|i| tend * i as f64 / 97.0).collect();
    grid[97] = tend;
    for method in [Method::RK45, Method::RK23] {
        let options = tight_opts(method, grid.clone());
        let sol = solve_ivp(&SHO, 0.0, tend, &[1.0, 0.0], options).unwrap();
        assert_eq!(sol.t, grid);
        for (t, y) in &sol {
            assert!((y[0] - t.cos()).abs() < 1e-6, "{method} at t = {t}");
            assert!((y[1] + t.sin()).abs() < 1e-6, "{method} at t = {t}");
        }
    }
}

#[test]
fn zero_tolerances_are_raised_to_the_rtol_floor() {
    let grid = vec![0.0, 1.0, 2.0, 3.0];
    let options = IVPOptions::builder()
        .rtol(0.0)
        .atol(0.0)
        .t_eval(grid.clone())
        .build();
    let sol = solve_ivp(&SHO, 0.0, 3.0, &[1.0, 0.5], options).unwrap();
    assert_eq!(sol.status, Status::Success);
    let exact: Vec<f64> = grid.iter().map(|t| t.cos() + 0.5 * t.sin()).collect();
    for (got, want) in sol.component(0).iter().zip(&exact) {
        assert!((got - want).abs() < 1e-9, "{got} vs {want}");
    }
}

#[test]
fn grid_endpoints_are_reported_exactly() {
    let options = tight_opts(Method::RK45, vec![0.0, 3.0]);
    let sol = solve_ivp(&SHO, 0.0, 3.0, &[1.0, 0.0], options).unwrap();
    assert_eq!(sol.t, vec![0.0, 3.0]);
    assert_eq!(sol.y[0], vec![1.0, 0.0]);
}

#[test]
fn grid_point_past_the_end_is_rejected() {
    let err = solve_ivp(&SHO, 0.0, 1.0, &[1.0, 0.0], tight_opts(Method::RK45, vec![0.5, 1.5]))
        .unwrap_err();
    assert_eq!(
        err,
        Error::InvalidInput(InputError::GridOutOfSpan {
            index: 1,
            t: 1.5,
            t_start: 0.0,
            t_end: 1.0,
        })
    );
}

#[test]
fn grid_point_before_the_start_is_rejected() {
    let err = solve_ivp(&SHO, 1.0, 2.0, &[1.0, 0.0], tight_opts(Method::RK23, vec![0.5]))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidInput(InputError::GridOutOfSpan { index: 0, .. })
    ));
}

#[test]
fn reversed_span_is_rejected() {
    let err = solve_ivp(&SHO, 1.0, 0.0, &[1.0, 0.0], IVPOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidInput(InputError::NonIncreasingSpan { .. })
    ));
}

#[test]
fn invalid_settings_are_all_reported() {
    let options = IVPOptions::builder()
        .rtol(-1.0)
        .atol(f64::NAN)
        .max_steps(0)
        .build();
    match solve_ivp(&SHO, 0.0, 1.0, &[1.0, 0.0], options) {
        Err(Error::InvalidSettings(errors)) => assert_eq!(errors.len(), 3),
        other => panic!("expected invalid settings, got {other:?}"),
    }
}

use approx::assert_relative_eq;
use lvsim::error::InputError;
use lvsim::prelude::*;

mod common;
use common::{classic_parameters, direction_changes};

fn request(
    parameters: ModelParameters,
    initial: State,
    t_max: f64,
    points: usize,
) -> SimulationRequest {
    let span = TimeSpan::from_zero(t_max);
    SimulationRequest::with_grid(parameters, initial, span, EvaluationGrid::uniform(span, points))
}

fn tight(method: Method) -> IVPOptions {
    IVPOptions::builder().method(method).rtol(1e-10).atol(1e-10).build()
}

#[test]
fn zero_rates_freeze_the_populations() {
    let req = request(ModelParameters::new(0.0, 0.0, 0.0, 0.0), State::new(40.0, 9.0), 50.0, 500);
    for method in [Method::RK45, Method::RK23] {
        let trajectory = simulate_with(&req, IVPOptions::builder().method(method).build()).unwrap();
        assert_eq!(trajectory.len(), 500);
        assert!(trajectory.states().iter().all(|&s| s == State::new(40.0, 9.0)));
    }
}

#[test]
fn output_follows_the_grid() {
    let grid = EvaluationGrid::from_points(vec![0.0, 0.1, 2.5, 2.51, 7.0, 19.999, 20.0]);
    let req = SimulationRequest::with_grid(
        classic_parameters(),
        State::new(40.0, 9.0),
        TimeSpan::new(0.0, 20.0),
        grid.clone(),
    );
    let trajectory = simulate(&req).unwrap();
    assert_eq!(trajectory.time(), grid.as_slice());
    assert_eq!(trajectory.len(), grid.len());
}

#[test]
fn repeated_runs_are_identical() {
    let req = request(classic_parameters(), State::new(40.0, 9.0), 50.0, 500);
    assert_eq!(simulate(&req).unwrap(), simulate(&req).unwrap());
}

#[test]
fn single_point_at_start_returns_initial_state() {
    let initial = State::new(123.456, 7.89);
    let req = SimulationRequest::with_grid(
        classic_parameters(),
        initial,
        TimeSpan::new(0.0, 50.0),
        EvaluationGrid::from_points(vec![0.0]),
    );
    let trajectory = simulate(&req).unwrap();
    assert_eq!(trajectory.states(), &[initial]);
}

#[test]
fn single_point_at_start_needs_no_steps_even_with_extreme_rates() {
    let initial = State::new(1000.0, 1000.0);
    let req = SimulationRequest::with_grid(
        ModelParameters::new(1e6, 1e6, 1e6, 1e6),
        initial,
        TimeSpan::new(0.0, 100.0),
        EvaluationGrid::from_points(vec![0.0]),
    );
    for method in [Method::RK45, Method::RK23] {
        let trajectory = simulate_with(&req, IVPOptions::builder().method(method).build()).unwrap();
        assert_eq!(trajectory.states(), &[initial]);
        assert_eq!(trajectory.steps().total, 0);
    }
}

#[test]
fn grid_ending_early_stops_the_integration() {
    let span = TimeSpan::new(0.0, 50.0);
    let early = SimulationRequest::with_grid(
        classic_parameters(),
        State::new(40.0, 9.0),
        span,
        EvaluationGrid::linspace(0.0, 5.0, 11),
    );
    let full = SimulationRequest::with_grid(
        classic_parameters(),
        State::new(40.0, 9.0),
        span,
        EvaluationGrid::linspace(0.0, 50.0, 101),
    );
    let early = simulate(&early).unwrap();
    let full = simulate(&full).unwrap();
    assert_eq!(early.len(), 11);
    assert_eq!(early.time()[10], 5.0);
    assert!(early.steps().total < full.steps().total);
}

#[test]
fn zero_tolerances_fall_back_to_the_rtol_floor() {
    let req = request(classic_parameters(), State::new(40.0, 9.0), 10.0, 101);
    let options = IVPOptions::builder().rtol(0.0).atol(0.0).build();
    let trajectory = simulate_with(&req, options).unwrap();
    let reference = simulate_with(&req, tight(Method::RK45)).unwrap();
    assert_eq!(trajectory.len(), 101);
    for (a, b) in trajectory.states().iter().zip(reference.states()) {
        assert_relative_eq!(a.prey, b.prey, max_relative = 1e-6);
        assert_relative_eq!(a.predator, b.predator, max_relative = 1e-6);
    }
}

#[test]
fn empty_span_is_invalid_input() {
    let req = SimulationRequest::with_grid(
        classic_parameters(),
        State::default(),
        TimeSpan::new(5.0, 5.0),
        EvaluationGrid::from_points(vec![5.0]),
    );
    assert!(matches!(
        simulate(&req),
        Err(Error::InvalidInput(InputError::NonIncreasingSpan { .. }))
    ));
}

#[test]
fn point_beyond_span_is_invalid_input() {
    let req = SimulationRequest::with_grid(
        classic_parameters(),
        State::default(),
        TimeSpan::new(0.0, 10.0),
        EvaluationGrid::from_points(vec![0.0, 10.5]),
    );
    assert!(matches!(
        simulate(&req),
        Err(Error::InvalidInput(InputError::GridOutOfSpan { index: 1, .. }))
    ));
}

#[test]
fn empty_grid_is_invalid_input() {
    let req = request(classic_parameters(), State::default(), 10.0, 0);
    assert_eq!(simulate(&req), Err(Error::InvalidInput(InputError::EmptyGrid)));
}

#[test]
fn non_finite_parameters_are_invalid_input() {
    let req = request(
        ModelParameters::new(1.0, f64::NAN, 0.1, 1.0),
        State::default(),
        10.0,
        10,
    );
    assert!(matches!(
        simulate(&req),
        Err(Error::InvalidInput(InputError::NonFinite { what: "beta", .. }))
    ));
}

#[test]
fn classic_scenario_oscillates() {
    let req = request(classic_parameters(), State::new(40.0, 9.0), 50.0, 500);
    let trajectory = simulate(&req).unwrap();
    assert_eq!(trajectory.len(), 500);
    assert_eq!(trajectory.time()[499], 50.0);

    for series in [trajectory.prey(), trajectory.predator()] {
        let (up, down) = direction_changes(&series);
        assert!(up > 0 && down > 0, "series is monotonic");
        assert!(series.iter().all(|v| v.is_finite() && *v > 0.0));
    }
}

#[test]
fn stable_ecosystem_returns_near_its_start() {
    let scenario = Preset::StableEcosystem.apply(Scenario::default());
    let req = request(scenario.parameters, scenario.initial, scenario.t_max, 20_001);
    let trajectory = simulate_with(&req, tight(Method::RK45)).unwrap();

    let start = scenario.initial;
    let distance = |s: &State| (s.prey - start.prey).hypot(s.predator - start.predator);
    let left = trajectory
        .states()
        .iter()
        .position(|s| distance(s) > 5.0)
        .expect("orbit never leaves the start");
    let closest = trajectory.states()[left..]
        .iter()
        .map(distance)
        .fold(f64::INFINITY, f64::min);
    assert!(closest < 0.5, "closest return was {closest}");
}

#[test]
fn without_predators_prey_grows_exponentially() {
    let params = ModelParameters::new(1.0, 0.3, 0.2, 0.7);
    let req = request(params, State::new(40.0, 0.0), 10.0, 101);
    for method in [Method::RK45, Method::RK23] {
        let trajectory = simulate_with(&req, tight(method)).unwrap();
        for (t, s) in trajectory.iter() {
            assert_eq!(s.predator, 0.0);
            assert_relative_eq!(s.prey, 40.0 * t.exp(), max_relative = 1e-6);
        }
    }
}

#[test]
fn first_integral_is_conserved() {
    let params = classic_parameters();
    let model = LotkaVolterra::new(params);
    let req = request(params, State::new(40.0, 9.0), 50.0, 200);
    let trajectory = simulate_with(&req, tight(Method::RK45)).unwrap();
    let v0 = model.first_integral(State::new(40.0, 9.0));
    for s in trajectory.states() {
        assert_relative_eq!(model.first_integral(*s), v0, max_relative = 1e-6);
    }
}

#[test]
fn methods_agree_at_tight_tolerance() {
    let req = request(classic_parameters(), State::new(40.0, 9.0), 10.0, 51);
    let rk45 = simulate_with(&req, tight(Method::RK45)).unwrap();
    let rk23 = simulate_with(
        &req,
        IVPOptions::builder().method(Method::RK23).rtol(1e-8).atol(1e-8).build(),
    )
    .unwrap();
    for (a, b) in rk45.states().iter().zip(rk23.states()) {
        assert_relative_eq!(a.prey, b.prey, max_relative = 1e-4);
        assert_relative_eq!(a.predator, b.predator, max_relative = 1e-4);
    }
}

#[test]
fn step_budget_exhaustion_is_an_integration_failure() {
    let req = request(classic_parameters(), State::new(40.0, 9.0), 50.0, 500);
    let options = IVPOptions::builder().max_steps(5).build();
    assert!(matches!(
        simulate_with(&req, options),
        Err(Error::IntegrationFailure {
            status: Status::NeedLargerNMax,
            ..
        })
    ));
}

//! Running a request through the integrator.

use tracing::{debug, warn};

use crate::{
    error::Error,
    solve::{IVPOptions, solve_ivp},
};

use super::{model::LotkaVolterra, request::SimulationRequest, trajectory::Trajectory};

/// Simulate `request` with the default method (RK45) and tolerances.
pub fn simulate(request: &SimulationRequest) -> Result<Trajectory, Error> {
    simulate_with(request, IVPOptions::default())
}

/// Simulate `request` with the given method, tolerances and step limits.
///
/// Any `t_eval` already present in `options` is replaced by the request's
/// evaluation grid.
pub fn simulate_with(
    request: &SimulationRequest,
    options: IVPOptions,
) -> Result<Trajectory, Error> {
    request.parameters.check_finite()?;
    request.initial.check_finite("initial state")?;

    let SimulationRequest {
        parameters,
        initial,
        span,
        grid,
    } = request;

    debug!(
        alpha = parameters.alpha,
        beta = parameters.beta,
        delta = parameters.delta,
        gamma = parameters.gamma,
        prey = initial.prey,
        predator = initial.predator,
        t_start = span.t_start,
        t_end = span.t_end,
        points = grid.len(),
        "simulating lotka-volterra"
    );

    let options = IVPOptions {
        t_eval: Some(grid.as_slice().to_vec()),
        ..options
    };
    let model = LotkaVolterra::new(*parameters);
    let solution = solve_ivp(
        &model,
        span.t_start,
        span.t_end,
        &initial.to_array(),
        options,
    )
    .inspect_err(|err| warn!(%err, "simulation failed"))?;

    let trajectory = Trajectory::from_solution(solution);
    debug!(
        nfev = trajectory.evals().ode,
        accepted = trajectory.steps().accepted,
        rejected = trajectory.steps().rejected,
        "simulation finished"
    );
    Ok(trajectory)
}

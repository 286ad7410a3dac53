//! Model parameters, population state and the right-hand side.

use serde::{Deserialize, Serialize};

use crate::{
    Float,
    core::ode::ODE,
    error::InputError,
};

/// Rate constants of the Lotka-Volterra system.
///
/// Meaningful values are strictly positive, but zero and negative rates are
/// accepted and simply produce degenerate dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Prey growth rate.
    pub alpha: Float,
    /// Predation rate.
    pub beta: Float,
    /// Predator growth per predation.
    pub delta: Float,
    /// Predator death rate.
    pub gamma: Float,
}

impl ModelParameters {
    pub fn new(alpha: Float, beta: Float, delta: Float, gamma: Float) -> Self {
        Self {
            alpha,
            beta,
            delta,
            gamma,
        }
    }

    pub(crate) fn check_finite(&self) -> Result<(), InputError> {
        let fields = [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("delta", self.delta),
            ("gamma", self.gamma),
        ];
        match fields.into_iter().find(|(_, v)| !v.is_finite()) {
            Some((what, value)) => Err(InputError::NonFinite { what, value }),
            None => Ok(()),
        }
    }
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self::new(1.0, 0.1, 0.1, 1.0)
    }
}

/// Prey and predator populations, treated as continuous densities.
///
/// Nothing keeps the populations non-negative; the equations are applied to
/// whatever values they hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub prey: Float,
    pub predator: Float,
}

impl State {
    pub fn new(prey: Float, predator: Float) -> Self {
        Self { prey, predator }
    }

    pub fn to_array(self) -> [Float; 2] {
        [self.prey, self.predator]
    }

    pub(crate) fn check_finite(&self, what: &'static str) -> Result<(), InputError> {
        [self.prey, self.predator]
            .into_iter()
            .find(|v| !v.is_finite())
            .map_or(Ok(()), |value| Err(InputError::NonFinite { what, value }))
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(40.0, 9.0)
    }
}

impl From<[Float; 2]> for State {
    fn from([prey, predator]: [Float; 2]) -> Self {
        Self { prey, predator }
    }
}

impl From<&[Float]> for State {
    /// Takes the first two components as `(prey, predator)`.
    fn from(y: &[Float]) -> Self {
        Self::new(y[0], y[1])
    }
}

/// The Lotka-Volterra right-hand side for a fixed set of parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LotkaVolterra {
    pub params: ModelParameters,
}

impl LotkaVolterra {
    pub fn new(params: ModelParameters) -> Self {
        Self { params }
    }

    /// Instantaneous rate of change at `state`.
    pub fn derivative(&self, state: State) -> State {
        let ModelParameters {
            alpha,
            beta,
            delta,
            gamma,
        } = self.params;
        let State { prey, predator } = state;
        State {
            prey: alpha * prey - beta * prey * predator,
            predator: delta * prey * predator - gamma * predator,
        }
    }

    /// First integral `delta*x - gamma*ln(x) + beta*y - alpha*ln(y)`.
    ///
    /// Constant along exact trajectories with positive populations; NaN
    /// when either population is non-positive.
    pub fn first_integral(&self, state: State) -> Float {
        let ModelParameters {
            alpha,
            beta,
            delta,
            gamma,
        } = self.params;
        delta * state.prey - gamma * state.prey.ln() + beta * state.predator
            - alpha * state.predator.ln()
    }

    /// Interior fixed point `(gamma/delta, alpha/beta)`, if it exists.
    pub fn equilibrium(&self) -> Option<State> {
        let p = self.params;
        (p.delta != 0.0 && p.beta != 0.0).then(|| State::new(p.gamma / p.delta, p.alpha / p.beta))
    }
}

impl ODE for LotkaVolterra {
    fn ode(&self, _t: Float, y: &[Float], dydt: &mut [Float]) {
        let d = self.derivative(State::new(y[0], y[1]));
        dydt[0] = d.prey;
        dydt[1] = d.predator;
    }
}

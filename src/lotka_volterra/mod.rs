//! Two-species Lotka-Volterra predator-prey model.
//!
//! ```text
//! d(prey)/dt     = alpha * prey - beta * prey * predator
//! d(predator)/dt = delta * prey * predator - gamma * predator
//! ```
//!
//! A simulation is described by an immutable [`SimulationRequest`] and run
//! with [`simulate`] (or [`simulate_with`] to pick the method and
//! tolerances). The result is a [`Trajectory`] sampled on the request's
//! evaluation grid, ready for time-series and phase-plane plotting.
//!
//! ```
//! use lvsim::lotka_volterra::{ModelParameters, SimulationRequest, State, simulate};
//!
//! let request = SimulationRequest::new(
//!     ModelParameters::new(1.0, 0.1, 0.1, 1.0),
//!     State::new(40.0, 9.0),
//!     50.0,
//! );
//! let trajectory = simulate(&request).unwrap();
//! assert_eq!(trajectory.len(), 500);
//! assert_eq!(trajectory.states()[0], State::new(40.0, 9.0));
//! ```

mod model;
mod preset;
mod request;
mod simulate;
mod trajectory;

pub use model::{LotkaVolterra, ModelParameters, State};
pub use preset::{Preset, Scenario};
pub use request::{DEFAULT_GRID_POINTS, EvaluationGrid, SimulationRequest, TimeSpan};
pub use simulate::{simulate, simulate_with};
pub use trajectory::Trajectory;

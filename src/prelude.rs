//! Convenient prelude: import the most commonly used traits, types, and functions.
//!
//! Bring this into scope with:
//!
//! ```rust
//! use lvsim::prelude::*;
//! ```
//!
//! Re-exports included:
//! - Core traits and types: `ODE`, `Interpolate`, `SolOut`, `ControlFlag`, `Status`.
//! - High-level API: `solve_ivp`, `IVPOptions`, `IVPSolution`, and `Method`.
//! - The Lotka-Volterra model: `ModelParameters`, `State`, `SimulationRequest`,
//!   `Preset`, `Trajectory`, `simulate` and `simulate_with`.

pub use crate::core::{
    interpolate::Interpolate,
    ode::ODE,
    solout::{ControlFlag, NoSolOut, SolOut},
    status::Status,
};
pub use crate::error::Error;
pub use crate::lotka_volterra::{
    EvaluationGrid, LotkaVolterra, ModelParameters, Preset, Scenario, SimulationRequest, State,
    TimeSpan, Trajectory, simulate, simulate_with,
};
pub use crate::methods::settings::{Settings, Tolerance};
pub use crate::solve::{IVPOptions, IVPSolution, Method, solve_ivp};

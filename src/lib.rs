//! Adaptive Runge-Kutta integration of initial value problems, and a
//! Lotka-Volterra predator-prey simulation built on it.
//!
//! - [`solve_ivp`](solve::solve_ivp) integrates any [`ODE`](core::ode::ODE)
//!   with Dormand–Prince 5(4) or Bogacki–Shampine 3(2) and samples the
//!   dense output on a caller-supplied grid.
//! - [`lotka_volterra`] defines the two-species model, its presets and the
//!   [`simulate`](lotka_volterra::simulate) entry point.

pub mod core;
pub mod error;
pub mod lotka_volterra;
pub mod methods;
pub mod prelude;
pub mod solve;

pub use error::{Error, InputError, SettingsError};

/// Floating point type used throughout the crate.
pub type Float = f64;

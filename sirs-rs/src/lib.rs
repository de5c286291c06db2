//! Deterministic solver for the SIRS compartmental epidemic model.
//!
//! Given a basic reproduction number, a recovery rate, a mean immunity
//! duration and a horizon in days, [`solve_sirs`] integrates
//!
//! ```text
//! ds/dt = -beta * s * i + omega * r
//! di/dt =  beta * s * i - gamma * i
//! dr/dt =  gamma * i    - omega * r
//! ```
//!
//! with `beta = r0 * gamma` and `omega = 1 / immunity_duration`, using a
//! fixed-step RK4 scheme, and returns the population fractions sampled once
//! per day. Every call is independent: there is no global state and no I/O.
//! Numerical settings (initial condition, step size, reporting cadence) live
//! in [`SolverConfig`].

pub mod config;
pub mod error;
pub mod integrator;
pub mod model;
pub mod output;
pub mod parameters;
pub mod solver;

pub use config::{
    DEFAULT_INITIAL_INFECTED, DEFAULT_INITIAL_RECOVERED, DEFAULT_REPORT_INTERVAL,
    DEFAULT_STEP_SIZE, SolverConfig,
};
pub use error::{SirsError, SirsResult};
pub use model::Compartments;
pub use output::{IntegrationStats, SamplePoint, Solution};
pub use parameters::{DerivedRates, MAX_DURATION, Parameters};
pub use solver::{MAX_REPORTS, SirsSolver, solve_sirs, solve_sirs_with_config};

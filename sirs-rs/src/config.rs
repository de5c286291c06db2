use serde::{Deserialize, Serialize};

use crate::error::{SirsError, SirsResult};
use crate::model::Compartments;

/// Fraction of the population infected at `t = 0`.
pub const DEFAULT_INITIAL_INFECTED: f64 = 0.001;
/// Fraction of the population recovered at `t = 0`.
pub const DEFAULT_INITIAL_RECOVERED: f64 = 0.;
/// RK4 step, in days.
pub const DEFAULT_STEP_SIZE: f64 = 0.1;
/// Spacing between reported samples, in days.
pub const DEFAULT_REPORT_INTERVAL: f64 = 1.;

/// Numerical settings of the solver. These are not epidemiological inputs;
/// the defaults are the canonical choice and only need overriding to
/// calibrate against a reference output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub initial_infected: f64,
    pub initial_recovered: f64,
    pub step_size: f64,
    pub report_interval: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            initial_infected: DEFAULT_INITIAL_INFECTED,
            initial_recovered: DEFAULT_INITIAL_RECOVERED,
            step_size: DEFAULT_STEP_SIZE,
            report_interval: DEFAULT_REPORT_INTERVAL,
        }
    }
}

fn in_unit_interval(x: f64) -> bool {
    (0. ..=1.).contains(&x)
}

impl SolverConfig {
    pub fn with_initial_infected(mut self, initial_infected: f64) -> Self {
        self.initial_infected = initial_infected;
        self
    }

    pub fn with_initial_recovered(mut self, initial_recovered: f64) -> Self {
        self.initial_recovered = initial_recovered;
        self
    }

    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    pub fn with_report_interval(mut self, report_interval: f64) -> Self {
        self.report_interval = report_interval;
        self
    }

    pub fn validate(&self) -> SirsResult<()> {
        if !in_unit_interval(self.initial_infected) {
            return Err(SirsError::invalid(
                "initial_infected",
                self.initial_infected,
                "must be in [0, 1]",
            ));
        }
        if !in_unit_interval(self.initial_recovered) {
            return Err(SirsError::invalid(
                "initial_recovered",
                self.initial_recovered,
                "must be in [0, 1]",
            ));
        }
        let seeded = self.initial_infected + self.initial_recovered;
        if seeded > 1. {
            return Err(SirsError::invalid(
                "initial_recovered",
                self.initial_recovered,
                "initial infected and recovered fractions must sum to at most 1",
            ));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.) {
            return Err(SirsError::invalid(
                "step_size",
                self.step_size,
                "must be finite and > 0",
            ));
        }
        if !(self.report_interval.is_finite() && self.report_interval > 0.) {
            return Err(SirsError::invalid(
                "report_interval",
                self.report_interval,
                "must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// The state at `t = 0`. Susceptible takes whatever the seeded
    /// compartments leave, so the triple sums to exactly 1.
    pub fn initial_state(&self) -> SirsResult<Compartments> {
        self.validate()?;
        let s = 1. - self.initial_infected - self.initial_recovered;
        Ok(Compartments::new(
            s,
            self.initial_infected,
            self.initial_recovered,
        ))
    }
}

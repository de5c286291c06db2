use serde::{Deserialize, Serialize};

use crate::error::{SirsError, SirsResult};

/// Longest horizon accepted, in days.
pub const MAX_DURATION: i64 = 1_000_000;

/// Epidemiological inputs for a single solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Basic reproduction number.
    pub r0: f64,
    /// Per-day recovery rate.
    pub gamma: f64,
    /// Mean days of immunity before returning to susceptible.
    pub immunity_duration: f64,
    /// Days to simulate.
    pub duration: i64,
}

/// Rate constants of the SIRS system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedRates {
    pub beta: f64,
    pub gamma: f64,
    pub omega: f64,
}

impl Parameters {
    pub fn new(r0: f64, gamma: f64, immunity_duration: f64, duration: i64) -> Parameters {
        Parameters {
            r0,
            gamma,
            immunity_duration,
            duration,
        }
    }

    /// Checks every input against its domain, in declaration order, and
    /// reports the first violation.
    pub fn validate(&self) -> SirsResult<()> {
        if self.r0.is_nan() || self.r0 <= 0. {
            return Err(SirsError::invalid("r0", self.r0, "must be > 0"));
        }
        if !self.r0.is_finite() {
            return Err(SirsError::invalid("r0", self.r0, "must be finite"));
        }
        if self.gamma.is_nan() || self.gamma <= 0. || self.gamma > 1. {
            return Err(SirsError::invalid("gamma", self.gamma, "must be in (0, 1]"));
        }
        // An infinite immunity duration is allowed: it reduces the model to SIR.
        if self.immunity_duration.is_nan() || self.immunity_duration <= 0. {
            return Err(SirsError::invalid(
                "immunity_duration",
                self.immunity_duration,
                "must be > 0",
            ));
        }
        if self.duration <= 0 {
            return Err(SirsError::invalid(
                "duration",
                self.duration as f64,
                "must be > 0",
            ));
        }
        if self.duration > MAX_DURATION {
            return Err(SirsError::invalid(
                "duration",
                self.duration as f64,
                "must be at most MAX_DURATION days",
            ));
        }
        Ok(())
    }

    /// Validates the parameters and converts them to ODE rate constants.
    pub fn derive_rates(&self) -> SirsResult<DerivedRates> {
        self.validate()?;
        Ok(DerivedRates {
            beta: self.r0 * self.gamma,
            gamma: self.gamma,
            omega: 1. / self.immunity_duration,
        })
    }
}

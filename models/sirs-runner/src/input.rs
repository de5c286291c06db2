use serde::Deserialize;
use sirs::{Parameters, SolverConfig};

use crate::error::{RunnerError, RunnerResult};

/// Most decimal places an `f64` can meaningfully carry.
pub const MAX_PRECISION: u32 = 17;

/// The `input` section of a run description. Missing keys take the values
/// the interactive model starts from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunInput {
    pub r0: f64,
    pub gamma: f64,
    pub immunity_duration: f64,
    pub duration: i64,
    #[serde(flatten)]
    pub solver: SolverConfig,
    /// Decimal places kept for the fractions in the output table.
    pub precision: Option<u32>,
}

impl Default for RunInput {
    fn default() -> Self {
        RunInput {
            r0: 2.5,
            gamma: 0.2,
            immunity_duration: 180.,
            duration: 365,
            solver: SolverConfig::default(),
            precision: None,
        }
    }
}

impl RunInput {
    /// Checks the runner-side settings; model inputs are checked by the solver.
    pub fn validate(&self) -> RunnerResult<()> {
        match self.precision {
            Some(p) if p > MAX_PRECISION => Err(RunnerError::Protocol(format!(
                "precision must be at most {MAX_PRECISION}, got {p}"
            ))),
            _ => Ok(()),
        }
    }

    pub fn parameters(&self) -> Parameters {
        Parameters::new(self.r0, self.gamma, self.immunity_duration, self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let input: RunInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(input, RunInput::default());
        assert_eq!(input.parameters(), Parameters::new(2.5, 0.2, 180., 365));
    }

    #[test]
    fn test_solver_settings_inline() {
        let input: RunInput = serde_json::from_value(json!({
            "r0": 1.8,
            "duration": 120,
            "initial_infected": 0.01,
            "step_size": 0.05,
            "precision": 3
        }))
        .unwrap();
        assert_eq!(input.r0, 1.8);
        assert_eq!(input.gamma, 0.2);
        assert_eq!(input.duration, 120);
        assert_eq!(input.solver.initial_infected, 0.01);
        assert_eq!(input.solver.step_size, 0.05);
        assert_eq!(input.solver.report_interval, sirs::DEFAULT_REPORT_INTERVAL);
        assert_eq!(input.precision, Some(3));
    }

    #[test]
    fn test_precision_bounds() {
        let input: RunInput = serde_json::from_value(json!({ "precision": 17 })).unwrap();
        assert!(input.validate().is_ok());
        for precision in [18, 400, u32::MAX] {
            let input: RunInput =
                serde_json::from_value(json!({ "precision": precision })).unwrap();
            assert!(matches!(input.validate(), Err(RunnerError::Protocol(_))));
        }
    }

    #[test]
    fn test_integer_rates_accepted() {
        let input: RunInput =
            serde_json::from_value(json!({ "r0": 3, "immunity_duration": 90 })).unwrap();
        assert_eq!(input.r0, 3.);
        assert_eq!(input.immunity_duration, 90.);
    }

    #[test]
    fn test_negative_duration_parses() {
        // Rejected later by the solver, not by the parser.
        let input: RunInput = serde_json::from_value(json!({ "duration": -5 })).unwrap();
        assert!(
            sirs::solve_sirs_with_config(&input.parameters(), &input.solver)
                .unwrap_err()
                .is_invalid_parameter()
        );
    }
}

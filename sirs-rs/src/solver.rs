use crate::config::SolverConfig;
use crate::error::{SirsError, SirsResult};
use crate::integrator::{Rk4, TIME_EPSILON};
use crate::model::{Compartments, SirsModel};
use crate::output::{SamplePoint, Solution};
use crate::parameters::Parameters;

/// Upper bound on the number of reported samples in one solve.
pub const MAX_REPORTS: usize = 1_000_000;

/// A validated solver configuration that can be applied to any number of
/// parameter sets. Holds no state between solves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SirsSolver {
    config: SolverConfig,
}

impl Default for SirsSolver {
    fn default() -> Self {
        SirsSolver {
            config: SolverConfig::default(),
        }
    }
}

impl SirsSolver {
    pub fn new(config: SolverConfig) -> SirsResult<SirsSolver> {
        config.validate()?;
        Ok(SirsSolver { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Number of samples after the initial one: one per reporting interval
    /// that starts before the horizon.
    fn reporting_steps(&self, horizon: f64) -> SirsResult<usize> {
        let reports = (horizon / self.config.report_interval - TIME_EPSILON)
            .ceil()
            .max(1.);
        if reports > MAX_REPORTS as f64 {
            return Err(SirsError::invalid(
                "report_interval",
                self.config.report_interval,
                "yields more samples than MAX_REPORTS over this duration",
            ));
        }
        Ok(reports as usize)
    }

    pub fn solve(&self, parameters: &Parameters) -> SirsResult<Solution> {
        let rates = parameters.derive_rates()?;
        let initial = self.config.initial_state()?;
        log::debug!(
            "solving SIRS with beta = {}, gamma = {}, omega = {}",
            rates.beta,
            rates.gamma,
            rates.omega
        );

        let model = SirsModel::new(rates);
        let rk4 = Rk4::new(self.config.step_size);
        let horizon = parameters.duration as f64;
        let reports = self.reporting_steps(horizon)?;

        let mut solution = Solution::with_capacity(reports + 1);
        solution.push(SamplePoint::new(0., &initial));

        let mut t = 0.;
        let mut y = *initial.as_vector();
        for k in 1..=reports {
            let target = if k == reports {
                horizon
            } else {
                k as f64 * self.config.report_interval
            };
            y = rk4.integrate(&model, t, target, y, solution.stats_mut())?;
            t = target;
            solution.push(SamplePoint::new(t, &Compartments::from(y)));
        }

        let stats = solution.stats();
        log::debug!(
            "integrated {} steps to t = {} ({} samples, {} clamped)",
            stats.steps,
            t,
            solution.len(),
            stats.clamped_steps
        );
        Ok(solution)
    }
}

/// Solves the SIRS model with the default initial condition, step size and
/// daily reporting.
///
/// ```
/// let solution = sirs::solve_sirs(2.5, 0.2, 180., 365).unwrap();
/// assert_eq!(solution.len(), 366);
/// assert_eq!(solution.first().unwrap().time, 0.);
/// assert_eq!(solution.last().unwrap().time, 365.);
/// ```
pub fn solve_sirs(
    r0: f64,
    gamma: f64,
    immunity_duration: f64,
    duration: i64,
) -> SirsResult<Solution> {
    SirsSolver::default().solve(&Parameters::new(r0, gamma, immunity_duration, duration))
}

pub fn solve_sirs_with_config(
    parameters: &Parameters,
    config: &SolverConfig,
) -> SirsResult<Solution> {
    SirsSolver::new(*config)?.solve(parameters)
}

//! Fixed-step fourth-order Runge-Kutta integration.

use nalgebra::SVector;

use crate::error::{SirsError, SirsResult};
use crate::output::IntegrationStats;

/// Slack used when deciding whether a span of time needs one more step.
pub const TIME_EPSILON: f64 = 1e-9;

/// A right-hand side `dy/dt = f(t, y)` over a fixed-size state vector.
pub trait OdeSystem<const D: usize> {
    fn derivative(&self, t: f64, y: &SVector<f64, D>) -> SVector<f64, D>;

    /// Pulls the state back into its admissible region after a step.
    /// Returns `true` if the state had to be changed.
    fn project(&self, _y: &mut SVector<f64, D>) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rk4 {
    step_size: f64,
}

impl Rk4 {
    pub fn new(step_size: f64) -> Rk4 {
        Rk4 { step_size }
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// One classical RK4 step of size `h` from `(t, y)`.
    pub fn step<S, const D: usize>(
        &self,
        system: &S,
        t: f64,
        y: &SVector<f64, D>,
        h: f64,
    ) -> SVector<f64, D>
    where
        S: OdeSystem<D>,
    {
        let half = 0.5 * h;
        let k1 = system.derivative(t, y);
        let k2 = system.derivative(t + half, &(y + k1 * half));
        let k3 = system.derivative(t + half, &(y + k2 * half));
        let k4 = system.derivative(t + h, &(y + k3 * h));
        y + (k1 + k2 * 2. + k3 * 2. + k4) * (h / 6.)
    }

    /// Number of steps needed to cover `span`; the last one may be partial.
    pub fn steps_for(&self, span: f64) -> usize {
        if span <= 0. {
            return 0;
        }
        (span / self.step_size - TIME_EPSILON).ceil().max(1.) as usize
    }

    /// Advances `y` from `t0` to exactly `t1`.
    ///
    /// Step times are computed as `t0 + k * h` rather than accumulated, and
    /// the final step is shortened so it lands on `t1`. After every step the
    /// state is checked for non-finite values and then projected.
    pub fn integrate<S, const D: usize>(
        &self,
        system: &S,
        t0: f64,
        t1: f64,
        mut y: SVector<f64, D>,
        stats: &mut IntegrationStats,
    ) -> SirsResult<SVector<f64, D>>
    where
        S: OdeSystem<D>,
    {
        let n = self.steps_for(t1 - t0);
        for k in 0..n {
            let t = t0 + k as f64 * self.step_size;
            let h = if k + 1 == n { t1 - t } else { self.step_size };
            y = self.step(system, t, &y, h);
            stats.steps += 1;

            if y.iter().any(|x| !x.is_finite()) {
                return Err(SirsError::NumericalInstability { time: t + h });
            }
            if system.project(&mut y) {
                stats.clamped_steps += 1;
                log::warn!("state left its admissible region at t = {}", t + h);
            }
        }
        Ok(y)
    }
}

use nalgebra::Vector3;

use crate::integrator::OdeSystem;
use crate::parameters::DerivedRates;

/// Population fractions `(s, i, r)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compartments(Vector3<f64>);

impl Compartments {
    pub fn new(susceptible: f64, infected: f64, recovered: f64) -> Compartments {
        Compartments(Vector3::new(susceptible, infected, recovered))
    }

    pub fn susceptible(&self) -> f64 {
        self.0[0]
    }

    pub fn infected(&self) -> f64 {
        self.0[1]
    }

    pub fn recovered(&self) -> f64 {
        self.0[2]
    }

    pub fn total(&self) -> f64 {
        self.0.sum()
    }

    pub fn as_vector(&self) -> &Vector3<f64> {
        &self.0
    }
}

impl From<Vector3<f64>> for Compartments {
    fn from(y: Vector3<f64>) -> Self {
        Compartments(y)
    }
}

/// Clamps every fraction to `[0, 1]` and rescales the triple to sum to 1.
/// Returns `false` and leaves `y` untouched when all fractions were already
/// in range.
///
/// If nothing is left after clamping the state is filled with NaN, which the
/// integrator reports as a numerical instability.
pub fn clamp_and_normalize(y: &mut Vector3<f64>) -> bool {
    if y.iter().all(|x| (0. ..=1.).contains(x)) {
        return false;
    }
    y.apply(|x| *x = x.clamp(0., 1.));
    let total = y.sum();
    if total > 0. {
        *y /= total;
    } else {
        y.fill(f64::NAN);
    }
    true
}

/// The SIRS right-hand side:
///
/// ```text
/// ds/dt = -beta * s * i + omega * r
/// di/dt =  beta * s * i - gamma * i
/// dr/dt =  gamma * i    - omega * r
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SirsModel {
    rates: DerivedRates,
}

impl SirsModel {
    pub fn new(rates: DerivedRates) -> SirsModel {
        SirsModel { rates }
    }

    pub fn rates(&self) -> &DerivedRates {
        &self.rates
    }
}

impl OdeSystem<3> for SirsModel {
    fn derivative(&self, _t: f64, y: &Vector3<f64>) -> Vector3<f64> {
        let DerivedRates { beta, gamma, omega } = self.rates;
        let (s, i, r) = (y[0], y[1], y[2]);

        let infection = beta * s * i;
        let recovery = gamma * i;
        let waning = omega * r;

        Vector3::new(
            -infection + waning,
            infection - recovery,
            recovery - waning,
        )
    }

    fn project(&self, y: &mut Vector3<f64>) -> bool {
        clamp_and_normalize(y)
    }
}

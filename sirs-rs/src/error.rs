use std::fmt::{self, Display};

/// Errors returned by the solver.
///
/// Both kinds are final: the computation is deterministic, so retrying with
/// the same inputs yields the same error.
#[derive(Debug, Clone, PartialEq)]
pub enum SirsError {
    /// An input is outside its domain. Raised before any integration work.
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// A non-finite value showed up in the state at simulated `time`.
    NumericalInstability { time: f64 },
}

impl SirsError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        SirsError::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, SirsError::InvalidParameter { .. })
    }

    pub fn is_numerical_instability(&self) -> bool {
        matches!(self, SirsError::NumericalInstability { .. })
    }
}

impl std::error::Error for SirsError {}

impl Display for SirsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SirsError::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "invalid parameter `{name}` = {value}: {reason}"),
            SirsError::NumericalInstability { time } => {
                write!(f, "numerical instability: non-finite state at t = {time}")
            }
        }
    }
}

pub type SirsResult<T> = Result<T, SirsError>;

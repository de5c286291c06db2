use std::fmt::{self, Display};
use std::io;

use sirs::SirsError;

/// Everything that can stop a run, with conversions so `?` works on the
/// underlying library errors.
#[derive(Debug)]
pub enum RunnerError {
    Io(io::Error),
    Json(serde_json::Error),
    Toml(toml::de::Error),
    Csv(csv::Error),
    Model(SirsError),
    Logging(String),
    Protocol(String),
}

impl From<io::Error> for RunnerError {
    fn from(error: io::Error) -> Self {
        RunnerError::Io(error)
    }
}

impl From<serde_json::Error> for RunnerError {
    fn from(error: serde_json::Error) -> Self {
        RunnerError::Json(error)
    }
}

impl From<toml::de::Error> for RunnerError {
    fn from(error: toml::de::Error) -> Self {
        RunnerError::Toml(error)
    }
}

impl From<csv::Error> for RunnerError {
    fn from(error: csv::Error) -> Self {
        RunnerError::Csv(error)
    }
}

impl From<SirsError> for RunnerError {
    fn from(error: SirsError) -> Self {
        RunnerError::Model(error)
    }
}

impl std::error::Error for RunnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunnerError::Io(e) => Some(e),
            RunnerError::Json(e) => Some(e),
            RunnerError::Toml(e) => Some(e),
            RunnerError::Csv(e) => Some(e),
            RunnerError::Model(e) => Some(e),
            RunnerError::Logging(_) | RunnerError::Protocol(_) => None,
        }
    }
}

impl Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunnerError::Io(e) => write!(f, "I/O error: {e}"),
            RunnerError::Json(e) => write!(f, "invalid JSON: {e}"),
            RunnerError::Toml(e) => write!(f, "invalid parameter file: {e}"),
            RunnerError::Csv(e) => write!(f, "failed to write CSV: {e}"),
            RunnerError::Model(e) => write!(f, "{e}"),
            RunnerError::Logging(msg) => write!(f, "failed to configure logging: {msg}"),
            RunnerError::Protocol(msg) => write!(f, "{msg}"),
        }
    }
}

pub type RunnerResult<T> = Result<T, RunnerError>;

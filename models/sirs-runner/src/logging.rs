use std::str::FromStr;

use log::LevelFilter;
use log4rs::Config;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::error::{RunnerError, RunnerResult};

/// Environment variable holding the log level filter.
pub const LOG_LEVEL_VAR: &str = "SIRS_LOG";

// ISO 8601 timestamp and color coded level tag
const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

/// Parses a level name, falling back to `Info` for anything unrecognized.
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Builds the console configuration. Logs go to stderr so that stdout stays
/// free for CSV output.
pub fn config(level: LevelFilter) -> RunnerResult<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| RunnerError::Logging(e.to_string()))
}

pub fn init() -> RunnerResult<log4rs::Handle> {
    let level = parse_level(std::env::var(LOG_LEVEL_VAR).ok().as_deref());
    log4rs::init_config(config(level)?).map_err(|e| RunnerError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(None), LevelFilter::Info);
        assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_level(Some(" WARN ")), LevelFilter::Warn);
        assert_eq!(parse_level(Some("off")), LevelFilter::Off);
        assert_eq!(parse_level(Some("chatty")), LevelFilter::Info);
    }

    #[test]
    fn test_config_builds() {
        let config = config(LevelFilter::Debug).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Debug);
        assert_eq!(config.appenders().len(), 1);
    }
}

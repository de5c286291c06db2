pub mod environment;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;

use environment::Environment;
use error::RunnerResult;
use input::RunInput;
use output::{HEADERS, OUTPUT_FILE};
use sirs::SirsSolver;

pub fn run(env: &Environment<RunInput>) -> RunnerResult<()> {
    let input = &env.input;
    input.validate()?;
    log::info!(
        "replicate {}: r0 = {}, gamma = {}, immunity = {} days, horizon = {} days",
        env.replicate,
        input.r0,
        input.gamma,
        input.immunity_duration,
        input.duration
    );

    let solution = SirsSolver::new(input.solver)?.solve(&input.parameters())?;

    if let Some(peak) = solution.peak_infected() {
        log::info!(
            "infections peak at {:.4} on day {}",
            peak.infected,
            peak.time
        );
    }
    if let Some(last) = solution.final_point() {
        log::info!(
            "day {}: S = {:.4}, I = {:.4}, R = {:.4}",
            last.time,
            last.susceptible,
            last.infected,
            last.recovered
        );
    }

    let rows = output::format_rows(&solution, input.precision);
    env.write_csv(OUTPUT_FILE, &HEADERS, &rows)
}

fn main() {
    let logger = logging::init();
    if let Err(e) = &logger {
        eprintln!("Error: {e}");
    }

    let result = Environment::<RunInput>::load().and_then(|env| run(&env));
    if let Err(e) = result {
        if logger.is_ok() {
            log::error!("{e}");
        } else {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;

    use super::*;
    use crate::error::RunnerError;

    fn environment(input: serde_json::Value, dir: &std::path::Path) -> Environment<RunInput> {
        Environment::from_json(json!({
            "input": input,
            "output": { "spec": "filesystem", "dir": dir.to_str().unwrap() }
        }))
        .with_input_type()
        .unwrap()
    }

    #[test]
    fn test_run_writes_daily_table() {
        let dir = tempfile::tempdir().unwrap();
        let env = environment(
            json!({
                "seed": 1,
                "r0": 2.5,
                "gamma": 0.2,
                "immunity_duration": 180,
                "duration": 30,
                "precision": 3
            }),
            dir.path(),
        );
        run(&env).unwrap();

        let mut reader = csv::Reader::from_path(dir.path().join(OUTPUT_FILE)).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, HEADERS);
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 31);
        assert_eq!(
            records[0].iter().collect::<Vec<_>>(),
            vec!["0", "0.999", "0.001", "0"]
        );
        assert_eq!(&records[30][0], "30");
    }

    #[test]
    fn test_run_rejects_invalid_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let env = environment(json!({ "gamma": 0 }), dir.path());
        let err = run(&env).unwrap_err();
        assert!(matches!(err, RunnerError::Model(ref e) if e.is_invalid_parameter()));
        assert!(!dir.path().join(OUTPUT_FILE).exists());
    }

    #[test]
    fn test_run_rejects_excessive_precision() {
        let dir = tempfile::tempdir().unwrap();
        let env = environment(json!({ "duration": 10, "precision": 400 }), dir.path());
        assert!(matches!(run(&env), Err(RunnerError::Protocol(_))));
        assert!(!dir.path().join(OUTPUT_FILE).exists());
    }

    #[test]
    fn test_run_uses_parameter_file() {
        let dir = tempfile::tempdir().unwrap();
        let params = dir.path().join("params.toml");
        fs::write(&params, "duration = 14\nreport_interval = 7.0\n").unwrap();
        let out = dir.path().join("out");

        let env = Environment::from_json(json!({
            "input": { "r0": 1.5 },
            "model": { "files": { "parameters": params.to_str().unwrap() } },
            "output": { "spec": "filesystem", "dir": out.to_str().unwrap() }
        }))
        .with_parameter_file(environment::PARAMETERS_FILE)
        .unwrap()
        .with_input_type::<RunInput>()
        .unwrap();
        assert_eq!(env.input.r0, 1.5);
        assert_eq!(env.input.duration, 14);
        run(&env).unwrap();

        let written = fs::read_to_string(out.join(OUTPUT_FILE)).unwrap();
        let times: Vec<&str> = written
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(times, vec!["0", "7", "14"]);
    }
}

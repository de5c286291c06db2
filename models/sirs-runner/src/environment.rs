use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{RunnerError, RunnerResult};

/// Key under `model.files` naming a TOML file of default inputs.
pub const PARAMETERS_FILE: &str = "parameters";

/// A parsed run description: the `input` section, the files the model was
/// given and where output should go.
pub struct Environment<I = ()> {
    input_json: serde_json::Map<String, Value>,
    pub input: I,
    pub seed: u64,
    pub replicate: u64,
    pub files: HashMap<String, PathBuf>,
    output: Value,
}

impl Environment {
    pub fn from_json(data: Value) -> Self {
        let mut input_json = data
            .get("input")
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default();

        let seed = input_json
            .remove("seed")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        let replicate = input_json
            .remove("replicate")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        let files = data
            .get("model")
            .and_then(|m| m.get("files"))
            .and_then(|f| f.as_object())
            .map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), PathBuf::from(s))))
                    .collect()
            })
            .unwrap_or_default();

        let output = data.get("output").cloned().unwrap_or(Value::Null);

        Self {
            input_json,
            input: (),
            seed,
            replicate,
            files,
            output,
        }
    }

    pub fn from_reader<R: Read>(mut reader: R) -> RunnerResult<Self> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        if raw.trim().is_empty() {
            return Err(RunnerError::Protocol("no run description on stdin".into()));
        }
        let data: Value = serde_json::from_str(&raw)?;
        Ok(Self::from_json(data))
    }

    pub fn from_stdin() -> RunnerResult<Self> {
        Self::from_reader(io::stdin().lock())
    }

    /// Fills in inputs from the TOML file registered under `key`, if any.
    /// Keys already present in the JSON input win.
    pub fn with_parameter_file(mut self, key: &str) -> RunnerResult<Self> {
        let Some(path) = self.files.get(key) else {
            return Ok(self);
        };
        log::debug!("loading parameters from {}", path.display());
        let table: toml::Table = toml::from_str(&fs::read_to_string(path)?)?;
        let Value::Object(defaults) = serde_json::to_value(table)? else {
            return Err(RunnerError::Protocol(format!(
                "parameter file {} is not a table",
                path.display()
            )));
        };
        for (k, v) in defaults {
            self.input_json.entry(k).or_insert(v);
        }
        Ok(self)
    }

    pub fn with_input_type<I: DeserializeOwned>(self) -> RunnerResult<Environment<I>> {
        let input_value = Value::Object(self.input_json.clone());
        let input = serde_json::from_value(input_value)?;
        Ok(Environment {
            input_json: self.input_json,
            input,
            seed: self.seed,
            replicate: self.replicate,
            files: self.files,
            output: self.output,
        })
    }
}

impl<I: DeserializeOwned> Environment<I> {
    pub fn load() -> RunnerResult<Self> {
        Environment::from_stdin()?
            .with_parameter_file(PARAMETERS_FILE)?
            .with_input_type::<I>()
    }
}

impl<I> Environment<I> {
    pub fn input_json(&self) -> &serde_json::Map<String, Value> {
        &self.input_json
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        let output = &self.output;

        // Check flat output
        if output.get("spec").and_then(|v| v.as_str()) == Some("filesystem") {
            return output
                .get("dir")
                .and_then(|v| v.as_str())
                .map(PathBuf::from);
        }

        // Check profiled output, preferring the default profile
        let profiles = output.get("profile").and_then(|v| v.as_object())?;
        let profile = profiles
            .get("default")
            .or_else(|| profiles.values().next())?;
        if profile.get("spec").and_then(|v| v.as_str()) == Some("filesystem") {
            return profile
                .get("dir")
                .and_then(|v| v.as_str())
                .map(PathBuf::from);
        }

        None
    }

    /// Writes a CSV table to `filename` under the output directory, or to
    /// stdout when the run has no filesystem output.
    pub fn write_csv(
        &self,
        filename: &str,
        headers: &[&str],
        rows: &[Vec<String>],
    ) -> RunnerResult<()> {
        match self.output_dir() {
            Some(dir) => {
                fs::create_dir_all(&dir)?;
                let path = dir.join(filename);
                log::info!("writing {} rows to {}", rows.len(), path.display());
                write_table(fs::File::create(path)?, headers, rows)
            }
            None => write_table(io::stdout().lock(), headers, rows),
        }
    }
}

fn write_table<W: Write>(writer: W, headers: &[&str], rows: &[Vec<String>]) -> RunnerResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

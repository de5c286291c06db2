use sirs::{SamplePoint, Solution};

use crate::input::MAX_PRECISION;

pub const OUTPUT_FILE: &str = "sirs_output.csv";
pub const HEADERS: [&str; 4] = ["time", "susceptible", "infected", "recovered"];

/// Decimal places kept for the time column when output is rounded.
const TIME_PRECISION: u32 = 1;

fn round(x: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals.min(MAX_PRECISION) as i32);
    (x * scale).round() / scale
}

fn format_point(point: &SamplePoint, precision: Option<u32>) -> Vec<String> {
    let values = [point.time, point.susceptible, point.infected, point.recovered];
    match precision {
        None => values.iter().map(|v| v.to_string()).collect(),
        Some(decimals) => values
            .iter()
            .enumerate()
            .map(|(col, v)| {
                let decimals = if col == 0 { TIME_PRECISION } else { decimals };
                round(*v, decimals).to_string()
            })
            .collect(),
    }
}

/// One row per sample, in time order. With `precision` set, fractions are
/// rounded to that many decimals and time to one decimal.
pub fn format_rows(solution: &Solution, precision: Option<u32>) -> Vec<Vec<String>> {
    solution
        .iter()
        .map(|point| format_point(point, precision))
        .collect()
}

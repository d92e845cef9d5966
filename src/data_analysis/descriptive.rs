// src/data_analysis/descriptive.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt; // Needed for min/max on Array1

use crate::data_input::observations::ObservationTable;

/// Per-group descriptive statistics, printed to the console and rendered in
/// the report's data overview table. Quartiles feed the box plot.
#[derive(Debug, Clone)]
pub struct GroupSummary {
    pub label: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (ddof = 1); 0.0 for singleton groups.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

/// Summarizes every group of the table, in first-seen label order.
pub fn summarize_groups(table: &ObservationTable) -> Vec<GroupSummary> {
    table
        .grouped()
        .into_iter()
        .map(|(label, values)| summarize(label, &values))
        .collect()
}

fn summarize(label: String, values: &[f64]) -> GroupSummary {
    let array = Array1::from(values.to_vec());
    let count = array.len();
    let mean = array.mean().unwrap_or(0.0);

    let std_dev = if count > 1 {
        let sum_sq: f64 = array.iter().map(|v| (v - mean).powi(2)).sum();
        (sum_sq / (count - 1) as f64).sqrt()
    } else {
        0.0
    };

    let min = array.min().map(|v| *v).unwrap_or(f64::NAN);
    let max = array.max().map(|v| *v).unwrap_or(f64::NAN);

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    GroupSummary {
        label,
        count,
        mean,
        std_dev,
        min,
        max,
        q1: percentile(&sorted, 0.25),
        median: percentile(&sorted, 0.5),
        q3: percentile(&sorted, 0.75),
    }
}

/// Linear-interpolated percentile of an ascending-sorted slice, p in [0, 1].
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

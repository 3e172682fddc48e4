// Quartile statistics over a closed window of sample values.

use thiserror::Error;

use crate::models::Summary;

/// Contract violation: the summarizer was handed zero samples. Callers must
/// guard with a non-empty check before flushing a window.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot summarize an empty sample window")]
pub struct EmptyInput;

/// Computes mean, min/max, and interpolated quartiles over `values`.
pub fn summarize(values: &[f64]) -> Result<Summary, EmptyInput> {
    if values.is_empty() {
        return Err(EmptyInput);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

    Ok(Summary {
        mean,
        max: sorted[sorted.len() - 1],
        q3: percentile(&sorted, 75.0),
        median: percentile(&sorted, 50.0),
        q1: percentile(&sorted, 25.0),
        min: sorted[0],
    })
}

/// Percentile with linear interpolation between closest ranks over an
/// ascending-sorted slice: rank = p/100 * (n-1).
fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

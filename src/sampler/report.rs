// iperf3 JSON report parsing (subset: start timestamp + per-interval sums).
// Intervals lacking a `sum` record carry no aggregate throughput and are skipped.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::models::Run;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid report JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("start timestamp {0} out of range")]
    Timestamp(i64),
}

#[derive(Debug, Deserialize)]
struct Report {
    start: Start,
    #[serde(default)]
    intervals: Vec<Interval>,
}

#[derive(Debug, Deserialize)]
struct Start {
    timestamp: Timestamp,
}

#[derive(Debug, Deserialize)]
struct Timestamp {
    timesecs: i64,
}

#[derive(Debug, Deserialize)]
struct Interval {
    #[serde(default)]
    sum: Option<IntervalSum>,
}

#[derive(Debug, Deserialize)]
struct IntervalSum {
    bits_per_second: f64,
}

/// Parses raw report bytes into a [`Run`] whose samples are spaced
/// `sample_interval_secs` apart.
pub fn parse_run(raw: &[u8], sample_interval_secs: f64) -> Result<Run, ReportError> {
    let report: Report = serde_json::from_slice(raw)?;
    let timesecs = report.start.timestamp.timesecs;
    let start: DateTime<Utc> =
        DateTime::from_timestamp(timesecs, 0).ok_or(ReportError::Timestamp(timesecs))?;

    let values: Vec<f64> = report
        .intervals
        .into_iter()
        .filter_map(|i| i.sum.map(|s| s.bits_per_second))
        .collect();

    Ok(Run::new(start, values, sample_interval_secs))
}

// A single throughput measurement, and one sampler invocation's ordered output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Divisor for bits/s -> Mbps in emitted payloads and artifacts.
pub const BITS_PER_MBIT: f64 = 1024.0 * 1024.0;

/// One interval measurement: bits per second, seconds elapsed since the run start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub bits_per_second: f64,
    pub offset_secs: f64,
}

impl Sample {
    pub fn mbps(&self) -> f64 {
        self.bits_per_second / BITS_PER_MBIT
    }
}

/// One completed sampler invocation: absolute start instant plus ordered
/// interval samples spaced `sample_interval_secs` apart.
/// Immutable after construction; `samples[i].offset_secs == i * sample_interval_secs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    start: DateTime<Utc>,
    samples: Vec<Sample>,
    sample_interval_secs: f64,
}

impl Run {
    /// Builds a run from ordered throughput values; offsets are derived from
    /// the fixed inter-sample interval.
    pub fn new(start: DateTime<Utc>, values: Vec<f64>, sample_interval_secs: f64) -> Self {
        let samples = values
            .into_iter()
            .enumerate()
            .map(|(i, bits_per_second)| Sample {
                bits_per_second,
                offset_secs: i as f64 * sample_interval_secs,
            })
            .collect();
        Self {
            start,
            samples,
            sample_interval_secs,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn sample_interval_secs(&self) -> f64 {
        self.sample_interval_secs
    }

    /// Absolute timestamp of a sample: run start advanced by the sample's offset.
    pub fn timestamp_of(&self, sample: &Sample) -> DateTime<Utc> {
        self.start + chrono::Duration::milliseconds((sample.offset_secs * 1000.0).round() as i64)
    }
}

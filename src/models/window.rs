// Day-scoped accumulation: a mutable open Window, closed into an immutable Segment.

use chrono::{DateTime, NaiveDate, Utc};

use super::Sample;

/// Mutable accumulation of samples for one calendar day. Opened at the first
/// sample's absolute timestamp; closed into a [`Segment`] on day rollover or
/// when the input is exhausted.
#[derive(Debug, Clone)]
pub struct Window {
    day: NaiveDate,
    first_timestamp: DateTime<Utc>,
    samples: Vec<Sample>,
}

impl Window {
    /// Opens an empty window owned by the calendar day of `first_timestamp` (UTC).
    pub fn open(first_timestamp: DateTime<Utc>) -> Self {
        Self {
            day: first_timestamp.date_naive(),
            first_timestamp,
            samples: Vec::new(),
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Closes the window. Produced exactly once per window; the segment is
    /// never mutated afterwards.
    pub fn close(self) -> Segment {
        Segment {
            day: self.day,
            first_timestamp: self.first_timestamp,
            samples: self.samples,
        }
    }
}

/// Immutable, day-aligned output of a closed [`Window`].
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub day: NaiveDate,
    pub first_timestamp: DateTime<Utc>,
    pub samples: Vec<Sample>,
}

impl Segment {
    pub fn mbps_values(&self) -> Vec<f64> {
        self.samples.iter().map(Sample::mbps).collect()
    }
}

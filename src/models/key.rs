// Grouping key and experiment cadences for cross-run comparison.

use std::fmt;

/// Identifies one series in the overall comparison:
/// `(instance, experiment, region)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregationKey {
    pub instance: String,
    pub experiment: String,
    pub region: String,
}

impl AggregationKey {
    pub fn new(
        instance: impl Into<String>,
        experiment: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            instance: instance.into(),
            experiment: experiment.into(),
            region: region.into(),
        }
    }

    /// Chart legend label, `experiment@region`.
    pub fn label(&self) -> String {
        format!("{}@{}", self.experiment, self.region)
    }
}

impl fmt::Display for AggregationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.instance, self.experiment, self.region)
    }
}

/// Known experiment cadences. Each carries the relative tick step used when
/// series of different sampling rates share one axis, and the fixed
/// inter-sample delay used to reconstruct timestamps when replaying archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    FullSpeed,
    FiveSec30Sec,
    TenSec30Sec,
    TenSec60Sec,
    Unknown,
}

impl Cadence {
    pub fn from_experiment(name: &str) -> Self {
        match name {
            "full_speed" => Cadence::FullSpeed,
            "5sec_30sec" => Cadence::FiveSec30Sec,
            "10sec_30sec" => Cadence::TenSec30Sec,
            "10sec_60sec" => Cadence::TenSec60Sec,
            _ => Cadence::Unknown,
        }
    }

    /// Unit-less relative tick spacing for scatter plots.
    pub fn tick_step(self) -> usize {
        match self {
            Cadence::FullSpeed | Cadence::Unknown => 1,
            Cadence::FiveSec30Sec | Cadence::TenSec30Sec => 3,
            Cadence::TenSec60Sec => 6,
        }
    }

    /// Seconds between archived samples for this experiment.
    pub fn replay_delay_secs(self) -> f64 {
        match self {
            Cadence::FullSpeed | Cadence::Unknown => 10.0,
            Cadence::FiveSec30Sec | Cadence::TenSec30Sec => 30.0,
            Cadence::TenSec60Sec => 60.0,
        }
    }
}

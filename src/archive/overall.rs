// Cross-run comparison: one flat series per (instance, experiment, region),
// flattened into scatter/CDF series for the renderer.

use std::collections::HashMap;

use tracing::warn;

use crate::models::{AggregationKey, Cadence, Sample};
use crate::render::{CdfSeries, Series};

/// Merges whole-instance sample series across experiments and regions.
/// At most one series per key; the loader establishes uniqueness, so a
/// duplicate insert is a reprocessing mistake: first write wins, logged.
#[derive(Debug, Default)]
pub struct OverallAggregator {
    series: HashMap<AggregationKey, Vec<Sample>>,
}

impl OverallAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// First write wins. Returns false (and keeps the existing series) when
    /// the key was already present.
    pub fn insert(&mut self, key: AggregationKey, samples: Vec<Sample>) -> bool {
        match self.series.entry(key) {
            std::collections::hash_map::Entry::Occupied(e) => {
                warn!(key = %e.key(), "duplicate overall series ignored (first write wins)");
                false
            }
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(samples);
                true
            }
        }
    }

    pub fn get(&self, key: &AggregationKey) -> Option<&[Sample]> {
        self.series.get(key).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Distinct instance ids, sorted.
    pub fn instances(&self) -> Vec<String> {
        let mut out: Vec<String> = self.series.keys().map(|k| k.instance.clone()).collect();
        out.sort();
        out.dedup();
        out
    }

    /// All series for one instance, sorted by `experiment@region` label for a
    /// stable legend order.
    pub fn entries_for_instance(&self, instance: &str) -> Vec<(&AggregationKey, &[Sample])> {
        let mut entries: Vec<(&AggregationKey, &[Sample])> = self
            .series
            .iter()
            .filter(|(k, _)| k.instance == instance)
            .map(|(k, v)| (k, v.as_slice()))
            .collect();
        entries.sort_by_key(|(k, _)| k.label());
        entries
    }

    /// Scatter line for one key: relative tick positions from the experiment's
    /// cadence step, values in Mbps.
    pub fn scatter_series(key: &AggregationKey, samples: &[Sample]) -> Series {
        let step = Cadence::from_experiment(&key.experiment).tick_step();
        Series {
            label: key.label(),
            ticks: (0..samples.len()).map(|i| (i * step) as f64).collect(),
            values_mbps: samples.iter().map(Sample::mbps).collect(),
        }
    }

    /// Empirical CDF for one key: ascending Mbps values with rank/count
    /// probabilities.
    pub fn cdf_series(key: &AggregationKey, samples: &[Sample]) -> CdfSeries {
        let mut sorted: Vec<f64> = samples.iter().map(Sample::mbps).collect();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        CdfSeries {
            label: key.label(),
            cumulative: (0..n).map(|rank| rank as f64 / n as f64).collect(),
            sorted_mbps: sorted,
        }
    }
}

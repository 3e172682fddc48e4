// Offline analysis of archived benchmark results:
// results_dir/<experiment>/<region>/<instance>/*.json
// Per-instance day segmentation and whole-run series, then an overall
// cross-experiment comparison per instance.

mod loader;
mod overall;
mod segmenter;

pub use loader::{InstanceArchive, MalformedArchive, load_experiment, load_instance};
pub use overall::OverallAggregator;
pub use segmenter::ArchiveSegmenter;

use std::path::Path;

use tracing::info;

use crate::models::{AggregationKey, Cadence, Sample, Segment};
use crate::render::{CdfArtifact, CdfSeries, Renderer, ScatterArtifact, Series};

/// Per-day scatter line: epoch-second ticks reconstructed from the segment
/// start and the experiment's fixed inter-sample delay.
fn day_scatter(segment: &Segment, label: &str, delay_secs: f64) -> Series {
    let start = segment.first_timestamp.timestamp() as f64;
    Series {
        label: label.to_string(),
        ticks: (0..segment.samples.len())
            .map(|i| start + i as f64 * delay_secs)
            .collect(),
        values_mbps: segment.mbps_values(),
    }
}

fn cdf_of(values_mbps: Vec<f64>, label: &str) -> CdfSeries {
    let mut sorted = values_mbps;
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    CdfSeries {
        label: label.to_string(),
        cumulative: (0..n).map(|rank| rank as f64 / n as f64).collect(),
        sorted_mbps: sorted,
    }
}

/// Whole-run scatter line for one instance: every sample's absolute timestamp
/// against its throughput.
fn instance_series(archive: &InstanceArchive) -> Series {
    let mut ticks = Vec::new();
    let mut values_mbps = Vec::new();
    for run in &archive.runs {
        for sample in run.samples() {
            ticks.push(run.timestamp_of(sample).timestamp() as f64);
            values_mbps.push(sample.mbps());
        }
    }
    Series {
        label: archive.instance.clone(),
        ticks,
        values_mbps,
    }
}

fn write_day_artifacts<R: Renderer>(
    renderer: &R,
    dir: &Path,
    segment: &Segment,
    instance: &str,
    delay_secs: f64,
) -> anyhow::Result<()> {
    let name = segment.day.format("%Y-%m-%d").to_string();
    renderer.scatter(
        dir,
        &ScatterArtifact {
            name: name.clone(),
            x_label: "timestamp".into(),
            y_label: "bandwidth (Mbps)".into(),
            series: vec![day_scatter(segment, instance, delay_secs)],
        },
    )?;
    renderer.cdf(
        dir,
        &CdfArtifact {
            name,
            series: vec![cdf_of(segment.mbps_values(), instance)],
        },
    )?;
    Ok(())
}

fn write_overall_artifacts<R: Renderer>(
    renderer: &R,
    results_dir: &Path,
    aggregator: &OverallAggregator,
) -> anyhow::Result<()> {
    for instance in aggregator.instances() {
        let entries: Vec<_> = aggregator
            .entries_for_instance(&instance)
            .into_iter()
            .filter(|(_, samples)| !samples.is_empty())
            .collect();
        if entries.is_empty() {
            // Instance contributed no samples; no comparison to draw.
            continue;
        }
        let scatter: Vec<Series> = entries
            .iter()
            .map(|(key, samples)| OverallAggregator::scatter_series(key, samples))
            .collect();
        let cdf: Vec<CdfSeries> = entries
            .iter()
            .map(|(key, samples)| OverallAggregator::cdf_series(key, samples))
            .collect();

        renderer.scatter(
            results_dir,
            &ScatterArtifact {
                name: instance.clone(),
                x_label: "time (s)".into(),
                y_label: "bandwidth (Mbps)".into(),
                series: scatter,
            },
        )?;
        renderer.cdf(
            results_dir,
            &CdfArtifact {
                name: instance.clone(),
                series: cdf,
            },
        )?;
    }
    Ok(())
}

fn experiment_dirs(results_dir: &Path) -> anyhow::Result<Vec<std::path::PathBuf>> {
    let mut dirs: Vec<std::path::PathBuf> = std::fs::read_dir(results_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Full offline pass over `results_dir/<experiment>/<region>/<instance>`.
/// Per instance: day-aligned segment artifacts plus a whole-run series, all
/// handed to the renderer; whole runs also feed the overall comparison.
pub fn analyze<R: Renderer>(results_dir: &Path, renderer: &R) -> anyhow::Result<OverallAggregator> {
    let mut aggregator = OverallAggregator::new();

    for experiment_dir in experiment_dirs(results_dir)? {
        let experiment = experiment_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let delay_secs = Cadence::from_experiment(&experiment).replay_delay_secs();

        for archive in load_experiment(&experiment_dir, delay_secs)? {
            let instance_dir = experiment_dir.join(&archive.region).join(&archive.instance);
            let mut day_count = 0usize;

            for segment in ArchiveSegmenter::new(&archive.runs) {
                write_day_artifacts(renderer, &instance_dir, &segment, &archive.instance, delay_secs)?;
                day_count += 1;
            }

            let flat: Vec<Sample> = archive
                .runs
                .iter()
                .flat_map(|run| run.samples().iter().copied())
                .collect();

            if !flat.is_empty() {
                renderer.scatter(
                    &instance_dir,
                    &ScatterArtifact {
                        name: archive.instance.clone(),
                        x_label: "timestamp".into(),
                        y_label: "bandwidth (Mbps)".into(),
                        series: vec![instance_series(&archive)],
                    },
                )?;
                renderer.cdf(
                    &instance_dir,
                    &CdfArtifact {
                        name: archive.instance.clone(),
                        series: vec![cdf_of(
                            flat.iter().map(Sample::mbps).collect(),
                            &archive.instance,
                        )],
                    },
                )?;
            }

            info!(
                experiment = %experiment,
                region = %archive.region,
                instance = %archive.instance,
                days = day_count,
                samples = flat.len(),
                skipped = archive.skipped,
                "instance analyzed"
            );

            aggregator.insert(
                AggregationKey::new(&archive.instance, &experiment, &archive.region),
                flat,
            );
        }
    }

    write_overall_artifacts(renderer, results_dir, &aggregator)?;
    Ok(aggregator)
}

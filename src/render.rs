// Renderer seam. Chart appearance is out of scope: the analyzer finishes the
// numeric series and axis labels, a renderer turns artifacts into images.
// The built-in JsonRenderer just writes the artifacts as JSON files.

use std::path::Path;

use serde::Serialize;

/// One line/point-set of a scatter plot: tick positions plus Mbps values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub ticks: Vec<f64>,
    pub values_mbps: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterArtifact {
    pub name: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

/// One empirical CDF: ascending Mbps values with rank/count probabilities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CdfSeries {
    pub label: String,
    pub sorted_mbps: Vec<f64>,
    pub cumulative: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CdfArtifact {
    pub name: String,
    pub series: Vec<CdfSeries>,
}

pub trait Renderer {
    fn scatter(&self, dir: &Path, artifact: &ScatterArtifact) -> anyhow::Result<()>;
    fn cdf(&self, dir: &Path, artifact: &CdfArtifact) -> anyhow::Result<()>;
}

/// Writes `<name>.chart.json` / `<name>_cdf.chart.json` next to the data they
/// describe, for an external image renderer to consume. The `.chart.json`
/// suffix keeps artifacts apart from the raw `*.json` reports sharing the
/// instance directories, so a later archive pass never reads them back as
/// reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

/// Artifact filename suffix; the archive loader skips files carrying it.
pub const CHART_SUFFIX: &str = ".chart.json";

impl Renderer for JsonRenderer {
    fn scatter(&self, dir: &Path, artifact: &ScatterArtifact) -> anyhow::Result<()> {
        let path = dir.join(format!("{}{CHART_SUFFIX}", artifact.name));
        std::fs::write(path, serde_json::to_vec_pretty(artifact)?)?;
        Ok(())
    }

    fn cdf(&self, dir: &Path, artifact: &CdfArtifact) -> anyhow::Result<()> {
        let path = dir.join(format!("{}_cdf{CHART_SUFFIX}", artifact.name));
        std::fs::write(path, serde_json::to_vec_pretty(artifact)?)?;
        Ok(())
    }
}

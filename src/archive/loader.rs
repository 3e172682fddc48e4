// Archive tree loader: root/region/instance/*.json, lexical filename order
// establishes chronology (externally supplied contract, not computed here).

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::models::Run;
use crate::render::CHART_SUFFIX;
use crate::sampler::{ReportError, parse_run};

/// One archived report could not be parsed. Scoped to the single record: the
/// caller logs and skips it, the rest of the instance still loads.
#[derive(Debug, Error)]
#[error("malformed report {path}: {source}")]
pub struct MalformedArchive {
    pub path: PathBuf,
    #[source]
    pub source: ReportError,
}

/// All runs loaded for one `region/instance` directory.
#[derive(Debug)]
pub struct InstanceArchive {
    pub region: String,
    pub instance: String,
    pub runs: Vec<Run>,
    /// Count of malformed reports skipped while loading.
    pub skipped: usize,
}

fn parse_file(path: &Path, delay_secs: f64) -> Result<Run, MalformedArchive> {
    let raw = std::fs::read(path).map_err(|e| MalformedArchive {
        path: path.to_path_buf(),
        source: ReportError::Json(serde_json::Error::io(e)),
    })?;
    parse_run(&raw, delay_secs).map_err(|source| MalformedArchive {
        path: path.to_path_buf(),
        source,
    })
}

/// Raw reports are plain `*.json`; chart artifacts written next to them by a
/// previous analyze pass carry the `.chart.json` suffix and are never reports.
fn is_report_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(".json") && !name.ends_with(CHART_SUFFIX))
}

/// Loads one instance directory's reports in lexical filename order.
/// Malformed records are logged and skipped, never aborting the batch.
pub fn load_instance(dir: &Path, delay_secs: f64) -> anyhow::Result<(Vec<Run>, usize)> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && is_report_file(p))
        .collect();
    files.sort();

    let mut runs = Vec::with_capacity(files.len());
    let mut skipped = 0;
    for path in files {
        match parse_file(&path, delay_secs) {
            Ok(run) => runs.push(run),
            Err(e) => {
                warn!(error = %e, "skipping malformed archived report");
                skipped += 1;
            }
        }
    }
    Ok((runs, skipped))
}

fn subdirs(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Walks `root/<region>/<instance>` and loads every instance's runs.
pub fn load_experiment(root: &Path, delay_secs: f64) -> anyhow::Result<Vec<InstanceArchive>> {
    let mut archives = Vec::new();
    for region_dir in subdirs(root)? {
        for instance_dir in subdirs(&region_dir)? {
            let (runs, skipped) = load_instance(&instance_dir, delay_secs)?;
            archives.push(InstanceArchive {
                region: dir_name(&region_dir),
                instance: dir_name(&instance_dir),
                runs,
                skipped,
            });
        }
    }
    Ok(archives)
}

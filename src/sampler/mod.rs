// Bandwidth sampling via the external iperf3 tool.

mod report;

pub use report::{ReportError, parse_run};

use std::future::Future;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

use crate::models::Run;

/// What to measure: target host, measurement duration, report interval,
/// parallel stream count.
#[derive(Debug, Clone)]
pub struct MeasurementSpec {
    pub target: String,
    pub duration_secs: u64,
    pub interval_secs: u64,
    pub streams: u32,
}

#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("failed to launch sampler: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("sampler exited with {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// One completed measurement: the parsed run plus the tool's raw report bytes
/// (kept verbatim for the archive store).
#[derive(Debug, Clone)]
pub struct SamplerOutput {
    pub run: Run,
    pub raw: Vec<u8>,
}

/// Seam for the external measurement tool, so the live loop can be driven by
/// a scripted sampler in tests.
pub trait Sampler: Send + Sync {
    fn sample(
        &self,
        spec: &MeasurementSpec,
    ) -> impl Future<Output = Result<SamplerOutput, SamplerError>> + Send;
}

/// Invokes `iperf3 -c <target> --time D --interval I --json -P N` and parses
/// its JSON report.
#[derive(Debug, Clone)]
pub struct Iperf3Sampler {
    binary: String,
}

impl Default for Iperf3Sampler {
    fn default() -> Self {
        Self {
            binary: "iperf3".into(),
        }
    }
}

impl Iperf3Sampler {
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Sampler for Iperf3Sampler {
    async fn sample(&self, spec: &MeasurementSpec) -> Result<SamplerOutput, SamplerError> {
        let output = Command::new(&self.binary)
            .arg("-c")
            .arg(&spec.target)
            .arg("--time")
            .arg(spec.duration_secs.to_string())
            .arg("--interval")
            .arg(spec.interval_secs.to_string())
            .arg("--json")
            .arg("-P")
            .arg(spec.streams.to_string())
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(SamplerError::Failed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let run = report::parse_run(&output.stdout, spec.interval_secs as f64)?;
        Ok(SamplerOutput {
            run,
            raw: output.stdout,
        })
    }
}

/// Runs `iperf3 -s`, restarting it whenever it exits. Returns only on spawn
/// failure; cancellation is process termination (ctrl-c in main).
pub async fn run_server(binary: &str) -> anyhow::Result<()> {
    loop {
        info!(%binary, "starting sampler server");
        let status = Command::new(binary)
            .arg("-s")
            .stdin(Stdio::null())
            .status()
            .await?;
        warn!(?status, "sampler server exited; restarting");
    }
}

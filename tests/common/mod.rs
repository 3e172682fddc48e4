// Shared test helpers: scripted sampler, recording notifier/store, run builders.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use bwbench::models::Run;
use bwbench::notify::{Notification, Notifier};
use bwbench::sampler::{MeasurementSpec, Sampler, SamplerError, SamplerOutput};
use bwbench::store::ArchiveStore;
use chrono::{DateTime, Utc};

pub fn ts(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid rfc3339")
        .with_timezone(&Utc)
}

pub fn run_at(start: &str, values: &[f64], interval_secs: f64) -> Run {
    Run::new(ts(start), values.to_vec(), interval_secs)
}

/// iperf3-shaped report JSON for loader/parser tests.
pub fn report_json(timesecs: i64, values: &[f64]) -> String {
    let intervals: Vec<String> = values
        .iter()
        .map(|v| format!(r#"{{"sum":{{"bits_per_second":{v}}}}}"#))
        .collect();
    format!(
        r#"{{"start":{{"timestamp":{{"timesecs":{timesecs}}}}},"intervals":[{}]}}"#,
        intervals.join(",")
    )
}

pub fn spec() -> MeasurementSpec {
    MeasurementSpec {
        target: "192.0.2.1".into(),
        duration_secs: 10,
        interval_secs: 10,
        streams: 1,
    }
}

/// Sampler yielding a scripted sequence of results.
pub struct MockSampler {
    results: Mutex<VecDeque<Result<SamplerOutput, SamplerError>>>,
}

impl MockSampler {
    pub fn new(results: Vec<Result<SamplerOutput, SamplerError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
        }
    }

    pub fn ok(run: Run) -> Result<SamplerOutput, SamplerError> {
        Ok(SamplerOutput {
            raw: b"{}".to_vec(),
            run,
        })
    }

    pub fn fail(stderr: &str) -> Result<SamplerOutput, SamplerError> {
        Err(SamplerError::Failed {
            code: Some(1),
            stderr: stderr.into(),
        })
    }
}

impl Sampler for MockSampler {
    async fn sample(&self, _spec: &MeasurementSpec) -> Result<SamplerOutput, SamplerError> {
        self.results
            .lock()
            .expect("sampler mutex")
            .pop_front()
            .unwrap_or_else(|| MockSampler::fail("mock sampler exhausted"))
    }
}

/// Records every notification it receives.
#[derive(Default)]
pub struct RecordingNotifier {
    pub notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summaries(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("notifier mutex")
            .iter()
            .filter(|n| matches!(n, Notification::Summary(_)))
            .cloned()
            .collect()
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("notifier mutex")
            .iter()
            .filter(|n| matches!(n, Notification::Error { .. }))
            .cloned()
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) {
        self.notifications
            .lock()
            .expect("notifier mutex")
            .push(notification.clone());
    }
}

/// Records uploaded keys.
#[derive(Default)]
pub struct RecordingStore {
    pub keys: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArchiveStore for RecordingStore {
    async fn put(&self, key: &str, _raw: &[u8]) -> anyhow::Result<()> {
        self.keys.lock().expect("store mutex").push(key.to_string());
        Ok(())
    }
}

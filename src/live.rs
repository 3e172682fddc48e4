// Live measurement loop: repeated sampler runs feeding the day window,
// quartile summary emitted on calendar-day rollover.
// State lives in LiveState so tests can drive cycles with injected days.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::buffer::SampleBuffer;
use crate::models::{Sample, Summary};
use crate::notify::{Notification, Notifier};
use crate::rollover::RolloverDetector;
use crate::sampler::{MeasurementSpec, Sampler};
use crate::stats;
use crate::store::{self, ArchiveStore};

/// Sampler/store/notifier seams plus shutdown for the loop.
pub struct LiveDeps<S, A, N> {
    pub sampler: Arc<S>,
    pub store: Arc<A>,
    pub notifier: Arc<N>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Loop timing and measurement config.
pub struct LiveConfig {
    pub spec: MeasurementSpec,
    /// Configured inter-cycle sleep; the loop paces against a fixed cycle of
    /// `duration + sleep` seconds, so cadence drift does not accumulate.
    pub sleep_secs: u64,
    /// Cycle limit for tests; None = run until shutdown.
    pub max_cycles: Option<u64>,
}

/// Buffer plus day bookkeeping for the currently open window.
/// Constructible per instance so tests run independent loops.
#[derive(Debug)]
pub struct LiveState {
    buffer: SampleBuffer,
    rollover: RolloverDetector,
}

impl LiveState {
    /// Start of the loop: "last flush day" is the current day.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            buffer: SampleBuffer::new(),
            rollover: RolloverDetector::starting(today),
        }
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    pub fn open_day(&self) -> Option<NaiveDate> {
        self.rollover.open_day()
    }
}

/// One measurement cycle: sample, spool the raw report, buffer the samples,
/// flush on day rollover. Returns the emitted summary when a flush happened.
///
/// Sampler failure is non-fatal: it is reported through the notifier and the
/// cycle still performs rollover bookkeeping, so a window left over from the
/// previous day flushes even when today's first run failed.
pub async fn run_cycle<S, A, N>(
    state: &mut LiveState,
    sampler: &S,
    store: &A,
    notifier: &N,
    spec: &MeasurementSpec,
    today: NaiveDate,
) -> Option<Summary>
where
    S: Sampler,
    A: ArchiveStore,
    N: Notifier,
{
    match sampler.sample(spec).await {
        Ok(output) => {
            let key = store::report_key(output.run.start());
            if let Err(e) = store.put(&key, &output.raw).await {
                warn!(error = %e, %key, operation = "put_raw_report", "raw report upload failed");
            }
            for sample in output.run.samples() {
                state.buffer.append(*sample);
            }
            debug!(
                samples = output.run.samples().len(),
                buffered = state.buffer.len(),
                "run absorbed"
            );
        }
        Err(e) => {
            warn!(error = %e, operation = "sample", "sampler run failed");
            notifier
                .notify(&Notification::Error {
                    message: e.to_string(),
                })
                .await;
        }
    }

    if state.buffer.is_empty() {
        // Nothing accumulated; the (empty) window trivially reopens today and
        // never triggers a boundary.
        state.rollover.advance(today);
        return None;
    }
    if !state.rollover.crossed(today) {
        return None;
    }

    let samples = state.buffer.drain();
    state.rollover.advance(today);
    let values: Vec<f64> = samples.iter().map(Sample::mbps).collect();
    match stats::summarize(&values) {
        Ok(summary) => {
            info!(day = %today, samples = values.len(), "day rollover, summary emitted");
            notifier.notify(&Notification::Summary(summary)).await;
            Some(summary)
        }
        Err(e) => {
            // Unreachable: guarded by the non-empty check above.
            error!(error = %e, "summarize failed on a non-empty window");
            None
        }
    }
}

/// Spawns the live loop. Returns a join handle; shutdown via the oneshot in
/// deps (the in-flight, not-yet-summarized partial day is accepted loss).
pub fn spawn<S, A, N>(deps: LiveDeps<S, A, N>, config: LiveConfig) -> tokio::task::JoinHandle<()>
where
    S: Sampler + 'static,
    A: ArchiveStore + 'static,
    N: Notifier + 'static,
{
    tokio::spawn(async move {
        run(deps, config).await;
    })
}

async fn run<S, A, N>(deps: LiveDeps<S, A, N>, config: LiveConfig)
where
    S: Sampler,
    A: ArchiveStore,
    N: Notifier,
{
    let LiveDeps {
        sampler,
        store,
        notifier,
        mut shutdown_rx,
    } = deps;

    let mut state = LiveState::new(chrono::Local::now().date_naive());
    let cycle_len = Duration::from_secs(config.spec.duration_secs + config.sleep_secs);
    let mut cycles: u64 = 0;

    info!(
        server = %config.spec.target,
        duration_secs = config.spec.duration_secs,
        interval_secs = config.spec.interval_secs,
        streams = config.spec.streams,
        sleep_secs = config.sleep_secs,
        "live loop started"
    );

    loop {
        let paced_cycle = async {
            let cycle_start = Instant::now();
            // Day observed after the (blocking) measurement completes.
            run_cycle(
                &mut state,
                sampler.as_ref(),
                store.as_ref(),
                notifier.as_ref(),
                &config.spec,
                chrono::Local::now().date_naive(),
            )
            .await;

            if config.sleep_secs > 0 {
                // Sleep only the remainder of the fixed cycle; skip entirely
                // when the measurement overran it.
                if let Some(remaining) = cycle_len.checked_sub(cycle_start.elapsed()) {
                    tokio::time::sleep(remaining).await;
                }
            }
        };

        tokio::select! {
            _ = paced_cycle => {}
            _ = &mut shutdown_rx => {
                debug!("live loop shutting down");
                break;
            }
        }

        cycles += 1;
        if config.max_cycles.is_some_and(|max| cycles >= max) {
            debug!(cycles, "cycle limit reached");
            break;
        }
    }
}

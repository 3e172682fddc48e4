// Replays ordered archived runs and splits the sample stream into contiguous
// day-aligned segments at UTC midnight boundaries.

use chrono::{DateTime, Utc};

use crate::models::{Run, Sample, Segment, Window};
use crate::rollover::RolloverDetector;

/// Lazy iterator of [`Segment`]s over a chronologically ordered run slice.
///
/// Each sample's absolute timestamp is reconstructed as `run.start + offset`;
/// a date change against the open window closes it and opens a new window at
/// the crossing sample. Concatenating all emitted segments' samples reproduces
/// the input sample sequence exactly (pure partition, never lossy).
/// Restartable: construct again over the same immutable slice.
pub struct ArchiveSegmenter<'a> {
    runs: &'a [Run],
    run_idx: usize,
    sample_idx: usize,
    window: Option<Window>,
    rollover: RolloverDetector,
}

impl<'a> ArchiveSegmenter<'a> {
    pub fn new(runs: &'a [Run]) -> Self {
        Self {
            runs,
            run_idx: 0,
            sample_idx: 0,
            window: None,
            rollover: RolloverDetector::new(),
        }
    }

    fn next_sample(&mut self) -> Option<(DateTime<Utc>, Sample)> {
        while let Some(run) = self.runs.get(self.run_idx) {
            if let Some(sample) = run.samples().get(self.sample_idx) {
                self.sample_idx += 1;
                return Some((run.timestamp_of(sample), *sample));
            }
            self.run_idx += 1;
            self.sample_idx = 0;
        }
        None
    }

    fn open_at(&mut self, ts: DateTime<Utc>, sample: Sample) -> Option<Window> {
        self.rollover.advance(ts.date_naive());
        let mut window = Window::open(ts);
        window.push(sample);
        self.window.replace(window)
    }
}

impl Iterator for ArchiveSegmenter<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        loop {
            let Some((ts, sample)) = self.next_sample() else {
                // Input exhausted: close the final window if it holds samples.
                return self.window.take().map(Window::close);
            };

            if self.rollover.crossed(ts.date_naive()) {
                let closed = self.open_at(ts, sample);
                if let Some(closed) = closed {
                    return Some(closed.close());
                }
            } else if let Some(window) = self.window.as_mut() {
                window.push(sample);
            } else {
                self.open_at(ts, sample);
            }
        }
    }
}

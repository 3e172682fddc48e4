// In-memory accumulation for the currently open day window (live path).

use crate::models::Sample;

/// Ordered sample accumulation. Contents change only via `append`/`drain`;
/// there is no eviction.
#[derive(Debug, Default)]
pub struct SampleBuffer {
    samples: Vec<Sample>,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the tail, O(1) amortized.
    pub fn append(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Returns all buffered samples in insertion order and empties the buffer.
    pub fn drain(&mut self) -> Vec<Sample> {
        std::mem::take(&mut self.samples)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

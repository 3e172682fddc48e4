// Domain models (ported from the original Python daemon + plotter)

mod key;
mod sample;
mod summary;
mod window;

pub use key::{AggregationKey, Cadence};
pub use sample::{BITS_PER_MBIT, Run, Sample};
pub use summary::Summary;
pub use window::{Segment, Window};

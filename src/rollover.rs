// Calendar-day boundary detection for the open window.

use chrono::NaiveDate;

/// Tracks the calendar day owned by the currently open window and answers
/// whether a newly observed day falls past a boundary.
///
/// Comparison is by calendar date, not elapsed duration, so a window opened
/// mid-day closes at the next midnight. A window that never opened (no samples
/// yet) cannot cross a boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RolloverDetector {
    open_day: Option<NaiveDate>,
}

impl RolloverDetector {
    /// Detector with no open window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector whose window is already owned by `day` (live loop start:
    /// "last flush day" is the current day).
    pub fn starting(day: NaiveDate) -> Self {
        Self {
            open_day: Some(day),
        }
    }

    /// True when `day` differs from the open window's calendar day.
    pub fn crossed(&self, day: NaiveDate) -> bool {
        self.open_day.is_some_and(|open| open != day)
    }

    /// Adopts `day` as the open window's day (window opened or just flushed).
    pub fn advance(&mut self, day: NaiveDate) {
        self.open_day = Some(day);
    }

    pub fn open_day(&self) -> Option<NaiveDate> {
        self.open_day
    }
}

// RolloverDetector: calendar-date comparison, empty-window edge case

use bwbench::rollover::RolloverDetector;
use chrono::NaiveDate;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn unopened_window_never_signals() {
    let detector = RolloverDetector::new();
    assert!(!detector.crossed(day(2024, 1, 1)));
    assert!(!detector.crossed(day(2024, 1, 2)));
    assert_eq!(detector.open_day(), None);
}

#[test]
fn same_day_does_not_cross() {
    let detector = RolloverDetector::starting(day(2024, 1, 1));
    assert!(!detector.crossed(day(2024, 1, 1)));
}

#[test]
fn next_day_crosses() {
    let detector = RolloverDetector::starting(day(2024, 1, 1));
    assert!(detector.crossed(day(2024, 1, 2)));
}

#[test]
fn comparison_is_by_date_not_elapsed_time() {
    // A window opened at 23:59 crosses one minute later; month and year
    // boundaries are just date changes too.
    let detector = RolloverDetector::starting(day(2024, 1, 31));
    assert!(detector.crossed(day(2024, 2, 1)));
    let detector = RolloverDetector::starting(day(2024, 12, 31));
    assert!(detector.crossed(day(2025, 1, 1)));
}

#[test]
fn advance_adopts_the_new_day() {
    let mut detector = RolloverDetector::starting(day(2024, 1, 1));
    detector.advance(day(2024, 1, 2));
    assert!(!detector.crossed(day(2024, 1, 2)));
    assert!(detector.crossed(day(2024, 1, 3)));
    assert_eq!(detector.open_day(), Some(day(2024, 1, 2)));
}

// Notification payload shapes and subject tagging

use bwbench::models::Summary;
use bwbench::notify::{Notification, SUBJECT, subject_for_region};

#[test]
fn subject_is_tagged_with_region_when_present() {
    assert_eq!(subject_for_region(None), SUBJECT);
    assert_eq!(subject_for_region(Some("")), SUBJECT);
    assert_eq!(
        subject_for_region(Some("eu-west-1a")),
        format!("[eu-west-1a] {SUBJECT}")
    );
}

#[test]
fn summary_payload_uses_report_field_names() {
    let summary = Summary {
        mean: 25.0,
        max: 40.0,
        q3: 32.5,
        median: 25.0,
        q1: 17.5,
        min: 10.0,
    };
    let json = serde_json::to_value(Notification::Summary(summary)).unwrap();
    assert_eq!(json["Mean"], 25.0);
    assert_eq!(json["Max"], 40.0);
    assert_eq!(json["Q3"], 32.5);
    assert_eq!(json["Median"], 25.0);
    assert_eq!(json["Q1"], 17.5);
    assert_eq!(json["Min"], 10.0);
}

#[test]
fn error_payload_is_a_single_error_field() {
    let json = serde_json::to_value(Notification::Error {
        message: "sampler exited with Some(1): connection refused".into(),
    })
    .unwrap();
    assert_eq!(
        json,
        serde_json::json!({"Error": "sampler exited with Some(1): connection refused"})
    );
}

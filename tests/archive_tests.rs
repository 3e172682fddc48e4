// Archive loading and the offline analyze pass over a real directory tree

mod common;

use bwbench::archive::{analyze, load_instance};
use bwbench::models::AggregationKey;
use bwbench::render::JsonRenderer;
use common::report_json;

// 2024-01-01T00:00:00Z
const JAN1: i64 = 1_704_067_200;

#[test]
fn loads_reports_in_lexical_filename_order() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("2024-01-01 10.json"),
        report_json(JAN1 + 36_000, &[1.0]),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("2024-01-01 08.json"),
        report_json(JAN1 + 28_800, &[2.0]),
    )
    .unwrap();

    let (runs, skipped) = load_instance(dir.path(), 10.0).unwrap();
    assert_eq!(skipped, 0);
    assert_eq!(runs.len(), 2);
    // Lexical filename order, which here is also chronological.
    assert!(runs[0].start() < runs[1].start());
    assert_eq!(runs[0].samples()[0].bits_per_second, 2.0);
}

#[test]
fn malformed_report_is_skipped_not_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.json"), report_json(JAN1, &[1.0])).unwrap();
    std::fs::write(dir.path().join("b.json"), "not json at all").unwrap();
    std::fs::write(dir.path().join("c.json"), report_json(JAN1 + 60, &[2.0])).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let (runs, skipped) = load_instance(dir.path(), 10.0).unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(skipped, 1);
}

#[test]
fn analyze_writes_day_instance_and_overall_artifacts() {
    let root = tempfile::TempDir::new().unwrap();
    let instance_dir = root.path().join("full_speed").join("eu-west-1").join("i-abc");
    std::fs::create_dir_all(&instance_dir).unwrap();
    // Run crossing midnight: samples at 23:59:50, 00:00:00, 00:00:10.
    std::fs::write(
        instance_dir.join("2024-01-01 235950.json"),
        report_json(JAN1 + 86_390, &[100.0, 200.0, 300.0]),
    )
    .unwrap();

    let aggregator = analyze(root.path(), &JsonRenderer).unwrap();

    let key = AggregationKey::new("i-abc", "full_speed", "eu-west-1");
    let series = aggregator.get(&key).expect("overall series stored");
    assert_eq!(series.len(), 3);

    for name in [
        "2024-01-01.chart.json",
        "2024-01-01_cdf.chart.json",
        "2024-01-02.chart.json",
        "2024-01-02_cdf.chart.json",
        "i-abc.chart.json",
        "i-abc_cdf.chart.json",
    ] {
        assert!(instance_dir.join(name).exists(), "missing {name}");
    }
    assert!(root.path().join("i-abc.chart.json").exists());
    assert!(root.path().join("i-abc_cdf.chart.json").exists());
}

#[test]
fn rerun_does_not_read_chart_artifacts_as_reports() {
    let root = tempfile::TempDir::new().unwrap();
    let instance_dir = root.path().join("full_speed").join("eu-west-1").join("i-abc");
    std::fs::create_dir_all(&instance_dir).unwrap();
    std::fs::write(
        instance_dir.join("2024-01-01 120000.json"),
        report_json(JAN1 + 43_200, &[100.0, 200.0]),
    )
    .unwrap();

    analyze(root.path(), &JsonRenderer).unwrap();

    // The first pass left chart artifacts next to the report; a reload must
    // still see exactly one report and skip nothing.
    let (runs, skipped) = load_instance(&instance_dir, 10.0).unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(skipped, 0);

    let aggregator = analyze(root.path(), &JsonRenderer).unwrap();
    let key = AggregationKey::new("i-abc", "full_speed", "eu-west-1");
    assert_eq!(aggregator.get(&key).unwrap().len(), 2);
}

#[test]
fn empty_instance_produces_no_overall_artifacts() {
    let root = tempfile::TempDir::new().unwrap();
    let instance_dir = root.path().join("full_speed").join("r1").join("i-empty");
    std::fs::create_dir_all(&instance_dir).unwrap();
    std::fs::write(instance_dir.join("a.json"), "broken").unwrap();

    let aggregator = analyze(root.path(), &JsonRenderer).unwrap();

    let key = AggregationKey::new("i-empty", "full_speed", "r1");
    assert_eq!(aggregator.get(&key).unwrap().len(), 0);
    assert!(!root.path().join("i-empty.chart.json").exists());
    assert!(!root.path().join("i-empty_cdf.chart.json").exists());
}

#[test]
fn analyze_survives_a_malformed_file_in_one_instance() {
    let root = tempfile::TempDir::new().unwrap();
    let instance_dir = root.path().join("10sec_60sec").join("r1").join("i-1");
    std::fs::create_dir_all(&instance_dir).unwrap();
    std::fs::write(instance_dir.join("a.json"), "broken").unwrap();
    std::fs::write(instance_dir.join("b.json"), report_json(JAN1, &[5.0])).unwrap();

    let aggregator = analyze(root.path(), &JsonRenderer).unwrap();
    let key = AggregationKey::new("i-1", "10sec_60sec", "r1");
    assert_eq!(aggregator.get(&key).unwrap().len(), 1);
}

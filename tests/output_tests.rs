use pretty_assertions::assert_eq;
use std::path::Path;
use trstats::aggregator::aggregate_sources;
use trstats::output::{build_report, read_report, validate_path, write_report, write_svg};
use trstats::parser::TranscriptSource;
use trstats::plot::generate_boxplot;
use tempfile::NamedTempFile;

fn sample_sources() -> Vec<TranscriptSource> {
    vec![
        TranscriptSource::memory("run1", "hdr\n1 gw (1.1.1.1) 1.0 ms 1.2 ms\n2 isp (2.2.2.2) 9.0 ms\n"),
        TranscriptSource::memory("run2", "hdr\n1 gw (1.1.1.1) 1.1 ms\n2 * * *\n3 dst (3.3.3.3) 20.0 ms\n"),
    ]
}

#[test]
fn test_report_roundtrip_from_pipeline() {
    let aggregation = aggregate_sources(&sample_sources()).unwrap();
    let report = build_report(aggregation.runs, aggregation.records.clone());

    let temp_file = NamedTempFile::new().unwrap();
    write_report(&report, temp_file.path()).unwrap();
    let loaded = read_report(temp_file.path()).unwrap();

    assert_eq!(loaded.runs, 2);
    assert_eq!(loaded.hops, aggregation.records);
}

#[test]
fn test_report_json_shape() {
    let aggregation = aggregate_sources(&sample_sources()).unwrap();
    let report = build_report(aggregation.runs, aggregation.records);

    let temp_file = NamedTempFile::new().unwrap();
    write_report(&report, temp_file.path()).unwrap();

    let raw = std::fs::read_to_string(temp_file.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value["hops"][0];

    assert_eq!(first["hop"], serde_json::json!(1));
    assert_eq!(first["host"], serde_json::json!([["gw", "1.1.1.1"]]));
    assert_eq!(first["count"], serde_json::json!(3));
    assert_eq!(first["avg"], serde_json::json!(1.1));
    assert_eq!(first["med"], serde_json::json!(1.1));
}

#[test]
fn test_plot_from_pipeline() {
    let aggregation = aggregate_sources(&sample_sources()).unwrap();
    let svg = generate_boxplot(&aggregation.series, None).unwrap();

    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("plots/output.svg");
    write_svg(&svg, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    for hop in 1..=3 {
        assert!(written.contains(&format!(">Hop {}<", hop)));
    }
}

#[test]
fn test_validate_output_path_empty() {
    assert!(validate_path(Path::new("")).is_err());
}

#[test]
fn test_validate_output_path_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    assert!(validate_path(temp_dir.path()).is_err());
}

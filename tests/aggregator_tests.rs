use pretty_assertions::assert_eq;
use std::path::PathBuf;
use trstats::aggregator::{aggregate_runs, aggregate_sources, merge_runs, reduce_hop};
use trstats::parser::{parse_transcript, HostCandidate, TranscriptSource};
use trstats::utils::TranscriptError;

const TRANSCRIPT: &str = "\
traceroute to example.com (93.184.216.34), 30 hops max, 60 byte packets
 1  _gateway (192.168.1.1)  0.512 ms  0.488 ms  0.470 ms
 2  isp-a (10.0.0.1)  8.100 ms isp-b (10.0.0.2)  9.200 ms  8.900 ms
 3  * * *
 4  edge (203.0.113.9)  12.345 ms  *  13.002 ms
";

#[test]
fn test_scenario_a_single_run() {
    let sources = [TranscriptSource::memory(
        "run1",
        "traceroute to x\n3  host-a (10.0.0.1)  12.345 ms  13.210 ms  * \n",
    )];

    let aggregation = aggregate_sources(&sources).unwrap();
    assert_eq!(aggregation.records.len(), 1);

    let record = &aggregation.records[0];
    assert_eq!(record.hop, 3);
    assert_eq!(record.host, vec![HostCandidate::new("host-a", "10.0.0.1")]);
    assert_eq!(record.count, 2);
    assert_eq!(record.min, 12.345);
    assert_eq!(record.max, 13.21);
    assert_eq!(record.avg, 12.778);
    assert_eq!(record.med, 12.778);
    assert_eq!(aggregation.series[0].samples, vec![12.345, 13.210]);
}

#[test]
fn test_scenario_b_two_runs() {
    let sources = [
        TranscriptSource::memory("run1", "header\n5 gw (2.2.2.2) 20.0 ms\n"),
        TranscriptSource::memory("run2", "header\n5 gw (2.2.2.2) 22.0 ms\n"),
    ];

    let aggregation = aggregate_sources(&sources).unwrap();
    let record = &aggregation.records[0];

    assert_eq!(record.hop, 5);
    assert_eq!(record.host, vec![HostCandidate::new("gw", "2.2.2.2")]);
    assert_eq!(aggregation.series[0].samples, vec![20.0, 22.0]);
    assert_eq!(record.med, 21.0);
}

#[test]
fn test_scenario_c_timeout_only_hop_dropped() {
    let sources = [
        TranscriptSource::memory("run1", "header\n6 gw (6.6.6.6) 1.0 ms\n7 * * *\n"),
        TranscriptSource::memory("run2", "header\n7 * * *\n"),
    ];

    let aggregation = aggregate_sources(&sources).unwrap();
    let hops: Vec<u32> = aggregation.records.iter().map(|r| r.hop).collect();

    assert_eq!(hops, vec![6]);
    assert!(aggregation.series.iter().all(|s| s.hop != 7));
}

#[test]
fn test_scenario_d_unreadable_source_fails_batch() {
    let sources = [
        TranscriptSource::memory("run1", TRANSCRIPT),
        TranscriptSource::File(PathBuf::from("/definitely/not/here/result-run2.out")),
        TranscriptSource::memory("run3", TRANSCRIPT),
    ];

    let err = aggregate_sources(&sources).unwrap_err();
    assert!(matches!(err, TranscriptError::SourceUnavailable { .. }));
}

#[test]
fn test_empty_transcript_fails_batch() {
    let sources = [
        TranscriptSource::memory("run1", TRANSCRIPT),
        TranscriptSource::memory("run2", "traceroute to x\n"),
    ];

    let err = aggregate_sources(&sources).unwrap_err();
    assert!(matches!(err, TranscriptError::EmptyTranscript(_)));
}

#[test]
fn test_all_timeouts_is_empty_not_error() {
    let sources = [TranscriptSource::memory("run1", "header\n1 * * *\n2 * * *\n")];

    let aggregation = aggregate_sources(&sources).unwrap();
    assert!(aggregation.is_empty());
    assert!(aggregation.series.is_empty());
    assert_eq!(aggregation.runs, 1);
}

#[test]
fn test_same_transcript_twice_doubles_samples() {
    let run = parse_transcript("run", TRANSCRIPT).unwrap();

    let once = aggregate_runs(&[run.clone()]);
    let twice = aggregate_runs(&[run.clone(), run]);

    assert_eq!(once.records.len(), twice.records.len());
    for (a, b) in once.records.iter().zip(&twice.records) {
        assert_eq!(b.hop, a.hop);
        assert_eq!(b.count, a.count * 2);
        assert_eq!(b.host, a.host);
        assert_eq!(b.min, a.min);
        assert_eq!(b.max, a.max);
    }
}

#[test]
fn test_records_sorted_and_bounded() {
    let r1 = parse_transcript("r1", "h\n9 z (9.9.9.9) 90.0 ms\n2 b (2.2.2.2) 2.0 ms 2.5 ms\n").unwrap();
    let r2 = parse_transcript("r2", "h\n4 d (4.4.4.4) 4.0 ms 40.0 ms 4.4 ms\n2 b (2.2.2.2) 2.2 ms\n").unwrap();

    let aggregation = aggregate_runs(&[r1, r2]);
    let hops: Vec<u32> = aggregation.records.iter().map(|r| r.hop).collect();
    assert_eq!(hops, vec![2, 4, 9]);

    for r in &aggregation.records {
        assert!(r.min <= r.med && r.med <= r.max, "hop {}", r.hop);
        assert!(r.min <= r.avg && r.avg <= r.max, "hop {}", r.hop);
    }
}

#[test]
fn test_count_matches_sample_list() {
    let r1 = parse_transcript("r1", TRANSCRIPT).unwrap();
    let r2 = parse_transcript("r2", TRANSCRIPT).unwrap();
    let accumulator = merge_runs([&r1, &r2]);

    for (hop, acc) in accumulator.hops() {
        match reduce_hop(hop, acc) {
            Some(record) => assert_eq!(record.count, acc.samples.len()),
            None => assert!(acc.samples.is_empty()),
        }
    }
}

#[test]
fn test_host_order_follows_run_order() {
    let r1 = parse_transcript("r1", "h\n2 b (2.2.2.2) 1.0 ms\n").unwrap();
    let r2 = parse_transcript("r2", "h\n2 a (1.1.1.1) 1.0 ms b (2.2.2.2) 1.0 ms\n").unwrap();

    let forward = aggregate_runs(&[r1.clone(), r2.clone()]);
    let backward = aggregate_runs(&[r2, r1]);

    assert_eq!(
        forward.records[0].host,
        vec![HostCandidate::new("b", "2.2.2.2"), HostCandidate::new("a", "1.1.1.1")]
    );
    assert_eq!(
        backward.records[0].host,
        vec![HostCandidate::new("a", "1.1.1.1"), HostCandidate::new("b", "2.2.2.2")]
    );
}

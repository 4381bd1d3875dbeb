//! End-to-end scans of a saved bulk file
//!
//! `fixtures/demo_bcs_bulk.jsonl` mirrors the shape of a demo tenant export:
//! 996 lines across all seven record kinds.

use bcs_client::bulk::{parse_bulk_file, scan_bulk, ScanOptions};
use bcs_client::{BcsError, RecordKind};
use chrono::{NaiveDate, NaiveDateTime};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("demo_bcs_bulk.jsonl")
}

#[tokio::test]
async fn test_demo_file_counts() {
    let results = parse_bulk_file(fixture_path(), ScanOptions::default())
        .await
        .expect("demo file should scan");

    assert_eq!(results.line_count, 996);
    assert_eq!(results.count(RecordKind::Device), 300);
    assert_eq!(results.count(RecordKind::TrackSummary), 20);
    assert_eq!(results.count(RecordKind::TrackSmupieRecommendation), 2);
    assert_eq!(results.count(RecordKind::SwEoxBulletin), 34);
    assert_eq!(results.count(RecordKind::HwEoxBulletin), 184);
    assert_eq!(results.count(RecordKind::FieldNoticeBulletin), 103);
    assert_eq!(results.count(RecordKind::PsirtBulletin), 353);

    assert!(results.unrecognised_types.is_empty());
    assert!(results.decode_errors.is_empty());
}

#[tokio::test]
async fn test_demo_file_buckets_match_counts() {
    let results = parse_bulk_file(fixture_path(), ScanOptions::default())
        .await
        .expect("demo file should scan");

    for kind in RecordKind::ALL {
        assert_eq!(results.bucket_len(kind), results.count(kind), "{kind}");
    }
    assert_eq!(
        results.line_count,
        results.recognised_total() + results.unrecognised_total()
    );
}

#[tokio::test]
async fn test_demo_file_preserves_input_order() {
    let results = parse_bulk_file(fixture_path(), ScanOptions::default())
        .await
        .expect("demo file should scan");

    let ids: Vec<i64> = results
        .devices
        .iter()
        .map(|d| d.device_id.expect("every device has an id"))
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert_eq!(ids.first(), Some(&27_000_000));
    assert_eq!(ids.last(), Some(&27_000_299));
}

#[tokio::test]
async fn test_demo_file_dates_decode() {
    let results = parse_bulk_file(fixture_path(), ScanOptions::default())
        .await
        .expect("demo file should scan");

    let device = &results.devices[0];
    let expected = NaiveDateTime::parse_from_str("2023-05-08T07:08:47", "%Y-%m-%dT%H:%M:%S")
        .expect("valid date-time");
    assert_eq!(device.config_time.map(|t| t.naive()), Some(expected));
    // Omitted on export, so absent rather than zero.
    assert!(device.last_reset.is_none());

    let track = &results.track_summaries[0];
    assert_eq!(
        track.track_last_modified_date.map(|d| d.naive()),
        NaiveDate::from_ymd_opt(2021, 1, 1)
    );
    assert_eq!(
        track.track_recommendation_date.map(|d| d.naive()),
        NaiveDate::from_ymd_opt(2020, 1, 15)
    );
}

#[tokio::test]
async fn test_results_re_encode_with_vendor_formats() {
    let results = parse_bulk_file(fixture_path(), ScanOptions::default())
        .await
        .expect("demo file should scan");

    let device = serde_json::to_string(&results.devices[0]).expect("serialize device");
    assert!(device.contains(r#""configTime":"2023-05-08T07:08:47""#));
    assert!(!device.contains("lastReset"));

    let track = serde_json::to_string(&results.track_summaries[0]).expect("serialize track");
    assert!(track.contains(r#""trackLastModifiedDate":"2021-01-01""#));

    let all = serde_json::to_value(&results).expect("serialize results");
    assert_eq!(all["line_count"], 996);
    assert_eq!(all["count_of_types"]["psirt_bulletin"], 353);
}

#[tokio::test]
async fn test_mixed_file_with_unknown_kinds_and_bad_dates() {
    let mut file = NamedTempFile::new().expect("create temp file");
    writeln!(file, r#"{{"type":"device","deviceId":1,"configTime":"2021-06-01T10:00:00"}}"#).unwrap();
    writeln!(file, r#"{{"type":"contract","contractNumber":"123"}}"#).unwrap();
    writeln!(file, r#"{{"type":"device","deviceId":2,"configTime":"2021/06/01 10:00"}}"#).unwrap();
    writeln!(file, r#"{{"type":"contract"}}"#).unwrap();
    write!(file, r#"{{"type":"fn_bulletin","fieldNoticeId":"FN70001"}}"#).unwrap();

    let results = parse_bulk_file(file.path(), ScanOptions::default())
        .await
        .expect("file should scan");

    assert_eq!(results.line_count, 5);
    assert_eq!(results.count(RecordKind::Device), 2);
    assert_eq!(results.count(RecordKind::FieldNoticeBulletin), 1);
    assert_eq!(results.unrecognised_types.get("contract"), Some(&2));

    assert_eq!(results.devices[1].device_id, Some(2));
    assert!(results.devices[1].config_time.is_none());
    assert_eq!(results.decode_errors.len(), 1);
    assert_eq!(results.decode_errors[0].line, 3);
    assert_eq!(results.decode_errors[0].fields(), ["configTime"]);
}

#[tokio::test]
async fn test_truncated_stream_fails_whole_scan() {
    let input = b"{\"type\":\"device\",\"deviceId\":1}\n{\"type\":\"device\",\"devi";
    let err = scan_bulk(&input[..], ScanOptions::default())
        .await
        .expect_err("truncated line must fail");

    match err {
        BcsError::MalformedLine { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }
}

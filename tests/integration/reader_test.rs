//! NDJSON reader tests against files on disk.

use integration_tests::{review_lines, TestData};
use rf_error::{ErrorKind, ReaderError, RfError};
use rf_reader_ndjson::NdjsonReader;
use rf_types::RecordReader;

#[test]
fn test_read_plain_and_gzip() {
    let data = TestData::new();
    let plain = data.write("r.jsonl", &review_lines());
    let gzip = data.write_gzip("r.jsonl.gz", &review_lines());

    let reader = NdjsonReader::local_only();
    let from_plain = reader.read_records(&plain).unwrap();
    let from_gzip = reader.read_records(&gzip).unwrap();

    assert_eq!(from_plain.len(), 4);
    assert_eq!(from_plain, from_gzip);
    assert_eq!(from_plain[0]["parent_asin"], "B00YQ6X8EO");
}

#[test]
fn test_file_metadata() {
    let data = TestData::new();
    let path = data.write("r.jsonl", &format!("{}\n\n", review_lines()));

    let metadata = NdjsonReader::local_only().file_metadata(&path).unwrap();
    assert_eq!(metadata.record_count, 4);
    assert!(metadata.size_bytes > 0);
}

#[test]
fn test_parse_error_reports_line() {
    let data = TestData::new();
    let path = data.write(
        "r.jsonl",
        "{\"rating\": 5.0}\n\n{\"rating\": oops}\n{\"rating\": 1.0}\n",
    );

    let error = NdjsonReader::local_only().read_records(&path).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Parse);
    match error {
        RfError::Reader(ReaderError::Parse { line, .. }) => assert_eq!(line, 3),
        e => panic!("Expected Parse error, got: {:?}", e),
    }
}

#[test]
fn test_file_url_prefix() {
    let data = TestData::new();
    let path = data.write("r.jsonl", &review_lines());

    let records = NdjsonReader::local_only()
        .read_records(&format!("file://{}", path))
        .unwrap();
    assert_eq!(records.len(), 4);
}

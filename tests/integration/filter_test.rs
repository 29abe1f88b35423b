//! Filter-and-join tests over review and metadata files on disk.

use arrow::array::{Array, BooleanArray, Float64Array, Int64Array, StringArray};
use integration_tests::{date_at, meta_lines, review_lines, TestData};
use rf_error::{ErrorKind, JoinError, JoinSide, ReaderError, RfError};
use rf_filter::process_reviews_local;
use rf_types::{FilterRequest, MetaField, ReviewField, FILTER_MESSAGE, MERGE_MESSAGE};

fn beauty_fields() -> Vec<ReviewField> {
    ReviewField::parse_list(&["helpful_vote", "timestamp", "rating", "images", "text"]).unwrap()
}

#[test]
fn test_filter_and_merge_default_metadata() {
    let data = TestData::new();
    let reviews = data.write("All_Beauty.jsonl", &review_lines());
    let meta = data.write("meta_All_Beauty.jsonl", &meta_lines());

    let request = FilterRequest::new(reviews, beauty_fields()).with_metadata(meta);
    let table = process_reviews_local(&request).unwrap();

    assert_eq!(table.status_message(), MERGE_MESSAGE);
    assert_eq!(table.num_rows(), 4);
    assert_eq!(
        table.column_names(),
        vec![
            "helpful_vote",
            "timestamp",
            "rating",
            "images",
            "text",
            "main_category",
            "title",
            "store",
            "average_rating",
            "rating_number"
        ]
    );

    let batch = table.record_batch();

    let votes = batch
        .column_by_name("helpful_vote")
        .unwrap()
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(votes.values().to_vec(), vec![0, 1, 2, 0]);

    assert_eq!(date_at(batch, "timestamp", 0), Some((5, 5, 2020)));
    assert_eq!(date_at(batch, "timestamp", 1), Some((5, 4, 2020)));
    assert_eq!(date_at(batch, "timestamp", 2), Some((5, 16, 2020)));
    assert_eq!(date_at(batch, "timestamp", 3), Some((1, 1, 2010)));

    let images = batch
        .column_by_name("images")
        .unwrap()
        .as_any()
        .downcast_ref::<BooleanArray>()
        .unwrap();
    let flags: Vec<bool> = (0..images.len()).map(|i| images.value(i)).collect();
    assert_eq!(flags, vec![false, false, true, false]);

    // first review has no metadata record
    let store = batch
        .column_by_name("store")
        .unwrap()
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert!(store.is_null(0));
    assert_eq!(store.value(1), "Howard Products");
    assert_eq!(store.value(2), "Yes To");
    assert_eq!(store.value(3), "Yes To");

    let average = batch
        .column_by_name("average_rating")
        .unwrap()
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert!(average.is_null(0));
    assert_eq!(average.value(1), 4.8);
}

#[test]
fn test_filter_only() {
    let data = TestData::new();
    let reviews = data.write("All_Beauty.jsonl", &review_lines());

    let request = FilterRequest::new(reviews, vec![ReviewField::UserId, ReviewField::Rating]);
    let table = process_reviews_local(&request).unwrap();

    assert_eq!(table.status_message(), FILTER_MESSAGE);
    assert!(!table.joined());
    assert_eq!(table.column_names(), vec!["user_id", "rating"]);
    assert_eq!(table.num_rows(), 4);
}

#[test]
fn test_gzip_inputs_match_plain() {
    let data = TestData::new();
    let plain = FilterRequest::new(data.write("r.jsonl", &review_lines()), beauty_fields())
        .with_metadata(data.write("m.jsonl", &meta_lines()))
        .with_meta_fields(vec![MetaField::Store]);
    let gzip = FilterRequest::new(data.write_gzip("r.jsonl.gz", &review_lines()), beauty_fields())
        .with_metadata(data.write_gzip("m.jsonl.gz", &meta_lines()))
        .with_meta_fields(vec![MetaField::Store]);

    let plain = process_reviews_local(&plain).unwrap();
    let gzip = process_reviews_local(&gzip).unwrap();

    assert_eq!(plain.record_batch(), gzip.record_batch());
}

#[test]
fn test_backslash_paths() {
    let data = TestData::new();
    let reviews = data.write("All_Beauty.jsonl", &review_lines()).replace('/', "\\");

    let request = FilterRequest::new(reviews, vec![ReviewField::Rating]);
    let table = process_reviews_local(&request).unwrap();
    assert_eq!(table.num_rows(), 4);
}

#[test]
fn test_title_collision_is_suffixed() {
    let data = TestData::new();
    let request = FilterRequest::new(
        data.write("r.jsonl", &review_lines()),
        vec![ReviewField::Title, ReviewField::ParentAsin],
    )
    .with_metadata(data.write("m.jsonl", &meta_lines()))
    .with_meta_fields(vec![MetaField::Title]);

    let table = process_reviews_local(&request).unwrap();
    assert_eq!(table.column_names(), vec!["title_x", "title_y"]);
}

#[test]
fn test_duplicate_metadata_keys_fan_out() {
    let data = TestData::new();
    let meta = format!(
        "{}\n{}",
        meta_lines(),
        r#"{"main_category": "All Beauty", "title": "Howard Conditioner, 16-Ounce", "average_rating": 4.7, "rating_number": 4, "store": "Howard Products", "parent_asin": "B081TJ8YS3"}"#
    );
    let request = FilterRequest::new(data.write("r.jsonl", &review_lines()), vec![ReviewField::Rating])
        .with_metadata(data.write("m.jsonl", &meta))
        .with_meta_fields(vec![MetaField::Title]);

    let table = process_reviews_local(&request).unwrap();
    assert_eq!(table.num_rows(), 5);

    let title = table
        .record_batch()
        .column_by_name("title")
        .unwrap()
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap()
        .clone();
    assert_eq!(title.value(1), "Howard LC0008 Leather Conditioner, 8-Ounce");
    assert_eq!(title.value(2), "Howard Conditioner, 16-Ounce");
}

#[test]
fn test_metadata_without_key() {
    let data = TestData::new();
    let request = FilterRequest::new(data.write("r.jsonl", &review_lines()), vec![ReviewField::Rating])
        .with_metadata(data.write("m.jsonl", r#"{"title": "Orphan", "store": "Nobody"}"#))
        .with_meta_fields(vec![MetaField::Title]);

    let error = process_reviews_local(&request).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::JoinKey);
    assert!(matches!(
        error,
        RfError::Join(JoinError::MissingKey {
            side: JoinSide::Metadata,
            ..
        })
    ));
}

#[test]
fn test_missing_review_file() {
    let data = TestData::new();
    let request = FilterRequest::new(data.path("absent.jsonl"), vec![ReviewField::Rating]);

    let error = process_reviews_local(&request).unwrap_err();
    assert!(matches!(error, RfError::Reader(ReaderError::NotFound(_))));
    assert_eq!(error.kind().exit_code(), 2);
}

#[test]
fn test_join_disabled_never_reads_metadata() {
    let data = TestData::new();
    let request = FilterRequest::new(data.write("r.jsonl", &review_lines()), vec![ReviewField::Rating])
        .with_metadata(data.path("absent.jsonl"))
        .with_join(false);

    let table = process_reviews_local(&request).unwrap();
    assert_eq!(table.status_message(), FILTER_MESSAGE);
}

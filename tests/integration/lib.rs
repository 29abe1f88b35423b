//! Test fixtures for reviewflow integration tests.
//!
//! Writes review and metadata files shaped like the public Amazon review
//! dumps into a temporary directory.

use arrow::array::{Array, Int32Array, StructArray};
use arrow::record_batch::RecordBatch;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use tempfile::TempDir;

/// Temporary directory holding test input files.
///
/// Files are removed when the value is dropped.
pub struct TestData {
    dir: TempDir,
}

impl TestData {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Absolute path of `name` inside the directory.
    pub fn path(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }

    /// Write a plain file and return its path.
    pub fn write(&self, name: &str, contents: &str) -> String {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write a gzip-compressed file and return its path.
    pub fn write_gzip(&self, name: &str, contents: &str) -> String {
        let path = self.path(name);
        let file = std::fs::File::create(&path).expect("Failed to create test file");
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(contents.as_bytes())
            .expect("Failed to write gzip data");
        encoder.finish().expect("Failed to finish gzip stream");
        path
    }
}

impl Default for TestData {
    fn default() -> Self {
        Self::new()
    }
}

/// Four reviews of three products. B00YQ6X8EO has no metadata record.
pub fn review_lines() -> String {
    [
        r#"{"rating": 5.0, "title": "Such a lovely scent but not overpowering.", "text": "This spray is really nice.", "images": [], "asin": "B00YQ6X8EO", "parent_asin": "B00YQ6X8EO", "user_id": "AGKHLEW2SOWHNMFQIJGBECAF7INQ", "timestamp": 1588687728923, "helpful_vote": 0, "verified_purchase": true}"#,
        r#"{"rating": 4.0, "title": "Works great but smells a little weird.", "text": "This product does what I need it to do.", "images": [], "asin": "B081TJ8YS3", "parent_asin": "B081TJ8YS3", "user_id": "AGKHLEW2SOWHNMFQIJGBECAF7INQ", "timestamp": 1588615855070, "helpful_vote": 1, "verified_purchase": true}"#,
        r#"{"rating": 5.0, "title": "Yes!", "text": "Smells good, feels great!", "images": [{"small_image_url": "https://m.media-amazon.com/images/I/71x.jpg"}], "asin": "B097R46CSY", "parent_asin": "B097R46CSY", "user_id": "AE74DYR3QUGVPZJ3P7RFWBGIX7XQ", "timestamp": 1589665266052, "helpful_vote": 2, "verified_purchase": true}"#,
        r#"{"rating": 1.0, "title": "Synthetic feeling", "text": "Felt synthetic", "images": [], "asin": "B09JS339BZ", "parent_asin": "B097R46CSY", "user_id": "AFQLNQNQYFWQZPJQZS6V3NZU4QBQ", "timestamp": 1262304000000, "helpful_vote": 0, "verified_purchase": false}"#,
    ]
    .join("\n")
}

/// Metadata for two of the reviewed products.
pub fn meta_lines() -> String {
    [
        r#"{"main_category": "All Beauty", "title": "Howard LC0008 Leather Conditioner, 8-Ounce", "average_rating": 4.8, "rating_number": 10, "features": [], "store": "Howard Products", "parent_asin": "B081TJ8YS3"}"#,
        r#"{"main_category": "All Beauty", "title": "Yes to Tomatoes Detoxifying Charcoal Cleanser", "average_rating": 4.5, "rating_number": 3, "features": [], "store": "Yes To", "parent_asin": "B097R46CSY"}"#,
    ]
    .join("\n")
}

/// `(month, day, year)` of row `row` in a date triple column.
pub fn date_at(batch: &RecordBatch, column: &str, row: usize) -> Option<(i32, i32, i32)> {
    let dates = batch
        .column_by_name(column)?
        .as_any()
        .downcast_ref::<StructArray>()?;
    if dates.is_null(row) {
        return None;
    }
    let part = |i: usize| {
        dates
            .column(i)
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row))
    };
    Some((part(0)?, part(1)?, part(2)?))
}

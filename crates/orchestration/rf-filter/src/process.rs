//! End-to-end filter-and-join operation.

use crate::plan::{meta_columns, review_columns};
use rf_enrichment::{left_join, JoinOptions};
use rf_error::{JoinSide, Result};
use rf_reader_ndjson::NdjsonReader;
use rf_transform::Projection;
use rf_types::{FilterRequest, FilteredTable, RecordReader, JOIN_KEY};
use std::time::Instant;
use tracing::{debug, info, Level};

/// Runs the filter-and-join transform.
///
/// 1. Reads the review file and projects it onto the requested fields
///    (plus `parent_asin` when joining). The raw records are dropped as
///    soon as the projection is built.
/// 2. When `request.will_join()`, reads the metadata file, projects it onto
///    `parent_asin` plus the requested metadata fields, and left-joins it to
///    the reviews. `parent_asin` is dropped from the result.
///
/// Any failure aborts the whole operation; there is no partial result.
pub fn process_reviews<R>(request: &FilterRequest, reader: &R) -> Result<FilteredTable>
where
    R: RecordReader + ?Sized,
{
    request.validate()?;
    let started = Instant::now();

    info!(
        review_path = %request.review_path,
        fields = request.review_fields.len(),
        join = request.will_join(),
        "Filtering reviews"
    );

    log_file_metadata(reader, &request.review_path)?;
    let records = reader.read_records(&request.review_path)?;
    debug!(records = records.len(), "Loaded review records");

    let mut projection = Projection::new(request.review_path.as_str(), review_columns(request));
    if request.will_join() {
        projection = projection.for_join(JoinSide::Reviews);
    }
    let reviews = projection.apply(records)?;

    let table = match request.join_source() {
        Some(meta_path) => {
            log_file_metadata(reader, meta_path)?;
            let records = reader.read_records(meta_path)?;
            debug!(records = records.len(), "Loaded metadata records");

            let metadata = Projection::new(meta_path, meta_columns(request))
                .for_join(JoinSide::Metadata)
                .apply(records)?;

            let (joined, _) = left_join(&reviews, &metadata, JOIN_KEY, &JoinOptions::default())?;
            FilteredTable::new(joined, true)
        }
        None => FilteredTable::new(reviews, false),
    };

    info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        joined = table.joined(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "{}",
        table.status_message()
    );

    Ok(table)
}

/// Logs the size and record count of an input file.
///
/// Counting records reads the file a second time, so this only runs when
/// debug logging is enabled.
fn log_file_metadata<R>(reader: &R, path: &str) -> Result<()>
where
    R: RecordReader + ?Sized,
{
    if tracing::enabled!(Level::DEBUG) {
        let metadata = reader.file_metadata(path)?;
        debug!(
            path = %path,
            size_bytes = metadata.size_bytes,
            record_count = metadata.record_count,
            "Input file"
        );
    }
    Ok(())
}

/// Runs the transform over local NDJSON files.
pub fn process_reviews_local(request: &FilterRequest) -> Result<FilteredTable> {
    process_reviews(request, &NdjsonReader::local_only())
}

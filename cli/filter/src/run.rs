//! Filter execution logic.

use crate::args::Cli;
use rf_error::{ReaderError, Result, RfError};
use rf_filter::process_reviews;
use rf_reader_ndjson::{normalize_path, Compression, NdjsonReader, NdjsonReaderConfig};
use rf_types::{FilterRequest, FilteredTable, MetaField, ReviewField};
use std::path::Path;
use tracing::{debug, info};

/// Initialize logging with the specified level.
pub fn init_logging(level: crate::args::LogLevel) -> anyhow::Result<()> {
    rf_cli_common::init_logging(level)
}

/// Execute the filter with the given arguments.
pub fn execute(args: &Cli) -> Result<FilteredTable> {
    let request = build_request(args)?;

    info!(
        review_path = %request.review_path,
        meta_path = ?request.meta_path,
        join = request.will_join(),
        "Starting filter"
    );

    process_reviews(&request, &NdjsonReader::new(reader_config(args)))
}

/// Reader settings from the command line.
pub fn reader_config(args: &Cli) -> NdjsonReaderConfig {
    let config = NdjsonReaderConfig::new();
    if args.gzip {
        config.with_compression(Compression::Gzip)
    } else {
        config
    }
}

/// Build the request from the job file (if any) and the command line.
///
/// Command-line values win over the job file.
pub fn build_request(args: &Cli) -> Result<FilterRequest> {
    let mut request = match &args.config {
        Some(path) => load_job_file(path)?,
        None => {
            let review_path = args.review_path.clone().ok_or_else(|| {
                RfError::Config("a review file is required without --config".to_string())
            })?;
            FilterRequest::new(review_path, Vec::new())
        }
    };

    if let Some(review_path) = &args.review_path {
        request.review_path = review_path.clone();
    }
    if !args.fields.is_empty() {
        request.review_fields = ReviewField::parse_list(&args.fields)?;
    }
    if let Some(meta) = &args.meta {
        request.meta_path = Some(meta.clone());
    }
    if let Some(meta_fields) = &args.meta_fields {
        request.meta_fields = MetaField::parse_list(meta_fields)?;
    }
    if args.no_join {
        request.join_enabled = false;
    }

    debug!(request = ?request, "Built filter request");
    Ok(request)
}

/// Load a YAML job file.
pub fn load_job_file(path: &Path) -> Result<FilterRequest> {
    let path = normalize_path(&path.to_string_lossy());

    let contents = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => RfError::Reader(ReaderError::NotFound(path.clone())),
        _ => RfError::Reader(ReaderError::Io(format!(
            "Failed to read job file '{}': {}",
            path, e
        ))),
    })?;

    serde_yaml::from_str(&contents)
        .map_err(|e| RfError::Config(format!("Invalid job file '{}': {}", path, e)))
}

//! NDJSON (Newline-Delimited JSON) record reader.
//!
//! This crate provides a reader that implements the `RecordReader` trait for
//! local line-delimited JSON files, plain or gzip-compressed.
//!
//! # Example
//!
//! ```ignore
//! use rf_reader_ndjson::NdjsonReader;
//! use rf_types::RecordReader;
//!
//! let reader = NdjsonReader::local_only();
//! let records = reader.read_records("data\\All_Beauty.jsonl.gz")?;
//! println!("Got {} records", records.len());
//! ```

mod path;
mod reader;

pub use path::normalize_path;
pub use reader::{Compression, NdjsonReader, NdjsonReaderConfig};

//! NDJSON reader implementation.

use crate::path::normalize_path;
use flate2::read::MultiGzDecoder;
use rf_error::{ReaderError, Result, RfError};
use rf_types::{json_type_name, FileMetadata, Record, RecordReader};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use tracing::{debug, info, trace};

/// Configuration for the NDJSON reader.
#[derive(Debug, Clone)]
pub struct NdjsonReaderConfig {
    /// Capacity of the read buffer in bytes
    pub buffer_size: usize,

    /// Forced compression; detected from the file extension when unset
    pub compression: Option<Compression>,
}

impl Default for NdjsonReaderConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,
            compression: None,
        }
    }
}

impl NdjsonReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a compression instead of detecting it from the extension.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = Some(compression);
        self
    }
}

/// Compression type detected from file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

impl Compression {
    /// Detect compression from a path.
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_lowercase();
        if lower.ends_with(".gz") || lower.ends_with(".gzip") {
            Compression::Gzip
        } else {
            Compression::None
        }
    }
}

/// Line-delimited JSON record reader for local files.
///
/// Reads the whole file into memory as one [`Record`] per non-blank line.
/// Gzip input (`.gz`, `.gzip`) is decompressed on the fly.
pub struct NdjsonReader {
    config: NdjsonReaderConfig,
}

impl NdjsonReader {
    /// Create a new NDJSON reader with the given configuration.
    pub fn new(config: NdjsonReaderConfig) -> Self {
        Self { config }
    }

    /// Create an NDJSON reader with default settings.
    pub fn local_only() -> Self {
        Self::new(NdjsonReaderConfig::default())
    }

    /// Open a file and wrap it in a (possibly decompressing) buffered reader.
    fn open(&self, path: &str) -> Result<Box<dyn BufRead>> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RfError::Reader(ReaderError::NotFound(path.to_string()))
            } else {
                RfError::Reader(ReaderError::Io(format!(
                    "Failed to open file '{}': {}",
                    path, e
                )))
            }
        })?;

        let compression = self
            .config
            .compression
            .unwrap_or_else(|| Compression::from_path(path));

        debug!(path = path, compression = ?compression, "Opened NDJSON file");

        let capacity = self.config.buffer_size;
        let reader: Box<dyn BufRead> = match compression {
            Compression::None => Box::new(BufReader::with_capacity(capacity, file)),
            Compression::Gzip => {
                let decoder = MultiGzDecoder::new(BufReader::new(file));
                Box::new(BufReader::with_capacity(capacity, decoder))
            }
        };

        Ok(reader)
    }

    /// Iterate the non-blank lines of a file with their 1-based line numbers.
    fn for_each_line(
        &self,
        path: &str,
        mut f: impl FnMut(usize, &str) -> Result<()>,
    ) -> Result<()> {
        let reader = self.open(path)?;

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|e| line_error(path, line_number, e))?;

            let trimmed = if index == 0 {
                line.trim_start_matches('\u{feff}').trim()
            } else {
                line.trim()
            };

            if trimmed.is_empty() {
                continue;
            }

            f(line_number, trimmed)?;
        }

        Ok(())
    }
}

/// Map a failed line read to a reader error.
///
/// Undecodable bytes (bad UTF-8, corrupt gzip) are reported as parse errors
/// at the line where they surfaced.
fn line_error(path: &str, line: usize, error: std::io::Error) -> RfError {
    match error.kind() {
        std::io::ErrorKind::InvalidData | std::io::ErrorKind::InvalidInput => {
            RfError::Reader(ReaderError::Parse {
                path: path.to_string(),
                line,
                message: error.to_string(),
            })
        }
        _ => RfError::Reader(ReaderError::Io(format!(
            "Failed to read '{}' at line {}: {}",
            path, line, error
        ))),
    }
}

/// Parse one line into a record.
fn parse_record(path: &str, line: usize, text: &str) -> Result<Record> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        RfError::Reader(ReaderError::Parse {
            path: path.to_string(),
            line,
            message: e.to_string(),
        })
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(RfError::Reader(ReaderError::Parse {
            path: path.to_string(),
            line,
            message: format!("expected a JSON object, found {}", json_type_name(&other)),
        })),
    }
}

impl RecordReader for NdjsonReader {
    fn read_records(&self, path: &str) -> Result<Vec<Record>> {
        let path = normalize_path(path);
        info!(path = %path, "Reading NDJSON file");

        let mut records = Vec::new();
        self.for_each_line(&path, |line, text| {
            records.push(parse_record(&path, line, text)?);
            trace!(line = line, "Parsed NDJSON record");
            Ok(())
        })?;

        debug!(path = %path, records = records.len(), "Read NDJSON file");

        Ok(records)
    }

    fn file_metadata(&self, path: &str) -> Result<FileMetadata> {
        let path = normalize_path(path);
        debug!(path = %path, "Getting NDJSON file metadata");

        let metadata = std::fs::metadata(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RfError::Reader(ReaderError::NotFound(path.clone()))
            } else {
                RfError::Reader(ReaderError::Io(format!(
                    "Failed to get metadata for '{}': {}",
                    path, e
                )))
            }
        })?;

        let mut record_count = 0u64;
        self.for_each_line(&path, |_, _| {
            record_count += 1;
            Ok(())
        })?;

        Ok(FileMetadata::new(metadata.len(), record_count))
    }
}

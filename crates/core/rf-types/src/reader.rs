//! Record reader trait and related types.

use rf_error::Result;

/// One line-delimited JSON object.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Trait for loaders of line-delimited JSON record files.
///
/// The transform reads each input fully before projecting it, so readers
/// return every record of the file at once.
///
/// # Implementations
///
/// - NDJSON reader: local files, plain or gzip-compressed
pub trait RecordReader {
    /// Reads every record of a file, in file order.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the file to read
    fn read_records(&self, path: &str) -> Result<Vec<Record>>;

    /// Gets size and record count of a file.
    fn file_metadata(&self, path: &str) -> Result<FileMetadata>;
}

/// Metadata about an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    /// File size in bytes (as stored, before decompression)
    pub size_bytes: u64,

    /// Number of non-blank lines
    pub record_count: u64,
}

impl FileMetadata {
    pub fn new(size_bytes: u64, record_count: u64) -> Self {
        Self {
            size_bytes,
            record_count,
        }
    }
}

/// Short description of a JSON value's type, for error messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

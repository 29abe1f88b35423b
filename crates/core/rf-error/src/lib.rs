//! Error types and classification for reviewflow.
//!
//! This crate provides:
//! - [`RfError`] - Top-level error enum for the filter-and-join transform
//! - Domain-specific errors ([`ReaderError`], [`SchemaError`], [`JoinError`])
//! - [`ErrorKind`] for reporting (CLI exit codes, log fields)

use thiserror::Error;

/// Top-level error type for reviewflow.
#[derive(Error, Debug)]
pub enum RfError {
    /// Reader errors (file access, line parsing)
    #[error("Reader error: {0}")]
    Reader(#[from] ReaderError),

    /// Requested columns that the data or the field set cannot provide
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Join key problems on either side of the join
    #[error("Join error: {0}")]
    Join(#[from] JoinError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Reader-related errors.
#[derive(Error, Debug)]
pub enum ReaderError {
    /// File not found
    #[error("File not found: {0}")]
    NotFound(String),

    /// I/O error during open or read
    #[error("I/O error: {0}")]
    Io(String),

    /// A non-blank line that is not a JSON object
    #[error("Parse error in '{path}' at line {line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },
}

/// Schema-related errors.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Field name outside the known field set
    #[error("Unknown {dataset} field '{field}' (available: {available})")]
    UnknownField {
        dataset: &'static str,
        field: String,
        available: String,
    },

    /// Known field that no loaded record carries
    #[error("Column '{field}' not present in {source_path}")]
    MissingColumn { field: String, source_path: String },

    /// Same field requested twice
    #[error("Field '{0}' requested more than once")]
    DuplicateField(String),

    /// Empty review field list
    #[error("At least one review field must be requested")]
    NoFields,

    /// Value whose JSON type the column cannot hold
    #[error("Invalid value for '{field}' at row {row}: {reason}")]
    InvalidValue {
        field: String,
        row: usize,
        reason: String,
    },
}

/// Side of the join an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinSide {
    Reviews,
    Metadata,
}

impl std::fmt::Display for JoinSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reviews => write!(f, "reviews"),
            Self::Metadata => write!(f, "metadata"),
        }
    }
}

/// Join-related errors.
#[derive(Error, Debug)]
pub enum JoinError {
    /// Join requested but the key column is absent on one side
    #[error("Join key '{key}' missing from {side}")]
    MissingKey { key: String, side: JoinSide },

    /// Key column present but not a string column
    #[error("Join key '{key}' in {side} must be a string column, found {found}")]
    KeyType {
        key: String,
        side: JoinSide,
        found: String,
    },
}

/// Coarse error classification.
///
/// Mirrors the failure families the transform can report: missing or
/// unreadable files, malformed lines, bad column requests and join key
/// problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or unreadable file
    Io,

    /// Malformed line-delimited JSON
    Parse,

    /// Requested column unknown, absent or of the wrong type
    Schema,

    /// Join requested but the key column is unusable
    JoinKey,

    /// Invalid request or job file
    Config,

    /// Anything else
    Other,
}

impl ErrorKind {
    /// Process exit code reported by the CLI for this kind.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Other => 1,
            Self::Io => 2,
            Self::Parse => 3,
            Self::Schema => 4,
            Self::JoinKey => 5,
            Self::Config => 6,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io => write!(f, "Io"),
            Self::Parse => write!(f, "Parse"),
            Self::Schema => write!(f, "Schema"),
            Self::JoinKey => write!(f, "JoinKey"),
            Self::Config => write!(f, "Config"),
            Self::Other => write!(f, "Other"),
        }
    }
}

impl RfError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RfError::Reader(e) => classify_reader_error(e),
            RfError::Schema(_) => ErrorKind::Schema,
            RfError::Join(_) => ErrorKind::JoinKey,
            RfError::Config(_) => ErrorKind::Config,
            RfError::Other(_) => ErrorKind::Other,
        }
    }
}

fn classify_reader_error(error: &ReaderError) -> ErrorKind {
    match error {
        ReaderError::NotFound(_) => ErrorKind::Io,
        ReaderError::Io(_) => ErrorKind::Io,
        ReaderError::Parse { .. } => ErrorKind::Parse,
    }
}

/// Result type alias using RfError.
pub type Result<T> = std::result::Result<T, RfError>;

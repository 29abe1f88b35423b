//! Core types for reviewflow.
//!
//! This crate provides the foundational types used throughout the system:
//! - [`ReviewField`] / [`MetaField`] - The selectable columns of each dataset
//! - [`ColumnKind`] - Output type and extraction rule of a column
//! - [`FilterRequest`] - What to read, what to keep and whether to join
//! - [`FilteredTable`] - Arrow RecordBatch wrapper returned by the transform
//! - [`RecordReader`] - Trait for loaders of line-delimited JSON records

pub mod config;
pub mod fields;
pub mod reader;
pub mod table;

pub use config::*;
pub use fields::*;
pub use reader::*;
pub use table::*;

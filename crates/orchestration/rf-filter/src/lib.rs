//! Filter-and-join transform for reviewflow.
//!
//! Reads a line-delimited JSON review file, keeps the requested columns
//! (reducing `images` to a flag and `timestamp` to a date triple), and
//! optionally left-joins product metadata on `parent_asin`.
//!
//! # Example
//!
//! ```ignore
//! use rf_filter::process_reviews_local;
//! use rf_types::{FilterRequest, ReviewField};
//!
//! let request = FilterRequest::new(
//!     "All_Beauty.jsonl",
//!     ReviewField::parse_list(&["helpful_vote", "timestamp", "rating", "images", "text"])?,
//! )
//! .with_metadata("meta_All_Beauty.jsonl");
//!
//! let table = process_reviews_local(&request)?;
//! println!("{}", table.status_message());
//! ```

mod plan;
mod process;

pub use plan::{meta_columns, review_columns};
pub use process::{process_reviews, process_reviews_local};

//! Integration tests for reviewflow.
//!
//! These tests run the full filter-and-join transform against real files in
//! a temporary directory, plain and gzip-compressed.
//!
//! ## Running Integration Tests
//!
//! ```bash
//! cargo test -p integration-tests
//! ```

mod filter_test;
mod reader_test;

//! Shared utilities for reviewflow CLI binaries.
//!
//! Logging setup and output formatting used by the `rf-filter` binary.

pub mod args;
pub mod format;
pub mod logging;

pub use args::LogLevel;
pub use format::format_number;
pub use logging::init_logging;

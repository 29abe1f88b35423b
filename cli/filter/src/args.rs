//! CLI argument definitions for rf-filter.

use clap::{Parser, ValueEnum};
pub use rf_cli_common::LogLevel;
use std::path::PathBuf;

/// Filter Amazon-style review dumps down to selected columns and
/// optionally merge product metadata on `parent_asin`.
///
/// Both inputs are line-delimited JSON (one object per line), plain or
/// gzip-compressed. The first rows of the result are printed to stdout.
///
/// ## Examples
///
/// Keep five review columns and merge the default metadata columns:
///   rf-filter All_Beauty.jsonl -f helpful_vote,timestamp,rating,images,text -m meta_All_Beauty.jsonl
///
/// Review columns only, as JSON lines:
///   rf-filter All_Beauty.jsonl.gz -f rating,user_id -o jsonl -n 20
///
/// Run a saved job:
///   rf-filter -c beauty.yaml
#[derive(Parser, Debug)]
#[command(name = "rf-filter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Input ===
    /// Line-delimited JSON review file
    #[arg(required_unless_present = "config")]
    pub review_path: Option<String>,

    /// Review fields to keep, comma separated, in output order
    #[arg(
        short = 'f',
        long,
        value_delimiter = ',',
        required_unless_present = "config"
    )]
    pub fields: Vec<String>,

    /// Product metadata file to merge on parent_asin
    #[arg(short = 'm', long)]
    pub meta: Option<String>,

    /// Metadata fields to keep, comma separated
    /// [default: parent_asin,main_category,title,store,average_rating,rating_number]
    #[arg(long, value_delimiter = ',')]
    pub meta_fields: Option<Vec<String>>,

    /// Do not merge metadata even when a metadata file is given
    #[arg(long)]
    pub no_join: bool,

    /// Decompress both inputs as gzip regardless of file extension
    #[arg(long)]
    pub gzip: bool,

    /// YAML job file; command-line options override its values
    #[arg(short = 'c', long, env = "RF_FILTER_CONFIG")]
    pub config: Option<PathBuf>,

    // === Output ===
    /// Number of rows to print
    #[arg(short = 'n', long, default_value_t = 6)]
    pub head: usize,

    /// Output format for the printed rows
    #[arg(short = 'o', long, value_enum, default_value = "table")]
    pub output_format: OutputFormat,

    // === Logging ===
    /// Log level
    #[arg(short = 'l', long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Output format for the printed rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// JSON Lines (one JSON object per row)
    Jsonl,
}

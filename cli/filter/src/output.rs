//! Rendering of the result preview.

use crate::args::OutputFormat;
use anyhow::Result;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use arrow_json::writer::LineDelimited;
use arrow_json::WriterBuilder;
use std::io::Write;

/// Write the status message followed by the rows of `batch`.
pub fn write_preview(
    status: &str,
    batch: &RecordBatch,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "{}", status)?;
    write_batch(batch, format, out)?;
    out.flush()?;
    Ok(())
}

/// Write the rows of `batch` in the given format.
pub fn write_batch(batch: &RecordBatch, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let rendered = pretty_format_batches(std::slice::from_ref(batch))?;
            writeln!(out, "{}", rendered)?;
        }
        OutputFormat::Jsonl => {
            let mut writer = WriterBuilder::new()
                .with_explicit_nulls(true)
                .build::<_, LineDelimited>(out);
            writer.write(batch)?;
            writer.finish()?;
        }
    }
    Ok(())
}

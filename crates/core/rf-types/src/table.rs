//! Result table of the filter-and-join transform.

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Status message when only the review projection ran.
pub const FILTER_MESSAGE: &str = "Completed filter.";

/// Status message when metadata was merged into the reviews.
pub const MERGE_MESSAGE: &str = "Completed filter + merge of metadata.";

/// Filtered (and possibly joined) review table.
///
/// Wraps an Arrow [`RecordBatch`] in an `Arc` so the table can be handed to
/// printers and writers without copying, and records whether the metadata
/// join ran.
#[derive(Clone)]
pub struct FilteredTable {
    /// The underlying Arrow RecordBatch
    inner: Arc<RecordBatch>,

    /// Whether metadata columns were merged in
    joined: bool,
}

impl FilteredTable {
    pub fn new(batch: RecordBatch, joined: bool) -> Self {
        Self {
            inner: Arc::new(batch),
            joined,
        }
    }

    /// Returns a reference to the underlying RecordBatch.
    #[inline]
    pub fn record_batch(&self) -> &RecordBatch {
        &self.inner
    }

    /// Whether metadata columns were merged in.
    #[inline]
    pub fn joined(&self) -> bool {
        self.joined
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.inner.num_rows()
    }

    #[inline]
    pub fn num_columns(&self) -> usize {
        self.inner.num_columns()
    }

    #[inline]
    pub fn schema(&self) -> SchemaRef {
        self.inner.schema()
    }

    /// Output column names, in order.
    pub fn column_names(&self) -> Vec<String> {
        self.inner
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// First `n` rows (fewer if the table is shorter). Zero-copy slice.
    pub fn head(&self, n: usize) -> RecordBatch {
        self.inner.slice(0, n.min(self.inner.num_rows()))
    }

    /// Human-readable confirmation of what ran.
    pub fn status_message(&self) -> &'static str {
        if self.joined {
            MERGE_MESSAGE
        } else {
            FILTER_MESSAGE
        }
    }
}

impl std::fmt::Debug for FilteredTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteredTable")
            .field("joined", &self.joined)
            .field("rows", &self.inner.num_rows())
            .field("schema", &self.inner.schema())
            .finish()
    }
}

//! Left-outer join of review rows with metadata rows.

use crate::index::{key_column, row_position, KeyIndex};
use arrow::array::{ArrayRef, UInt32Array};
use arrow::compute::take;
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use rf_error::{JoinSide, Result, RfError};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Options controlling the join output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOptions {
    /// Appended to a left column whose name also exists on the right
    pub left_suffix: String,

    /// Appended to a right column whose name also exists on the left
    pub right_suffix: String,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            left_suffix: "_x".to_string(),
            right_suffix: "_y".to_string(),
        }
    }
}

/// Row accounting of a join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    /// Left rows with at least one matching right row
    pub matched: usize,

    /// Left rows without a match (kept with null right columns)
    pub unmatched: usize,

    /// Extra output rows produced by keys held by several right rows
    pub fan_out: usize,
}

/// Left-outer join of `left` with `right` on the string column `key`.
///
/// Every left row is kept, in order. A left row whose key matches several
/// right rows is repeated once per match, in right-table order; a left row
/// with no match (or a null key) gets nulls in every right column. The key
/// column itself is dropped from the output. Output columns are the left
/// columns followed by the right columns; names present on both sides get
/// the suffixes from `options`.
pub fn left_join(
    left: &RecordBatch,
    right: &RecordBatch,
    key: &str,
    options: &JoinOptions,
) -> Result<(RecordBatch, JoinStats)> {
    let left_keys = key_column(left, key, JoinSide::Reviews)?;
    let index = KeyIndex::build(right, key)?;

    debug!(
        keys = index.len(),
        duplicate_keys = index.duplicate_keys(),
        "Indexed metadata rows"
    );

    let mut left_rows: Vec<u32> = Vec::with_capacity(left.num_rows());
    let mut right_rows: Vec<Option<u32>> = Vec::with_capacity(left.num_rows());
    let mut stats = JoinStats::default();

    for (row, value) in left_keys.iter().enumerate() {
        let row = row_position(row, JoinSide::Reviews)?;

        match value.and_then(|k| index.get(k)) {
            Some(matches) => {
                stats.matched += 1;
                stats.fan_out += matches.len() - 1;
                for &right_row in matches {
                    left_rows.push(row);
                    right_rows.push(Some(right_row));
                }
            }
            None => {
                stats.unmatched += 1;
                left_rows.push(row);
                right_rows.push(None);
            }
        }
    }

    let left_indices = UInt32Array::from(left_rows);
    let right_indices = UInt32Array::from(right_rows);

    let left_schema = left.schema();
    let right_schema = right.schema();
    let left_names: HashSet<&str> = left_schema
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .filter(|name| *name != key)
        .collect();
    let right_names: HashSet<&str> = right_schema
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .filter(|name| *name != key)
        .collect();

    let mut fields: Vec<Field> = Vec::new();
    let mut columns: Vec<ArrayRef> = Vec::new();

    for (field, column) in left_schema.fields().iter().zip(left.columns()) {
        if field.name() == key {
            continue;
        }
        let name = suffixed(field.name(), &right_names, &options.left_suffix);
        fields.push(Field::new(name, field.data_type().clone(), true));
        columns.push(take_column(column, &left_indices)?);
    }

    for (field, column) in right_schema.fields().iter().zip(right.columns()) {
        if field.name() == key {
            continue;
        }
        let name = suffixed(field.name(), &left_names, &options.right_suffix);
        fields.push(Field::new(name, field.data_type().clone(), true));
        columns.push(take_column(column, &right_indices)?);
    }

    let row_count = left_indices.len();
    let batch = RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        columns,
        &RecordBatchOptions::new().with_row_count(Some(row_count)),
    )
    .map_err(|e| RfError::Other(anyhow::anyhow!("Failed to assemble joined table: {}", e)))?;

    info!(
        rows = batch.num_rows(),
        matched = stats.matched,
        unmatched = stats.unmatched,
        fan_out = stats.fan_out,
        "Joined metadata"
    );

    Ok((batch, stats))
}

fn suffixed(name: &str, other_side: &HashSet<&str>, suffix: &str) -> String {
    if other_side.contains(name) {
        format!("{}{}", name, suffix)
    } else {
        name.to_string()
    }
}

fn take_column(column: &ArrayRef, indices: &UInt32Array) -> Result<ArrayRef> {
    take(column.as_ref(), indices, None)
        .map_err(|e| RfError::Other(anyhow::anyhow!("Failed to gather join rows: {}", e)))
}

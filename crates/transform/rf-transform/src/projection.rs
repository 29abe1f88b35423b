//! Projection of raw records onto typed Arrow columns.

use crate::normalize::{date_triple, has_images};
use arrow::array::{
    ArrayRef, BooleanBuilder, Float64Builder, Int32Builder, Int64Builder, StringBuilder,
    StructArray,
};
use arrow::buffer::NullBuffer;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use rf_error::{JoinError, JoinSide, Result, RfError, SchemaError};
use rf_types::{date_triple_fields, json_type_name, ColumnKind, ColumnSpec, Record};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Columns to keep from one dataset, in output order.
///
/// Each [`ColumnSpec`] names the record key and its [`ColumnKind`]; the kind
/// decides the Arrow type and how each JSON value is converted. A column
/// absent from every record fails the projection. When the projection feeds
/// a join, an absent join key is reported as a join error for that side.
#[derive(Debug, Clone)]
pub struct Projection {
    /// Source file, for error messages
    source: String,

    /// Output columns
    columns: Vec<ColumnSpec>,

    /// Side of the join this projection feeds, if any
    join_side: Option<JoinSide>,
}

impl Projection {
    pub fn new(source: impl Into<String>, columns: Vec<ColumnSpec>) -> Self {
        Self {
            source: source.into(),
            columns,
            join_side: None,
        }
    }

    /// Mark this projection as one side of a join.
    pub fn for_join(mut self, side: JoinSide) -> Self {
        self.join_side = Some(side);
        self
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Projects `records` onto the configured columns.
    ///
    /// Takes the records by value; they are dropped once the columns are
    /// built, so the raw table never outlives the projection.
    pub fn apply(&self, records: Vec<Record>) -> Result<RecordBatch> {
        self.check_columns_present(&records)?;

        let mut arrays = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            arrays.push(build_column(column, &records)?);
        }

        let num_rows = records.len();
        drop(records);

        let schema = Schema::new(
            self.columns
                .iter()
                .map(|c| c.arrow_field())
                .collect::<Vec<_>>(),
        );

        let batch = RecordBatch::try_new(Arc::new(schema), arrays).map_err(|e| {
            RfError::Other(anyhow::anyhow!(
                "Failed to assemble projection of '{}': {}",
                self.source,
                e
            ))
        })?;

        debug!(
            source = %self.source,
            rows = num_rows,
            columns = batch.num_columns(),
            "Projected records"
        );

        Ok(batch)
    }

    fn check_columns_present(&self, records: &[Record]) -> Result<()> {
        for column in &self.columns {
            if records.iter().any(|r| r.contains_key(column.name)) {
                continue;
            }

            return Err(match self.join_side {
                Some(side) if column.is_join_key() => RfError::Join(JoinError::MissingKey {
                    key: column.name.to_string(),
                    side,
                }),
                _ => RfError::Schema(SchemaError::MissingColumn {
                    field: column.name.to_string(),
                    source_path: self.source.clone(),
                }),
            });
        }
        Ok(())
    }
}

fn invalid_value(column: &ColumnSpec, row: usize, reason: impl Into<String>) -> RfError {
    RfError::Schema(SchemaError::InvalidValue {
        field: column.name.to_string(),
        row,
        reason: reason.into(),
    })
}

fn unexpected(expected: &str, found: &Value) -> String {
    format!("expected {}, found {}", expected, json_type_name(found))
}

/// Build one Arrow column from the records.
///
/// Missing keys and JSON `null` become nulls, except for
/// [`ColumnKind::HasImages`] which is never null.
fn build_column(column: &ColumnSpec, records: &[Record]) -> Result<ArrayRef> {
    let values = records.iter().map(|r| r.get(column.name));

    let array: ArrayRef = match column.kind {
        ColumnKind::Float => {
            let mut builder = Float64Builder::with_capacity(records.len());
            for (row, value) in values.enumerate() {
                match value {
                    None | Some(Value::Null) => builder.append_null(),
                    Some(Value::Number(n)) => match n.as_f64() {
                        Some(v) => builder.append_value(v),
                        None => return Err(invalid_value(column, row, "number out of range")),
                    },
                    Some(other) => {
                        return Err(invalid_value(column, row, unexpected("a number", other)))
                    }
                }
            }
            Arc::new(builder.finish())
        }
        ColumnKind::Integer => {
            let mut builder = Int64Builder::with_capacity(records.len());
            for (row, value) in values.enumerate() {
                match value {
                    None | Some(Value::Null) => builder.append_null(),
                    Some(Value::Number(n)) => match as_integer(n) {
                        Some(v) => builder.append_value(v),
                        None => {
                            return Err(invalid_value(
                                column,
                                row,
                                format!("expected an integer, found {}", n),
                            ))
                        }
                    },
                    Some(other) => {
                        return Err(invalid_value(column, row, unexpected("an integer", other)))
                    }
                }
            }
            Arc::new(builder.finish())
        }
        ColumnKind::Text => {
            let mut builder = StringBuilder::with_capacity(records.len(), records.len() * 16);
            for (row, value) in values.enumerate() {
                match value {
                    None | Some(Value::Null) => builder.append_null(),
                    Some(Value::String(s)) => builder.append_value(s),
                    Some(Value::Number(n)) => builder.append_value(n.to_string()),
                    Some(Value::Bool(b)) => builder.append_value(if *b { "true" } else { "false" }),
                    Some(other) => {
                        return Err(invalid_value(column, row, unexpected("a string", other)))
                    }
                }
            }
            Arc::new(builder.finish())
        }
        ColumnKind::Flag => {
            let mut builder = BooleanBuilder::with_capacity(records.len());
            for (row, value) in values.enumerate() {
                match value {
                    None | Some(Value::Null) => builder.append_null(),
                    Some(Value::Bool(b)) => builder.append_value(*b),
                    Some(other) => {
                        return Err(invalid_value(column, row, unexpected("a boolean", other)))
                    }
                }
            }
            Arc::new(builder.finish())
        }
        ColumnKind::HasImages => {
            let mut builder = BooleanBuilder::with_capacity(records.len());
            for value in values {
                builder.append_value(has_images(value));
            }
            Arc::new(builder.finish())
        }
        ColumnKind::DateTriple => build_date_triples(column, records)?,
    };

    Ok(array)
}

/// Integers as-is; floats only when integral and in range.
fn as_integer(n: &serde_json::Number) -> Option<i64> {
    if let Some(v) = n.as_i64() {
        return Some(v);
    }
    let v = n.as_f64()?;
    if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

fn build_date_triples(column: &ColumnSpec, records: &[Record]) -> Result<ArrayRef> {
    let mut months = Int32Builder::with_capacity(records.len());
    let mut days = Int32Builder::with_capacity(records.len());
    let mut years = Int32Builder::with_capacity(records.len());
    let mut validity = Vec::with_capacity(records.len());

    for (row, record) in records.iter().enumerate() {
        let triple = match record.get(column.name) {
            None => None,
            Some(value) => date_triple(value).map_err(|reason| invalid_value(column, row, reason))?,
        };

        match triple {
            Some(t) => {
                months.append_value(t.month as i32);
                days.append_value(t.day as i32);
                years.append_value(t.year);
                validity.push(true);
            }
            None => {
                months.append_null();
                days.append_null();
                years.append_null();
                validity.push(false);
            }
        }
    }

    let children: Vec<ArrayRef> = vec![
        Arc::new(months.finish()),
        Arc::new(days.finish()),
        Arc::new(years.finish()),
    ];

    let array = StructArray::try_new(
        date_triple_fields(),
        children,
        Some(NullBuffer::from(validity)),
    )
    .map_err(|e| {
        RfError::Other(anyhow::anyhow!(
            "Failed to build '{}' column: {}",
            column.name,
            e
        ))
    })?;

    Ok(Arc::new(array))
}

//! KeyIndex - O(1) exact-match lookup from join key to row positions.

use ahash::RandomState;
use arrow::array::{Array, StringArray};
use arrow::record_batch::RecordBatch;
use hashbrown::HashMap;
use rf_error::{JoinError, JoinSide, Result, RfError};

/// Returns the string key column of one side of a join.
pub fn key_column<'a>(batch: &'a RecordBatch, key: &str, side: JoinSide) -> Result<&'a StringArray> {
    let position = batch
        .schema()
        .index_of(key)
        .map_err(|_| JoinError::MissingKey {
            key: key.to_string(),
            side,
        })?;

    let column = batch.column(position);
    let keys = column
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| JoinError::KeyType {
            key: key.to_string(),
            side,
            found: column.data_type().to_string(),
        })?;

    Ok(keys)
}

/// Converts a row number to the `u32` position used by take indices.
///
/// Fails on tables with more than `u32::MAX` rows instead of wrapping.
pub fn row_position(row: usize, side: JoinSide) -> Result<u32> {
    u32::try_from(row)
        .map_err(|_| RfError::Other(anyhow::anyhow!("{} table exceeds {} rows", side, u32::MAX)))
}

/// Exact-match index over the key column of a table, using hashbrown with
/// ahash.
///
/// Every row holding a key is kept, in table order, so a key that appears
/// on several rows maps to all of them. Rows with a null key are not
/// indexed.
#[derive(Debug)]
pub struct KeyIndex {
    /// Maps key string to the positions of the rows holding it.
    rows: HashMap<String, Vec<u32>, RandomState>,

    /// Name of the key field.
    key_field: String,
}

impl KeyIndex {
    /// Creates a new empty index.
    pub fn new(key_field: impl Into<String>) -> Self {
        Self {
            rows: HashMap::with_hasher(RandomState::new()),
            key_field: key_field.into(),
        }
    }

    /// Indexes the key column of a metadata table.
    pub fn build(batch: &RecordBatch, key_field: &str) -> Result<Self> {
        let keys = key_column(batch, key_field, JoinSide::Metadata)?;
        let mut index = Self::new(key_field);

        for (row, key) in keys.iter().enumerate() {
            if let Some(key) = key {
                index.insert(key, row_position(row, JoinSide::Metadata)?);
            }
        }

        Ok(index)
    }

    /// Records that row `row` holds `key`.
    pub fn insert(&mut self, key: &str, row: u32) {
        self.rows.entry_ref(key).or_default().push(row);
    }

    /// Looks up a key and returns the positions of its rows.
    pub fn get(&self, key: &str) -> Option<&[u32]> {
        self.rows.get(key).map(|rows| rows.as_slice())
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of keys held by more than one row.
    pub fn duplicate_keys(&self) -> usize {
        self.rows.values().filter(|rows| rows.len() > 1).count()
    }

    /// Returns the key field name.
    pub fn key_field(&self) -> &str {
        &self.key_field
    }
}

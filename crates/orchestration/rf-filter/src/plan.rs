//! Working column sets derived from a request.
//!
//! Both functions are pure: the join key is added to the columns that get
//! extracted, never to the caller's field lists.

use rf_types::{ColumnSpec, FilterRequest, MetaField, ReviewField};

/// Review columns to extract, in output order.
///
/// The requested fields, followed by `parent_asin` when the request joins
/// and did not ask for the key itself.
pub fn review_columns(request: &FilterRequest) -> Vec<ColumnSpec> {
    let mut columns: Vec<ColumnSpec> = request.review_fields.iter().map(|f| f.column()).collect();

    if request.will_join() && !request.review_fields.contains(&ReviewField::ParentAsin) {
        columns.push(ReviewField::ParentAsin.column());
    }

    columns
}

/// Metadata columns to extract: the join key, then the requested fields in
/// order.
pub fn meta_columns(request: &FilterRequest) -> Vec<ColumnSpec> {
    std::iter::once(MetaField::ParentAsin.column())
        .chain(
            request
                .meta_fields
                .iter()
                .filter(|f| **f != MetaField::ParentAsin)
                .map(|f| f.column()),
        )
        .collect()
}

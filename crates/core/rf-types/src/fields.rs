//! Selectable fields of the review and metadata datasets.
//!
//! Every recognized field name maps to a [`ColumnKind`], which fixes both the
//! Arrow type of the output column and how the raw JSON value is extracted.
//! Names outside these enums are rejected when a request is built.

use arrow::datatypes::{DataType, Field, Fields};
use rf_error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the column correlating reviews with product metadata.
pub const JOIN_KEY: &str = "parent_asin";

/// Output type and extraction rule of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// JSON number as Float64
    Float,
    /// JSON integer as Int64
    Integer,
    /// JSON string as Utf8
    Text,
    /// JSON boolean as Boolean
    Flag,
    /// Image collection or count reduced to "has at least one image"
    HasImages,
    /// Date reduced to a `(month, day, year)` struct
    DateTriple,
}

impl ColumnKind {
    /// Arrow data type of a column of this kind.
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnKind::Float => DataType::Float64,
            ColumnKind::Integer => DataType::Int64,
            ColumnKind::Text => DataType::Utf8,
            ColumnKind::Flag | ColumnKind::HasImages => DataType::Boolean,
            ColumnKind::DateTriple => DataType::Struct(date_triple_fields()),
        }
    }
}

/// Child fields of a [`ColumnKind::DateTriple`] column, in output order.
pub fn date_triple_fields() -> Fields {
    Fields::from(vec![
        Field::new("month", DataType::Int32, true),
        Field::new("day", DataType::Int32, true),
        Field::new("year", DataType::Int32, true),
    ])
}

/// A named, typed column to extract from raw records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Key in the JSON records and name of the output column
    pub name: &'static str,

    /// Output type and extraction rule
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }

    /// Arrow field for this column. Every output column is nullable.
    pub fn arrow_field(&self) -> Field {
        Field::new(self.name, self.kind.data_type(), true)
    }

    /// Whether this column is the join key.
    pub fn is_join_key(&self) -> bool {
        self.name == JOIN_KEY
    }
}

/// Selectable field of a review record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewField {
    /// Rating of the product (1.0 to 5.0)
    Rating,
    /// Title of the review
    Title,
    /// Body of the review
    Text,
    /// Attached images, output as "has images"
    Images,
    /// Product id of the reviewed variant
    Asin,
    /// Parent product id, the join key
    ParentAsin,
    /// Reviewer id
    UserId,
    /// Review date, output as `(month, day, year)`
    Timestamp,
    /// Purchase verification flag
    VerifiedPurchase,
    /// Helpful votes
    HelpfulVote,
}

impl ReviewField {
    pub const ALL: [ReviewField; 10] = [
        ReviewField::Rating,
        ReviewField::Title,
        ReviewField::Text,
        ReviewField::Images,
        ReviewField::Asin,
        ReviewField::ParentAsin,
        ReviewField::UserId,
        ReviewField::Timestamp,
        ReviewField::VerifiedPurchase,
        ReviewField::HelpfulVote,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReviewField::Rating => "rating",
            ReviewField::Title => "title",
            ReviewField::Text => "text",
            ReviewField::Images => "images",
            ReviewField::Asin => "asin",
            ReviewField::ParentAsin => JOIN_KEY,
            ReviewField::UserId => "user_id",
            ReviewField::Timestamp => "timestamp",
            ReviewField::VerifiedPurchase => "verified_purchase",
            ReviewField::HelpfulVote => "helpful_vote",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ReviewField::Rating => ColumnKind::Float,
            ReviewField::Title
            | ReviewField::Text
            | ReviewField::Asin
            | ReviewField::ParentAsin
            | ReviewField::UserId => ColumnKind::Text,
            ReviewField::Images => ColumnKind::HasImages,
            ReviewField::Timestamp => ColumnKind::DateTriple,
            ReviewField::VerifiedPurchase => ColumnKind::Flag,
            ReviewField::HelpfulVote => ColumnKind::Integer,
        }
    }

    pub fn column(&self) -> ColumnSpec {
        ColumnSpec::new(self.name(), self.kind())
    }

    /// Parses a list of field names, failing on the first unknown one.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Self>, SchemaError> {
        names.iter().map(|n| n.as_ref().parse()).collect()
    }
}

impl FromStr for ReviewField {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .iter()
            .find(|f| f.name() == name)
            .copied()
            .ok_or_else(|| SchemaError::UnknownField {
                dataset: "review",
                field: name.to_string(),
                available: join_names(Self::ALL.iter().map(|f| f.name())),
            })
    }
}

impl fmt::Display for ReviewField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Selectable field of a product metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaField {
    /// Parent product id, the join key
    ParentAsin,
    MainCategory,
    Title,
    Store,
    AverageRating,
    RatingNumber,
}

impl MetaField {
    pub const ALL: [MetaField; 6] = [
        MetaField::ParentAsin,
        MetaField::MainCategory,
        MetaField::Title,
        MetaField::Store,
        MetaField::AverageRating,
        MetaField::RatingNumber,
    ];

    /// Fields kept from metadata when the caller does not choose.
    pub const DEFAULT: [MetaField; 6] = Self::ALL;

    pub fn name(&self) -> &'static str {
        match self {
            MetaField::ParentAsin => JOIN_KEY,
            MetaField::MainCategory => "main_category",
            MetaField::Title => "title",
            MetaField::Store => "store",
            MetaField::AverageRating => "average_rating",
            MetaField::RatingNumber => "rating_number",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            MetaField::ParentAsin | MetaField::MainCategory | MetaField::Title | MetaField::Store => {
                ColumnKind::Text
            }
            MetaField::AverageRating => ColumnKind::Float,
            MetaField::RatingNumber => ColumnKind::Integer,
        }
    }

    pub fn column(&self) -> ColumnSpec {
        ColumnSpec::new(self.name(), self.kind())
    }

    /// Parses a list of field names, failing on the first unknown one.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Self>, SchemaError> {
        names.iter().map(|n| n.as_ref().parse()).collect()
    }
}

impl FromStr for MetaField {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .iter()
            .find(|f| f.name() == name)
            .copied()
            .ok_or_else(|| SchemaError::UnknownField {
                dataset: "metadata",
                field: name.to_string(),
                available: join_names(Self::ALL.iter().map(|f| f.name())),
            })
    }
}

impl fmt::Display for MetaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

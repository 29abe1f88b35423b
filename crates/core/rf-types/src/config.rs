//! Request configuration for the filter-and-join transform.

use crate::fields::{MetaField, ReviewField};
use rf_error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// What to read, which columns to keep and whether to join metadata.
///
/// Can be built in code or deserialized from a job file:
///
/// ```yaml
/// review_path: data/All_Beauty.jsonl
/// review_fields: [helpful_vote, timestamp, rating, images, text]
/// meta_path: data/meta_All_Beauty.jsonl
/// meta_fields: [title, store]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRequest {
    /// Line-delimited JSON review file
    pub review_path: String,

    /// Review columns to keep, in output order
    pub review_fields: Vec<ReviewField>,

    /// Line-delimited JSON metadata file; no join without it
    #[serde(default)]
    pub meta_path: Option<String>,

    /// Metadata columns to keep, in output order
    #[serde(default = "default_meta_fields")]
    pub meta_fields: Vec<MetaField>,

    /// Join metadata when `meta_path` is set
    #[serde(default = "default_join_enabled")]
    pub join_enabled: bool,
}

fn default_meta_fields() -> Vec<MetaField> {
    MetaField::DEFAULT.to_vec()
}

fn default_join_enabled() -> bool {
    true
}

impl FilterRequest {
    /// Create a review-only request.
    pub fn new(review_path: impl Into<String>, review_fields: Vec<ReviewField>) -> Self {
        Self {
            review_path: review_path.into(),
            review_fields,
            meta_path: None,
            meta_fields: default_meta_fields(),
            join_enabled: default_join_enabled(),
        }
    }

    /// Set the metadata file to join against.
    pub fn with_metadata(mut self, meta_path: impl Into<String>) -> Self {
        self.meta_path = Some(meta_path.into());
        self
    }

    /// Set the metadata columns to keep.
    pub fn with_meta_fields(mut self, meta_fields: Vec<MetaField>) -> Self {
        self.meta_fields = meta_fields;
        self
    }

    /// Enable or disable the join.
    pub fn with_join(mut self, enabled: bool) -> Self {
        self.join_enabled = enabled;
        self
    }

    /// Metadata path, if the join will run.
    pub fn join_source(&self) -> Option<&str> {
        if self.join_enabled {
            self.meta_path.as_deref()
        } else {
            None
        }
    }

    /// Whether the join will run.
    pub fn will_join(&self) -> bool {
        self.join_source().is_some()
    }

    /// Validate the field lists.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.review_fields.is_empty() {
            return Err(SchemaError::NoFields);
        }
        check_unique(&self.review_fields)?;
        check_unique(&self.meta_fields)?;
        Ok(())
    }
}

fn check_unique<F: Copy + Eq + Hash + ToString>(fields: &[F]) -> Result<(), SchemaError> {
    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        if !seen.insert(*field) {
            return Err(SchemaError::DuplicateField(field.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = FilterRequest::new("reviews.jsonl", vec![ReviewField::Rating]);
        assert_eq!(request.meta_fields, MetaField::DEFAULT.to_vec());
        assert!(request.join_enabled);
        assert!(!request.will_join());
    }

    #[test]
    fn test_join_requires_path_and_flag() {
        let request = FilterRequest::new("reviews.jsonl", vec![ReviewField::Rating])
            .with_metadata("meta.jsonl");
        assert!(request.will_join());
        assert_eq!(request.join_source(), Some("meta.jsonl"));

        let request = request.with_join(false);
        assert!(!request.will_join());
        assert_eq!(request.join_source(), None);
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let request = FilterRequest::new("reviews.jsonl", vec![]);
        assert!(matches!(request.validate(), Err(SchemaError::NoFields)));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let request = FilterRequest::new(
            "reviews.jsonl",
            vec![ReviewField::Rating, ReviewField::Text, ReviewField::Rating],
        );
        match request.validate() {
            Err(SchemaError::DuplicateField(name)) => assert_eq!(name, "rating"),
            other => panic!("Expected DuplicateField, got: {:?}", other),
        }

        let request = FilterRequest::new("reviews.jsonl", vec![ReviewField::Rating])
            .with_meta_fields(vec![MetaField::Store, MetaField::Store]);
        assert!(matches!(
            request.validate(),
            Err(SchemaError::DuplicateField(_))
        ));
    }

    #[test]
    fn test_request_from_yaml() {
        let yaml = r#"
review_path: data\All_Beauty.jsonl
review_fields: [helpful_vote, timestamp, rating]
meta_path: data/meta_All_Beauty.jsonl
meta_fields: [title]
"#;
        let request: FilterRequest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(request.review_path, "data\\All_Beauty.jsonl");
        assert_eq!(
            request.review_fields,
            vec![
                ReviewField::HelpfulVote,
                ReviewField::Timestamp,
                ReviewField::Rating
            ]
        );
        assert_eq!(request.meta_fields, vec![MetaField::Title]);
        assert!(request.join_enabled);
        assert!(request.will_join());
    }

    #[test]
    fn test_request_yaml_defaults() {
        let yaml = "review_path: r.jsonl\nreview_fields: [text]\n";
        let request: FilterRequest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(request.meta_path, None);
        assert_eq!(request.meta_fields.len(), 6);
        assert!(request.join_enabled);
    }

    #[test]
    fn test_request_yaml_unknown_field_name() {
        let yaml = "review_path: r.jsonl\nreview_fields: [stars]\n";
        assert!(serde_yaml::from_str::<FilterRequest>(yaml).is_err());
    }
}

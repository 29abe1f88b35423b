//! Metadata enrichment for reviewflow.
//!
//! Attaches product metadata to review rows:
//! - [`KeyIndex`] - O(1) key lookup from join key to metadata row positions
//! - [`left_join`] - Left-outer join of two Arrow tables on a string key

mod index;
mod join;

pub use index::{key_column, KeyIndex};
pub use join::{left_join, JoinOptions, JoinStats};

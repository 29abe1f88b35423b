//! Record transformation for reviewflow.
//!
//! Turns raw line-delimited JSON records into typed Arrow columns:
//! - [`normalize`] reduces `images` to a flag and `timestamp` to a date triple
//! - [`projection`] keeps only the requested columns, in request order

pub mod normalize;
pub mod projection;

pub use normalize::{date_triple, has_images, DateTriple};
pub use projection::Projection;

//! Data model for the GeoNames postal code dump.
//!
//! A dataset is kept as raw tab-delimited lines; `Column` names the
//! positions inside a line so callers never index fields by bare number.

pub mod record;

pub use record::{Column, Dataset, FIELD_SEPARATOR};

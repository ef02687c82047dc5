//! Dataset download and decoding.
//!
//! This module provides the `DatasetClient`, which downloads the GeoNames
//! postal code archive and returns the lines of one entry inside it.
//! The archive is held in memory; nothing is staged on disk.

pub mod archive;
pub mod client;

pub use archive::extract_lines;
pub use client::{DatasetClient, DatasetSource, DEFAULT_DATASET_URL, DEFAULT_ENTRY_NAME};

//! Local caching module for offline runs.
//!
//! This module provides the `CacheManager`, a disk-backed memoizer: a value
//! computed once under a key is stored as JSON and returned on later calls
//! without recomputing. Entries never expire unless a maximum age is set.

pub mod manager;

pub use manager::{CacheManager, CachedData};

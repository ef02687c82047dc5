//! Core library for geozip.
//!
//! Downloads the GeoNames US postal code archive, memoizes the extracted
//! records on disk and summarizes one column of them.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod summary;

pub use cache::CacheManager;
pub use config::Config;
pub use error::{CacheError, GeozipError, Result};
pub use fetch::{DatasetClient, DatasetSource};
pub use models::{Column, Dataset};
pub use summary::Summary;

/// Key the downloaded dataset is memoized under
pub const CACHE_KEY: &str = "get_zip_codes";

/// Return the dataset from the cache, downloading it on a miss.
/// An entry fetched from a different URL or archive entry counts as a miss.
pub async fn load_dataset(cache: &CacheManager, client: &DatasetClient) -> Result<Dataset> {
    let origin = client.source().origin();
    cache
        .get_or_compute_from(CACHE_KEY, Some(origin.as_str()), || client.fetch())
        .await
}

//! HTTP client for downloading the postal code archive.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use super::extract_lines;
use crate::error::{GeozipError, Result};
use crate::models::Dataset;

/// GeoNames export of all US postal codes
pub const DEFAULT_DATASET_URL: &str = "https://download.geonames.org/export/zip/US.zip";

/// Entry inside the archive holding the records
pub const DEFAULT_ENTRY_NAME: &str = "US.txt";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 120;

const USER_AGENT: &str = concat!("geozip/", env!("CARGO_PKG_VERSION"));

/// Where the dataset lives: archive URL plus the entry to read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    pub url: String,
    pub entry_name: String,
}

impl DatasetSource {
    /// Identifies the data this source yields, e.g.
    /// `https://download.geonames.org/export/zip/US.zip#US.txt`
    pub fn origin(&self) -> String {
        format!("{}#{}", self.url, self.entry_name)
    }
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATASET_URL.to_string(),
            entry_name: DEFAULT_ENTRY_NAME.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct DatasetClient {
    client: Client,
    source: DatasetSource,
}

impl DatasetClient {
    pub fn new(source: DatasetSource) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, source })
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(url: &str, response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(GeozipError::from_status(url, status, &body))
        }
    }

    /// Download the archive and return the lines of the configured entry.
    pub async fn fetch(&self) -> Result<Dataset> {
        let url = &self.source.url;
        info!(url = %url, "Downloading dataset");

        let response = self.client.get(url).send().await?;
        let response = Self::check_response(url, response).await?;
        let archive = response.bytes().await?;
        debug!(bytes = archive.len(), "Archive downloaded");

        extract_lines(&archive, &self.source.entry_name)
    }
}

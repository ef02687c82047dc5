use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeozipError>;

#[derive(Error, Debug)]
pub enum GeozipError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}: {body}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Archive has no entry named {0}")]
    EntryNotFound(String),

    #[error("Entry {entry} is not valid UTF-8: {source}")]
    Encoding {
        entry: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Invalid config at {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Invalid cache key {0:?}")]
    InvalidKey(String),

    #[error("Cache I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode cache entry {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl GeozipError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(url: &str, status: reqwest::StatusCode, body: &str) -> Self {
        GeozipError::HttpStatus {
            url: url.to_string(),
            status,
            body: Self::truncate_body(body),
        }
    }
}

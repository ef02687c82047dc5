use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CacheError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
    /// What the data was computed from, if the caller said
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: Option<&str>) -> Self {
        self.origin = origin.map(str::to_owned);
        self
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        // Negative ages come from clock skew
        if minutes < 1 {
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", (minutes + 30) / 60)
        } else {
            format!("{}d ago", (minutes + 720) / 1440)
        }
    }

    pub fn is_older_than(&self, max_age: Duration) -> bool {
        Utc::now() - self.cached_at > max_age
    }
}

/// Disk-backed memoization: one JSON file per key under `cache_dir`.
pub struct CacheManager {
    cache_dir: PathBuf,
    max_age: Option<Duration>,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir).map_err(|e| CacheError::io(&cache_dir, e))?;
        Ok(Self {
            cache_dir,
            max_age: None,
        })
    }

    /// Treat entries older than `minutes` as missing. None disables expiry.
    pub fn with_max_age_minutes(mut self, minutes: Option<i64>) -> Self {
        self.max_age = minutes.map(Duration::minutes);
        self
    }

    fn validate_key(key: &str) -> std::result::Result<(), CacheError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(())
        } else {
            Err(CacheError::InvalidKey(key.to_string()))
        }
    }

    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Return the value stored under `key`, or run `compute`, store its
    /// result under `key` and return it. Nothing is stored if `compute` fails.
    pub async fn get_or_compute<T, F, Fut>(&self, key: &str, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.get_or_compute_from(key, None, compute).await
    }

    /// Like `get_or_compute`, but the stored entry also records `origin`
    /// and only counts as a hit when it was computed from the same origin.
    pub async fn get_or_compute_from<T, F, Fut>(
        &self,
        key: &str,
        origin: Option<&str>,
        compute: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        Self::validate_key(key)?;

        if let Some(cached) = self.load::<T>(key)? {
            match self.max_age {
                _ if cached.origin.as_deref() != origin => {
                    info!(
                        key,
                        cached_origin = ?cached.origin,
                        origin = ?origin,
                        "Cache entry was computed from a different origin"
                    );
                }
                Some(max_age) if cached.is_older_than(max_age) => {
                    info!(key, age = %cached.age_display(), "Cache entry expired");
                }
                _ => {
                    info!(key, age = %cached.age_display(), "Cache hit");
                    return Ok(cached.data);
                }
            }
        } else {
            info!(key, "Cache miss");
        }

        let data = compute().await?;
        self.save(key, &data, origin)?;
        Ok(data)
    }

    /// Unreadable JSON is reported as a miss so the entry gets rewritten.
    fn load<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> std::result::Result<Option<CachedData<T>>, CacheError> {
        let path = self.cache_path(key);
        let contents = match std::fs::read(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::io(path, e)),
        };

        match serde_json::from_slice(&contents) {
            Ok(cached) => Ok(Some(cached)),
            Err(e) => {
                warn!(key, error = %e, "Discarding unreadable cache entry");
                Ok(None)
            }
        }
    }

    /// Write to a temp file and rename so readers never see a partial entry.
    fn save<T: Serialize>(
        &self,
        key: &str,
        data: &T,
        origin: Option<&str>,
    ) -> std::result::Result<(), CacheError> {
        let cached = CachedData::new(data).with_origin(origin);
        let contents = serde_json::to_vec(&cached).map_err(|source| CacheError::Encode {
            key: key.to_string(),
            source,
        })?;

        let path = self.cache_path(key);
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &contents).map_err(|e| CacheError::io(&tmp_path, e))?;
        std::fs::rename(&tmp_path, &path).map_err(|e| CacheError::io(&path, e))?;

        debug!(key, bytes = contents.len(), path = %path.display(), "Cache entry written");
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        Self::validate_key(key).is_ok() && self.cache_path(key).is_file()
    }

    /// Remove the entry for `key`. Returns whether an entry existed.
    pub fn clear(&self, key: &str) -> Result<bool> {
        Self::validate_key(key)?;
        let path = self.cache_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::io(path, e).into()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

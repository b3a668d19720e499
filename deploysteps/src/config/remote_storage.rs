//! Remote storage options.

use serde::Deserialize;

/// Remote storage adapter and connection options.
///
/// An absent adapter means remote storage must be disabled. Credentials are
/// only usable as a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRemoteStorage")]
pub struct RemoteStorageConfig {
    /// Adapter name, e.g. `aws-s3`.
    pub adapter: Option<String>,
    /// Bucket name.
    pub bucket: String,
    /// Bucket region.
    pub region: String,
    /// Key prefix inside the bucket.
    pub prefix: String,
    /// Access key.
    pub key: Option<String>,
    /// Secret key.
    pub secret: Option<String>,
}

impl RemoteStorageConfig {
    /// Creates a config for `adapter` with no connection options.
    #[must_use]
    pub fn with_adapter(adapter: impl Into<String>) -> Self {
        Self {
            adapter: Some(adapter.into()),
            ..Self::default()
        }
    }

    /// Returns the adapter if one is configured.
    #[must_use]
    pub fn adapter(&self) -> Option<&str> {
        self.adapter.as_deref().filter(|a| !a.is_empty())
    }

    /// Returns `(key, secret)` only when both are non-empty.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let key = self.key.as_deref().filter(|k| !k.is_empty())?;
        let secret = self.secret.as_deref().filter(|s| !s.is_empty())?;
        Some((key, secret))
    }
}

/// The `REMOTE_STORAGE` option as written in configuration:
/// `{"adapter": "...", "config": {"bucket": "...", ...}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRemoteStorage {
    adapter: Option<String>,
    config: RawConnection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConnection {
    bucket: String,
    region: String,
    prefix: String,
    key: Option<String>,
    secret: Option<String>,
}

impl From<RawRemoteStorage> for RemoteStorageConfig {
    fn from(raw: RawRemoteStorage) -> Self {
        Self {
            adapter: raw.adapter.filter(|a| !a.trim().is_empty()),
            bucket: raw.config.bucket,
            region: raw.config.region,
            prefix: raw.config.prefix,
            key: raw.config.key,
            secret: raw.config.secret,
        }
    }
}

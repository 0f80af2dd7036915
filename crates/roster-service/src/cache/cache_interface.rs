//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use roster_core::{Interface, RosterError, RosterResult};
use std::time::Duration;

/// Key/value store with per-entry expiry.
///
/// Values are stored as JSON strings so the trait stays dyn-compatible;
/// typed access goes through [`CacheExt`].
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Gets a raw JSON value.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>>;

    /// Stores a raw JSON value, replacing any previous entry for `key`.
    ///
    /// `None` as `ttl` keeps the entry until it is overwritten.
    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> RosterResult<()>;
}

/// Typed get/set over any [`CacheInterface`].
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Gets a typed value from the cache.
    ///
    /// A stored value that does not decode as `T` fails with
    /// [`RosterError::Cache`].
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> RosterResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => serde_json::from_str(&json).map(Some).map_err(|e| {
                RosterError::Cache(format!("Failed to decode cached key '{}': {}", key, e))
            }),
            None => Ok(None),
        }
    }

    /// Sets a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> RosterResult<()> {
        let json = serde_json::to_string(value).map_err(|e| {
            RosterError::Cache(format!("Failed to encode value for key '{}': {}", key, e))
        })?;
        self.set_raw(key, &json, ttl).await
    }
}

impl<T: CacheInterface + ?Sized> CacheExt for T {}

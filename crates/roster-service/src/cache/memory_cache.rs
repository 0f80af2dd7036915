//! Process-local cache backed by a hash map.

use super::CacheInterface;
use async_trait::async_trait;
use parking_lot::RwLock;
use roster_core::RosterResult;
use shaku::Component;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| now < expires_at)
    }
}

/// In-memory cache with lazy expiry.
///
/// Every read and write is atomic per key; concurrent writers to the same
/// key all succeed and the last one wins.
#[derive(Component, Default)]
#[shaku(interface = CacheInterface)]
pub struct InMemoryCache {
    #[shaku(default)]
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included until they are read.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        let now = Instant::now();

        if let Some(entry) = self.entries.read().get(key) {
            if entry.is_live(now) {
                debug!("Cache hit for key '{}'", key);
                return Ok(Some(entry.value.clone()));
            }
        } else {
            debug!("Cache miss for key '{}'", key);
            return Ok(None);
        }

        // The entry may have been replaced between the two locks.
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
            entries.remove(key);
            debug!("Evicted expired key '{}'", key);
        }
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> RosterResult<()> {
        let entry = CacheEntry {
            value: value.to_string(),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.entries.write().insert(key.to_string(), entry);

        match ttl {
            Some(ttl) => debug!("Cached key '{}' with TTL {}s", key, ttl.as_secs()),
            None => debug!("Cached key '{}' without expiry", key),
        }
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("entries", &self.len())
            .finish()
    }
}

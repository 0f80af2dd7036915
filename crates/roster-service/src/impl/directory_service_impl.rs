//! Cache-aside directory service.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::directory_service::DirectoryService;
use async_trait::async_trait;
use roster_client::UserClient;
use roster_core::{RosterError, RosterResult, User, UserId};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Default lifetime of a cached directory entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Directory service component for Shaku DI.
///
/// Reads go to the cache first. On a miss the remote client is called and a
/// non-empty result is written back with `ttl`.
#[derive(Component)]
#[shaku(interface = DirectoryService)]
pub struct DirectoryServiceComponent {
    #[shaku(inject)]
    client: Arc<dyn UserClient>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = DEFAULT_TTL)]
    ttl: Duration,
}

impl DirectoryServiceComponent {
    /// Creates a directory service over a client and a cache.
    pub fn new(client: Arc<dyn UserClient>, cache: Arc<dyn CacheInterface>, ttl: Duration) -> Self {
        Self { client, cache, ttl }
    }

    async fn load_user(&self, id: UserId, cancel: &CancellationToken) -> RosterResult<Option<User>> {
        let cache_key = cache_keys::user_by_id(id);

        if let Some(cached) = self.cache.get::<User>(&cache_key).await? {
            debug!("Cache hit for user: {}", id);
            return Ok(Some(cached));
        }

        let user = self.client.get_user(id, cancel).await?;
        if let Some(user) = &user {
            self.cache.set(&cache_key, user, Some(self.ttl)).await?;
        }

        Ok(user)
    }

    async fn load_all_users(&self, cancel: &CancellationToken) -> RosterResult<Vec<User>> {
        let cache_key = cache_keys::all_users();

        if let Some(cached) = self.cache.get::<Vec<User>>(&cache_key).await? {
            debug!("Cache hit for all users ({} entries)", cached.len());
            return Ok(cached);
        }

        let users = self.client.list_users(cancel).await?;
        if !users.is_empty() {
            self.cache.set(&cache_key, &users, Some(self.ttl)).await?;
        }

        info!("Fetched {} users from the directory", users.len());
        Ok(users)
    }
}

#[async_trait]
impl DirectoryService for DirectoryServiceComponent {
    async fn get_user_by_id(&self, id: UserId, cancel: &CancellationToken) -> RosterResult<Option<User>> {
        debug!("Getting user: {}", id);

        self.load_user(id, cancel)
            .await
            .map_err(|e| RosterError::with_context(e, format!("Error in getting user id: {}", id)))
    }

    async fn get_all_users(&self, cancel: &CancellationToken) -> RosterResult<Vec<User>> {
        debug!("Getting all users");

        self.load_all_users(cancel)
            .await
            .map_err(|e| RosterError::with_context(e, "Error in getting all users"))
    }
}

impl std::fmt::Debug for DirectoryServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryServiceComponent")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

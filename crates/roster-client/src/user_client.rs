//! Typed user operations over the paginated transport.

use crate::{Paginator, Transport};
use async_trait::async_trait;
use roster_core::{Interface, RosterResult, User, UserId};
use roster_resilience::RetryPolicy;
use shaku::Component;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Remote user-directory operations.
#[async_trait]
pub trait UserClient: Interface + Send + Sync {
    /// Lists every user, following pagination to the last page.
    ///
    /// Never returns `None`-like results: a `null` page `data` reads as an
    /// empty page, so "no data" is an empty vector.
    async fn list_users(&self, cancel: &CancellationToken) -> RosterResult<Vec<User>>;

    /// Gets a user by ID.
    ///
    /// A 404 is an error ([`RosterError::NotFound`](roster_core::RosterError::NotFound));
    /// `Ok(None)` only means the API answered `{"data": null}`.
    async fn get_user(&self, id: UserId, cancel: &CancellationToken) -> RosterResult<Option<User>>;
}

/// HTTP implementation of [`UserClient`].
#[derive(Component)]
#[shaku(interface = UserClient)]
pub struct HttpUserClient {
    #[shaku(inject)]
    transport: Arc<dyn Transport>,
    /// Base URL ending in `/`.
    base_url: String,
    retry_policy: RetryPolicy,
}

impl HttpUserClient {
    /// Creates a new HTTP user client.
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>, retry_policy: RetryPolicy) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            retry_policy,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn paginator(&self) -> Paginator<'_> {
        Paginator::new(self.transport.as_ref(), &self.retry_policy)
    }
}

#[async_trait]
impl UserClient for HttpUserClient {
    async fn list_users(&self, cancel: &CancellationToken) -> RosterResult<Vec<User>> {
        let url = self.url("users");
        debug!("Listing users from {}", url);

        let merged = self.paginator().fetch_merged(&url, true, cancel).await?;
        Ok(serde_json::from_value(merged)?)
    }

    async fn get_user(&self, id: UserId, cancel: &CancellationToken) -> RosterResult<Option<User>> {
        let url = self.url(&format!("users/{}", id));
        debug!("Getting user {} from {}", id, url);

        let data = self.paginator().fetch_merged(&url, false, cancel).await?;
        Ok(serde_json::from_value(data)?)
    }
}

impl std::fmt::Debug for HttpUserClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpUserClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

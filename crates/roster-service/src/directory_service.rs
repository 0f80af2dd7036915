//! Directory service trait definition.

use async_trait::async_trait;
use roster_core::{Interface, RosterResult, User, UserId};
use tokio_util::sync::CancellationToken;

/// Cached access to the user directory.
///
/// Every error from the remote layer comes back wrapped in
/// [`RosterError::Context`](roster_core::RosterError::Context) with the
/// original error kept as its source.
#[async_trait]
pub trait DirectoryService: Interface + Send + Sync {
    /// Gets a user by ID, from the cache when a live entry exists.
    async fn get_user_by_id(&self, id: UserId, cancel: &CancellationToken) -> RosterResult<Option<User>>;

    /// Gets every user, from the cache when a live entry exists.
    async fn get_all_users(&self, cancel: &CancellationToken) -> RosterResult<Vec<User>>;
}

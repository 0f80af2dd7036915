//! User model as served by the directory API.

use serde::{Deserialize, Serialize};

/// Identifier of a user in the remote directory.
pub type UserId = i64;

/// A directory user.
///
/// Immutable value once decoded; field names follow the API's snake_case
/// JSON so the same type round-trips through the wire and the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Avatar image URL.
    pub avatar: String,
}

impl User {
    /// Returns "first last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

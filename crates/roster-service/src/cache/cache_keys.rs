//! Cache key generators for the directory service.

use roster_core::UserId;

/// Key of the full user listing.
#[must_use]
pub fn all_users() -> String {
    "AllUsers".to_string()
}

/// Key of a single user.
#[must_use]
pub fn user_by_id(id: UserId) -> String {
    format!("User:{}", id)
}

//! Console walk-through of the cached directory.

use roster_core::{RosterError, RosterResult, User, UserId};
use roster_service::DirectoryService;
use std::io::Write;
use tokio_util::sync::CancellationToken;

/// User looked up individually by the demo.
pub const DEMO_USER_ID: UserId = 2;

/// Formats one console line for a user.
#[must_use]
pub fn user_line(user: &User) -> String {
    format!("User ID: {}, Name: {} {}", user.id, user.first_name, user.last_name)
}

/// Lists all users and one user, then repeats both lookups from the cache.
pub async fn run_demo<W: Write>(
    service: &dyn DirectoryService,
    cancel: &CancellationToken,
    out: &mut W,
) -> RosterResult<()> {
    for source in ["", " from cache"] {
        writeln!(out, "Fetching all users{}...", source).map_err(io_error)?;
        for user in service.get_all_users(cancel).await? {
            writeln!(out, "{}", user_line(&user)).map_err(io_error)?;
        }
        writeln!(out).map_err(io_error)?;

        writeln!(out, "Fetching details for user with ID {}{}...", DEMO_USER_ID, source)
            .map_err(io_error)?;
        let written = match service.get_user_by_id(DEMO_USER_ID, cancel).await? {
            Some(user) => writeln!(out, "{}", user_line(&user)),
            None => writeln!(out, "User ID: {} was not found", DEMO_USER_ID),
        };
        written.map_err(io_error)?;
        writeln!(out).map_err(io_error)?;
    }

    Ok(())
}

fn io_error(err: std::io::Error) -> RosterError {
    RosterError::internal(format!("Failed to write console output: {}", err))
}

//! Classification of a single attempt.

use roster_core::RosterError;

/// Result of one attempt, as judged by the operation itself.
///
/// Expected transient conditions are a value here, not an error, so the
/// policy can loop on them without unwinding.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The attempt produced a usable value.
    Success(T),
    /// The attempt failed in a way retrying cannot fix.
    Permanent(RosterError),
    /// The attempt failed transiently; the reason is only logged.
    Retryable(String),
}

/// Coarse class of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx.
    Success,
    /// 404.
    NotFound,
    /// 408, 429, 502, 503, 504.
    Transient,
    /// Any other non-2xx status.
    Failure,
}

impl StatusClass {
    /// Classifies an HTTP status code.
    #[must_use]
    pub const fn of(status: u16) -> Self {
        match status {
            200..=299 => Self::Success,
            404 => Self::NotFound,
            408 | 429 | 502 | 503 | 504 => Self::Transient,
            _ => Self::Failure,
        }
    }
}

/// Maps a status and body onto an [`Outcome`].
///
/// `url` names the request in the resulting errors.
pub fn classify<T>(status: u16, body: T, url: &str) -> Outcome<T> {
    match StatusClass::of(status) {
        StatusClass::Success => Outcome::Success(body),
        StatusClass::NotFound => Outcome::Permanent(RosterError::NotFound {
            url: url.to_string(),
        }),
        StatusClass::Transient => Outcome::Retryable(format!("status {}", status)),
        StatusClass::Failure => Outcome::Permanent(RosterError::Api {
            status,
            url: url.to_string(),
        }),
    }
}

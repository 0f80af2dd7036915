//! Unified error types for all layers of the client.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for Roster.
///
/// Callers can tell "resource absent" (`NotFound`) apart from "transient
/// failure retried to exhaustion" (`RetryExhausted`), "permanent API fault"
/// (`Api`) and "cancelled" (`Cancelled`), even when the error reaches them
/// wrapped in a [`RosterError::Context`].
#[derive(Error, Debug)]
pub enum RosterError {
    // ============ Transport Errors ============
    /// Connection-level failure while talking to the remote API
    #[error("Network error: {0}")]
    Network(String),

    // ============ API Errors ============
    /// The API answered 404
    #[error("Resource not found at {url}")]
    NotFound { url: String },

    /// The API answered with a non-success status that is not worth retrying
    #[error("Error in request {url}: status {status}")]
    Api { status: u16, url: String },

    // ============ Resilience Errors ============
    /// A transient failure persisted through every retry
    #[error("Could not get a valid response for GET request {endpoint} after {retries} retries")]
    RetryExhausted { endpoint: String, retries: u32 },

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    // ============ Service Errors ============
    /// A lower-level error annotated with what the caller was doing
    #[error("{message}")]
    Context {
        message: String,
        #[source]
        source: Box<RosterError>,
    },

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RosterError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Network(_) => "NETWORK_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Api { .. } => "API_ERROR",
            Self::RetryExhausted { .. } => "RETRY_EXHAUSTED",
            Self::Cancelled => "CANCELLED",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Context { .. } => "CONTEXTUAL_FAILURE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Wraps an error with an operation-specific message, keeping it as the source.
    #[must_use]
    pub fn with_context<T: Into<String>>(source: Self, message: T) -> Self {
        Self::Context {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns the innermost error of a chain of [`RosterError::Context`] wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::Context { source, .. } = current {
            current = source;
        }
        current
    }

    /// Checks if retrying the whole operation later could succeed.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.root_cause(),
            Self::RetryExhausted { .. } | Self::Network(_)
        )
    }

    /// Checks if the remote resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.root_cause(), Self::NotFound { .. })
    }

    /// Checks if the operation was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.root_cause(), Self::Cancelled)
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

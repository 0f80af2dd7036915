//! # Roster Resilience
//!
//! Resilience patterns for Roster.
//! Provides HTTP outcome classification and a cancellable retry policy
//! with exponential backoff.

pub mod retry;

pub use retry::*;

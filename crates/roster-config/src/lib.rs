//! # Roster Config
//!
//! Configuration management for Roster.
//! Supports layered configuration from files and environment variables,
//! with fail-fast validation of the API settings.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;

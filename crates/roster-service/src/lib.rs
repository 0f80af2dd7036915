//! # Roster Service
//!
//! Cache-aside directory service on top of the remote user client.

pub mod cache;
pub mod directory_service;
pub mod r#impl;

pub use cache::*;
pub use directory_service::*;
pub use r#impl::*;

//! # Roster Core
//!
//! Core types and error definitions shared by every Roster crate.
//! This crate holds the wire models of the user-directory API and the
//! unified error taxonomy that the client, resilience and service layers
//! speak.

pub mod error;
pub mod pagination;
pub mod result;
pub mod user;

pub use error::*;
pub use pagination::*;
pub use result::*;
pub use user::*;

// Re-export shaku for dependency injection
pub use shaku::{module, HasComponent, Interface};

//! Directory service implementations.
//!
//! Trait definitions live in the parent module (`directory_service.rs`).

pub mod directory_service_impl;

pub use directory_service_impl::{
    DirectoryServiceComponent, DirectoryServiceComponentParameters, DEFAULT_TTL,
};

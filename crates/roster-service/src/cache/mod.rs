//! Caching infrastructure for the service layer.
//!
//! Entries are JSON strings with an optional time-to-live. Expired entries
//! are treated as absent and dropped lazily on the next read.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::{InMemoryCache, InMemoryCacheParameters};

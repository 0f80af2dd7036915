//! Response envelopes used by the directory API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a paginated collection.
///
/// `data` is kept opaque here; it is only decoded into typed values once all
/// pages have been merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageEnvelope {
    /// The page number (1-indexed).
    #[serde(default)]
    pub page: u32,
    /// The total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// The items on this page. A missing or `null` array reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<Value>,
}

impl PageEnvelope {
    /// Returns true when another page follows `current_page`.
    #[must_use]
    pub const fn has_more_after(&self, current_page: u32) -> bool {
        current_page < self.total_pages
    }
}

/// Envelope around a single object: `{"data": {...}}` or `{"data": null}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleEnvelope<T> {
    /// The wrapped object, absent when the API reports `null`.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

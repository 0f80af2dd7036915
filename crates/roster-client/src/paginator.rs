//! Walks paginated collections and merges their pages.

use crate::Transport;
use reqwest::Method;
use roster_core::{PageEnvelope, RosterError, RosterResult, SingleEnvelope};
use roster_resilience::{classify, Outcome, RetryPolicy};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

/// Returns `base_url` with its `page` query parameter set to `page`.
///
/// Other query parameters are kept in their original order; any existing
/// `page` pairs are dropped.
pub fn page_url(base_url: &str, page: u32) -> RosterResult<String> {
    let mut url = Url::parse(base_url).map_err(|e| {
        RosterError::configuration(format!("Invalid request url '{}': {}", base_url, e))
    })?;

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair("page", &page.to_string());

    Ok(url.to_string())
}

/// Fetches one or more pages through the retry policy.
///
/// Pages are requested strictly one after the other, in ascending order:
/// the page count is only known once page 1 has arrived.
pub struct Paginator<'a> {
    transport: &'a dyn Transport,
    policy: &'a RetryPolicy,
}

impl<'a> Paginator<'a> {
    /// Creates a paginator over a transport and a retry policy.
    pub fn new(transport: &'a dyn Transport, policy: &'a RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Fetches `base_url` and returns its `data` payload.
    ///
    /// For a single object the `data` value of page 1 is returned as is
    /// (`Value::Null` when absent). For a collection every page's `data`
    /// array is concatenated in page order into one JSON array.
    pub async fn fetch_merged(
        &self,
        base_url: &str,
        wants_collection: bool,
        cancel: &CancellationToken,
    ) -> RosterResult<Value> {
        let mut current_page = 1;
        let body = self.fetch_page(base_url, current_page, cancel).await?;

        if !wants_collection {
            let envelope: SingleEnvelope<Value> = serde_json::from_slice(&body)?;
            return Ok(envelope.data.unwrap_or(Value::Null));
        }

        let mut first: PageEnvelope = serde_json::from_slice(&body)?;
        let total_pages = first.total_pages;
        let mut merged = std::mem::take(&mut first.data);

        while first.has_more_after(current_page) {
            current_page += 1;
            let body = self.fetch_page(base_url, current_page, cancel).await?;
            let envelope: PageEnvelope = serde_json::from_slice(&body)?;
            debug!(
                "Merging page {}/{} of {} ({} items)",
                current_page,
                total_pages,
                base_url,
                envelope.data.len()
            );
            merged.extend(envelope.data);
        }

        Ok(Value::Array(merged))
    }

    async fn fetch_page(
        &self,
        base_url: &str,
        page: u32,
        cancel: &CancellationToken,
    ) -> RosterResult<Vec<u8>> {
        let url = page_url(base_url, page)?;
        let endpoint = url.as_str();
        let transport = self.transport;

        self.policy
            .execute(endpoint, cancel, move || async move {
                match transport.send(Method::GET, endpoint).await {
                    Ok(response) => classify(response.status, response.body, endpoint),
                    Err(RosterError::Network(reason)) => Outcome::Retryable(reason),
                    Err(other) => Outcome::Permanent(other),
                }
            })
            .await
    }
}

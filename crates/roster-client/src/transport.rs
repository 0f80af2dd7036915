//! Single-request HTTP transport.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method};
use roster_core::{Interface, RosterError, RosterResult};
use shaku::Component;
use std::time::Duration;
use tracing::debug;

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response from a status and a body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues exactly one HTTP request.
///
/// Implementations never retry; any non-2xx status is returned as a normal
/// [`RawResponse`]. Only connection-level faults become errors, always
/// [`RosterError::Network`].
#[async_trait]
pub trait Transport: Interface + Send + Sync {
    /// Sends `method` to `url` and returns the status and body.
    async fn send(&self, method: Method, url: &str) -> RosterResult<RawResponse>;
}

/// reqwest-backed transport that authenticates with a static API key.
#[derive(Component)]
#[shaku(interface = Transport)]
pub struct ReqwestTransport {
    /// Shared connection pool.
    client: Client,
    /// Value of the `x-api-key` header.
    api_key: String,
}

impl ReqwestTransport {
    /// Creates a transport with its own connection pool.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> RosterResult<Self> {
        Ok(Self::with_client(Self::build_client(timeout)?, api_key))
    }

    /// Creates a transport around an existing reqwest client.
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }

    /// Builds the reqwest client used by [`ReqwestTransport::new`].
    pub fn build_client(timeout: Duration) -> RosterResult<Client> {
        Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| RosterError::Internal(format!("Failed to create HTTP client: {}", e)))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, method: Method, url: &str) -> RosterResult<RawResponse> {
        debug!("HTTP {} {}", method, url);

        let response = self
            .client
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| RosterError::Network(format!("HTTP error: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| RosterError::Network(format!("Failed to read response body: {}", e)))?;

        debug!("HTTP {} answered {} ({} bytes)", url, status, body.len());
        Ok(RawResponse::new(status, body.to_vec()))
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

//! # Roster Client
//!
//! HTTP access to the user-directory API.
//!
//! The layers stack leaf-first: a [`Transport`] performs exactly one GET,
//! the [`RetryPolicy`](roster_resilience::RetryPolicy) repeats transient
//! failures, the [`Paginator`] walks every page of a collection, and the
//! [`UserClient`] decodes the merged JSON into typed users.

mod paginator;
mod transport;
mod user_client;

#[cfg(test)]
mod testing;

pub use paginator::{page_url, Paginator};
pub use transport::{RawResponse, ReqwestTransport, ReqwestTransportParameters, Transport};
pub use user_client::{HttpUserClient, HttpUserClientParameters, UserClient};

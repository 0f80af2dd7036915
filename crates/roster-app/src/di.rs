//! Dependency injection module using Shaku.
//!
//! `RosterModule` wires the reqwest transport, the HTTP user client, the
//! in-memory cache and the directory service together. Component parameters
//! come from [`AppConfig`].

use roster_client::{
    HttpUserClient, HttpUserClientParameters, ReqwestTransport, ReqwestTransportParameters,
};
use roster_config::{AppConfig, RetryConfig};
use roster_core::{module, HasComponent, RosterResult};
use roster_resilience::RetryPolicy;
use roster_service::{
    CacheInterface, DirectoryService, DirectoryServiceComponent,
    DirectoryServiceComponentParameters, InMemoryCache,
};
use std::sync::Arc;

module! {
    pub RosterModule {
        components = [
            ReqwestTransport,
            HttpUserClient,
            InMemoryCache,
            DirectoryServiceComponent,
        ],
        providers = [],
    }
}

/// Maps the retry settings onto a [`RetryPolicy`].
#[must_use]
pub fn retry_policy(config: &RetryConfig) -> RetryPolicy {
    RetryPolicy {
        max_retries: config.max_retries,
        initial_delay: config.initial_delay(),
        max_delay: config.max_delay(),
        multiplier: config.multiplier,
    }
}

/// Builds the module from a validated configuration.
pub fn build_module(config: &AppConfig) -> RosterResult<Arc<RosterModule>> {
    let client = ReqwestTransport::build_client(config.api.request_timeout())?;

    let module = RosterModule::builder()
        .with_component_parameters::<ReqwestTransport>(ReqwestTransportParameters {
            client,
            api_key: config.api.api_key.clone(),
        })
        .with_component_parameters::<HttpUserClient>(HttpUserClientParameters {
            base_url: config.api.base_url.clone(),
            retry_policy: retry_policy(&config.retry),
        })
        .with_component_parameters::<DirectoryServiceComponent>(
            DirectoryServiceComponentParameters {
                ttl: config.cache.ttl(),
            },
        )
        .build();

    Ok(Arc::new(module))
}

/// Resolves the services the application talks to.
pub trait ServiceResolver {
    /// Returns the cached directory service.
    fn directory_service(&self) -> Arc<dyn DirectoryService>;

    /// Returns the shared cache.
    fn cache(&self) -> Arc<dyn CacheInterface>;
}

impl ServiceResolver for RosterModule {
    fn directory_service(&self) -> Arc<dyn DirectoryService> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }
}

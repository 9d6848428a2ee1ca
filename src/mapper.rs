//! Resolving a single source-control URL to a registry identity, cache-first.

use crate::cache::{IdentityCache, Outcome};
use crate::error::CoreError;
use crate::identity::Identity;
use crate::observability::ObservabilityScope;
use crate::registry_client::RegistryClient;
use std::sync::Arc;

/// Maps source-control URLs to registry identities, consulting [`IdentityCache`] first.
///
/// Holds its collaborators behind `Arc` rather than a borrow so that a mapper can be
/// cloned into a spawned task (see [`crate::dispatcher::TransformationDispatcher`]).
#[derive(Clone)]
pub struct IdentityMapper {
    cache: Arc<IdentityCache>,
    registry: Arc<dyn RegistryClient>,
}

impl IdentityMapper {
    /// Creates a new mapper over a shared cache and registry client.
    pub fn new(cache: Arc<IdentityCache>, registry: Arc<dyn RegistryClient>) -> Self {
        Self { cache, registry }
    }

    /// Resolves the identity for a URL.
    ///
    /// Returns `Ok(None)` if the registry has no identity for the URL (or a cached failure
    /// is still within its TTL — the two are indistinguishable to the caller by design, to
    /// protect a flaky registry from repeated queries). Returns `Err` only when the registry
    /// actually had to be, and was, queried, and that query failed.
    pub async fn map(
        &self,
        url: &str,
        observability: &dyn ObservabilityScope,
    ) -> Result<Option<Identity>, CoreError> {
        match self.cache.lookup(url) {
            Some(Outcome::Success(identity)) => return Ok(identity),
            Some(Outcome::Failure) => return Ok(None),
            None => {}
        }

        match self.registry.lookup_identities(url, observability).await {
            Ok(identities) => {
                let mut sorted: Vec<Identity> = identities.into_iter().collect();
                sorted.sort();
                let selected = sorted.into_iter().next();
                self.cache.store(url, Outcome::Success(selected.clone()));
                Ok(selected)
            }
            Err(source) => {
                self.cache.store(url, Outcome::Failure);
                Err(CoreError::LookupFailure {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }
}

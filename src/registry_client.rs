//! The registry client external collaborator.

use crate::identity::Identity;
use crate::observability::ObservabilityScope;
use async_trait::async_trait;
use std::collections::HashSet;

/// Looks up the identities a registry associates with a source-control URL.
///
/// This crate does not implement a registry client; it only consumes one. A registry
/// may legitimately report more than one identity for a URL (e.g. during a rename window);
/// the [`crate::mapper::IdentityMapper`] resolves that ambiguity deterministically, not
/// this trait.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Looks up the identities registered for `scm_url`.
    ///
    /// Returns an empty set, not an error, when the registry has no record of the URL at
    /// all. An error return means the registry itself could not be queried (network
    /// failure, malformed response, etc.).
    async fn lookup_identities(
        &self,
        scm_url: &str,
        observability: &dyn ObservabilityScope,
    ) -> anyhow::Result<HashSet<Identity>>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// A [`RegistryClient`] that replays a fixed, scripted outcome per URL and counts how
    /// many times each URL was actually queried — the vehicle for asserting cache
    /// idempotence (one query per URL within the TTL) in tests.
    pub struct ScriptedRegistryClient {
        scripts: Mutex<std::collections::HashMap<String, anyhow::Result<HashSet<Identity>>>>,
        call_counts: Mutex<std::collections::HashMap<String, usize>>,
        total_calls: AtomicUsize,
    }

    impl ScriptedRegistryClient {
        pub fn new() -> Self {
            Self {
                scripts: Mutex::new(std::collections::HashMap::new()),
                call_counts: Mutex::new(std::collections::HashMap::new()),
                total_calls: AtomicUsize::new(0),
            }
        }

        pub fn script_success(&self, url: impl Into<String>, identities: impl IntoIterator<Item = Identity>) {
            self.scripts
                .lock()
                .unwrap()
                .insert(url.into(), Ok(identities.into_iter().collect()));
        }

        pub fn script_failure(&self, url: impl Into<String>) {
            self.scripts
                .lock()
                .unwrap()
                .insert(url.into(), Err(anyhow::anyhow!("registry unavailable")));
        }

        pub fn call_count(&self, url: &str) -> usize {
            *self.call_counts.lock().unwrap().get(url).unwrap_or(&0)
        }

        pub fn total_calls(&self) -> usize {
            self.total_calls.load(Ordering::SeqCst)
        }
    }

    impl Default for ScriptedRegistryClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl RegistryClient for ScriptedRegistryClient {
        async fn lookup_identities(
            &self,
            scm_url: &str,
            _observability: &dyn ObservabilityScope,
        ) -> anyhow::Result<HashSet<Identity>> {
            self.total_calls.fetch_add(1, Ordering::SeqCst);
            *self.call_counts.lock().unwrap().entry(scm_url.to_string()).or_insert(0) += 1;

            match self.scripts.lock().unwrap().get(scm_url) {
                Some(Ok(identities)) => Ok(identities.clone()),
                Some(Err(_)) => Err(anyhow::anyhow!("registry unavailable")),
                None => Ok(HashSet::new()),
            }
        }
    }
}

//! Configuration for the registry-aware manifest transformation core.

use crate::mode::TransformationMode;
use std::time::Duration;

/// The TTL applied to both positive and negative [`crate::cache::IdentityCache`] entries
/// when a [`CoreConfig`] does not override it.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// The configuration a caller chooses once, before constructing
/// [`crate::loader::RegistryAwareLoader`].
///
/// There are no per-load overrides: the mode, cache TTL, and network policy are fixed for
/// the lifetime of the decorator, built once per session and threaded by reference rather
/// than re-read per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// The transformation mode chosen by the user.
    pub mode: TransformationMode,
    /// How long an identity cache entry (success or failure) remains valid.
    pub cache_ttl: Duration,
    /// Whether the registry client may be queried at all.
    ///
    /// When `false`, the loader decorator still wraps the underlying loader (so
    /// `reset_cache`/`purge_cache` forwarding behaves identically) but the dispatcher skips
    /// every lookup, leaving all dependencies unchanged. This is distinct from
    /// `TransformationMode::Disabled`, which is a static "do not construct the decorator at
    /// all" choice; `network_allowed = false` is a runtime policy (e.g. offline builds).
    pub network_allowed: bool,
}

impl Default for CoreConfig {
    /// Defaults to [`TransformationMode::Disabled`]: transformation is opt-in, not
    /// opt-out, so a caller that forgets to choose a mode gets the inert behavior rather
    /// than a silently active rewriter.
    fn default() -> Self {
        Self {
            mode: TransformationMode::Disabled,
            cache_ttl: DEFAULT_CACHE_TTL,
            network_allowed: true,
        }
    }
}

impl CoreConfig {
    /// Builds a configuration with the default cache TTL and network access allowed.
    pub fn new(mode: TransformationMode) -> Self {
        Self {
            mode,
            cache_ttl: DEFAULT_CACHE_TTL,
            network_allowed: true,
        }
    }

    /// Returns a copy of this configuration with a different cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Returns a copy of this configuration with network access disabled.
    pub fn offline(mut self) -> Self {
        self.network_allowed = false;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_allow_network_and_use_the_default_ttl() {
        let config = CoreConfig::new(TransformationMode::Swizzle);
        assert!(config.network_allowed);
        assert_eq!(config.cache_ttl, DEFAULT_CACHE_TTL);
    }

    #[test]
    fn offline_disables_network_without_touching_mode() {
        let config = CoreConfig::new(TransformationMode::Identity).offline();
        assert!(!config.network_allowed);
        assert_eq!(config.mode, TransformationMode::Identity);
    }

    #[test]
    fn default_is_disabled_but_online_with_the_default_ttl() {
        let config = CoreConfig::default();
        assert_eq!(config.mode, TransformationMode::Disabled);
        assert!(config.network_allowed);
        assert_eq!(config.cache_ttl, DEFAULT_CACHE_TTL);
    }
}

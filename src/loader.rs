//! The loader decorator: wraps an underlying manifest loader and threads every loaded
//! manifest through the dispatcher and rewriter before returning it.

use crate::cache::IdentityCache;
use crate::config::CoreConfig;
use crate::dispatcher::{ResolvedIdentities, TransformationDispatcher};
use crate::error::CoreError;
use crate::identity::Identity;
use crate::manifest::{Manifest, ManifestLocation, PackageKind};
use crate::mapper::IdentityMapper;
use crate::mode::{Mode, ModeDisabledError, TransformationMode};
use crate::observability::ObservabilityScope;
use crate::registry_client::RegistryClient;
use crate::rewriter::ManifestRewriter;
use async_trait::async_trait;
use semver::Version;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// The identifying parameters of a single manifest load, threaded to the underlying loader
/// unchanged. Everything this core itself needs (dependency list, target list) is produced
/// by the underlying loader, not supplied here.
///
/// This deliberately omits the `identity_resolver`, `dependency_mapper`, `filesystem`, and
/// `delegate_queue` collaborators §6's underlying-loader contract also lists. Those exist so
/// the real manifest parser can recurse into a package's own local dependency manifests
/// while parsing it; this core never recurses and never touches them itself, so a concrete
/// `ManifestLoader` is expected to close over them at construction time (the same way it
/// already closes over its filesystem root and any delegate work queue) rather than receive
/// them again on every `load` call. `ManifestLoadRequest` carries only the parameters this
/// core's own rewrite decisions are keyed on.
#[derive(Debug, Clone)]
pub struct ManifestLoadRequest {
    /// The path to the manifest file on disk.
    pub path: PathBuf,
    /// The minimum tools version the caller expects to interpret this manifest with.
    pub tools_version: Version,
    /// The identity the caller already associates with this package, if any.
    pub identity: Identity,
    /// The kind of package being loaded.
    pub kind: PackageKind,
    /// Where the package is located.
    pub location: ManifestLocation,
    /// The version of the package, if known ahead of load.
    pub version: Option<Version>,
}

/// The three operations this core requires of an underlying manifest loader: load a
/// manifest, and reset/purge whatever cache the loader itself keeps (distinct from, and
/// never touched by, this crate's own [`crate::cache::IdentityCache`]).
#[async_trait]
pub trait ManifestLoader: Send + Sync {
    /// Loads and parses the manifest described by `request`.
    async fn load(
        &self,
        request: &ManifestLoadRequest,
        observability: Arc<dyn ObservabilityScope>,
        cancellation: &CancellationToken,
    ) -> anyhow::Result<Manifest>;

    /// Resets whatever cache the underlying loader keeps of its own.
    async fn reset_cache(&self, observability: Arc<dyn ObservabilityScope>);

    /// Purges whatever cache the underlying loader keeps of its own.
    async fn purge_cache(&self, observability: Arc<dyn ObservabilityScope>);
}

/// Decorates an underlying [`ManifestLoader`], rewriting every manifest it produces so that
/// source-control and registry declarations of the same logical package converge on a
/// single identity.
///
/// Constructed once per workspace session; the identity cache inside `mapper` lives for
/// this decorator's lifetime and is shared across every `load` call, since one loader
/// instance wraps one session rather than being rebuilt per call.
pub struct RegistryAwareLoader {
    underlying: Arc<dyn ManifestLoader>,
    mapper: IdentityMapper,
    mode: Mode,
    network_allowed: bool,
}

impl RegistryAwareLoader {
    /// Wraps `underlying` with registry-aware transformation.
    ///
    /// Returns [`ModeDisabledError`] if `mode` is [`TransformationMode::Disabled`]: callers
    /// are expected to bypass this decorator entirely in that case, not construct it.
    ///
    /// Network access is allowed by default; use [`Self::from_config`] to build a loader
    /// from a [`CoreConfig`] that also controls the cache TTL and offline behavior.
    pub fn new(
        underlying: Arc<dyn ManifestLoader>,
        mapper: IdentityMapper,
        mode: TransformationMode,
    ) -> Result<Self, ModeDisabledError> {
        Ok(Self {
            underlying,
            mapper,
            mode: Mode::try_from(mode)?,
            network_allowed: true,
        })
    }

    /// Builds a loader from a [`CoreConfig`], sizing the identity cache's TTL from
    /// [`CoreConfig::cache_ttl`] and honoring [`CoreConfig::network_allowed`].
    ///
    /// When `config.network_allowed` is `false`, [`Self::load`] still delegates to
    /// `underlying` and still returns a manifest, but the dispatcher is never invoked: every
    /// dependency is left exactly as the underlying loader produced it, per §10.3's
    /// "offline builds" policy — distinct from [`TransformationMode::Disabled`], which
    /// refuses construction altogether.
    pub fn from_config(
        underlying: Arc<dyn ManifestLoader>,
        registry: Arc<dyn RegistryClient>,
        config: CoreConfig,
    ) -> Result<Self, ModeDisabledError> {
        let cache = Arc::new(IdentityCache::with_ttl(config.cache_ttl));
        let mapper = IdentityMapper::new(cache, registry);
        Ok(Self {
            underlying,
            mapper,
            mode: Mode::try_from(config.mode)?,
            network_allowed: config.network_allowed,
        })
    }

    /// Returns the resolved [`Mode`] this decorator was constructed with.
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

#[async_trait]
impl ManifestLoader for RegistryAwareLoader {
    async fn load(
        &self,
        request: &ManifestLoadRequest,
        observability: Arc<dyn ObservabilityScope>,
        cancellation: &CancellationToken,
    ) -> anyhow::Result<Manifest> {
        let manifest = self
            .underlying
            .load(request, observability.clone(), cancellation)
            .await
            .map_err(CoreError::UnderlyingLoader)?;

        if cancellation.is_cancelled() {
            return Err(CoreError::Cancelled.into());
        }

        let resolved = if self.network_allowed {
            let dispatcher = TransformationDispatcher::new(self.mapper.clone(), observability.clone());
            dispatcher.dispatch(&manifest, cancellation).await?
        } else {
            ResolvedIdentities::new()
        };

        if cancellation.is_cancelled() {
            return Err(CoreError::Cancelled.into());
        }

        let rewritten = ManifestRewriter::rewrite(&manifest, &resolved, self.mode, observability.as_ref())?;
        Ok(rewritten)
    }

    async fn reset_cache(&self, observability: Arc<dyn ObservabilityScope>) {
        // The identity cache is workspace-scoped state, not manifest-content-derived, so it
        // is deliberately *not* cleared here; only the underlying loader's own cache is.
        self.underlying.reset_cache(observability).await;
    }

    async fn purge_cache(&self, observability: Arc<dyn ObservabilityScope>) {
        self.underlying.purge_cache(observability).await;
    }
}

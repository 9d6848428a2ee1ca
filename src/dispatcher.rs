//! Fanning out one identity lookup per eligible dependency and gathering the results.

use crate::dependency::Dependency;
use crate::error::CoreError;
use crate::identity::Identity;
use crate::manifest::Manifest;
use crate::mapper::IdentityMapper;
use crate::observability::ObservabilityScope;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A mapping from a dependency's position in the manifest's dependency list to the
/// registry identity it should be rewritten to.
///
/// Only positions where a rewrite should occur are present; everything else is left alone
/// by [`crate::rewriter::ManifestRewriter`].
pub type ResolvedIdentities = HashMap<usize, Identity>;

/// Dispatches one identity lookup per eligible dependency in parallel.
pub struct TransformationDispatcher {
    mapper: IdentityMapper,
    observability: Arc<dyn ObservabilityScope>,
}

/// Cancels a [`CancellationToken`] when dropped, regardless of why the enclosing scope
/// exited. This is what makes fan-out here *structured* concurrency: if [`Self::dispatch`]
/// is itself dropped before it finishes awaiting every child task (because the caller's own
/// task was cancelled), this guard cancels every still-running child on the way out.
struct CancelChildrenOnDrop(CancellationToken);

impl Drop for CancelChildrenOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

impl TransformationDispatcher {
    /// Creates a new dispatcher over a mapper and an observability sink.
    pub fn new(mapper: IdentityMapper, observability: Arc<dyn ObservabilityScope>) -> Self {
        Self { mapper, observability }
    }

    /// Resolves an identity for every eligible dependency of `manifest`.
    ///
    /// A dependency is eligible when it is a [`Dependency::SourceControl`] with a remote
    /// location. Lookup failures are absorbed here: a warning is emitted and that
    /// dependency is simply absent from the returned map, so the overall load never fails
    /// because one registry query failed.
    pub async fn dispatch(
        &self,
        manifest: &Manifest,
        parent_cancellation: &CancellationToken,
    ) -> Result<ResolvedIdentities, CoreError> {
        let cancellation = parent_cancellation.child_token();
        let _cancel_children_on_drop = CancelChildrenOnDrop(cancellation.clone());

        let mut tasks = FuturesUnordered::new();
        for (index, dependency) in manifest.dependencies.iter().enumerate() {
            let url = match dependency {
                Dependency::SourceControl(dep) => dep.remote_url().map(ToString::to_string),
                _ => None,
            };
            let Some(url) = url else {
                continue;
            };

            let mapper = self.mapper.clone();
            let observability = self.observability.clone();
            let task_cancellation = cancellation.clone();
            tasks.push(tokio::spawn(async move {
                tokio::select! {
                    biased;
                    _ = task_cancellation.cancelled() => (index, url, Err(CoreError::Cancelled)),
                    result = mapper.map(&url, observability.as_ref()) => (index, url, result),
                }
            }));
        }

        let mut resolved = ResolvedIdentities::new();
        while let Some(joined) = tasks.next().await {
            let (index, _url, result) = joined.map_err(|join_err| {
                CoreError::InternalInvariant(format!("identity lookup task panicked: {join_err}"))
            })?;

            match result {
                Ok(Some(identity)) => {
                    resolved.insert(index, identity);
                }
                Ok(None) => {}
                Err(CoreError::LookupFailure { url, source }) => {
                    self.observability.warning(
                        &format!("failed querying registry identity for '{url}'"),
                        Some(&source),
                    );
                }
                Err(CoreError::Cancelled) => return Err(CoreError::Cancelled),
                Err(other) => return Err(other),
            }
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cache::IdentityCache;
    use crate::dependency::{Location, OpaqueDependency, ProductFilter, SourceControlDependency};
    use crate::identity::Identity;
    use crate::manifest::{Manifest, ManifestLocation, PackageKind};
    use crate::observability::test_support::RecordingObservability;
    use crate::registry_client::test_support::ScriptedRegistryClient;
    use crate::requirement::Requirement;
    use crate::target::TargetDescription;
    use semver::Version;

    fn source_control_dep(name: &str, url: &str) -> Dependency {
        Dependency::SourceControl(SourceControlDependency {
            identity: Identity::new(name),
            declared_name: name.to_string(),
            location: Location::Remote(url::Url::parse(url).unwrap()),
            requirement: Requirement::Exact(Version::new(1, 0, 0)),
            product_filter: ProductFilter::Everything,
            traits: Vec::new(),
        })
    }

    fn manifest_with(dependencies: Vec<Dependency>) -> Manifest {
        Manifest {
            display_name: "root".into(),
            identity: Identity::new("root"),
            path: "/workspace/Package.toml".into(),
            kind: PackageKind::Root,
            location: ManifestLocation::Root,
            platforms: Vec::new(),
            version: None,
            revision: None,
            tools_version: Version::new(5, 9, 0),
            dependencies,
            products: Vec::new(),
            targets: Vec::<TargetDescription>::new(),
            traits: Vec::new(),
            default_localization: None,
            c_language_standard: None,
            cxx_language_standard: None,
            pkg_config_name: None,
        }
    }

    #[tokio::test]
    async fn resolves_only_eligible_dependencies() {
        let registry = Arc::new(ScriptedRegistryClient::new());
        registry.script_success("https://example.com/a", [Identity::new("a.pkg")]);
        let cache = Arc::new(IdentityCache::new());
        let mapper = IdentityMapper::new(cache, registry);
        let observability: Arc<dyn ObservabilityScope> = Arc::new(RecordingObservability::default());
        let dispatcher = TransformationDispatcher::new(mapper, observability);

        let manifest = manifest_with(vec![
            source_control_dep("a", "https://example.com/a"),
            Dependency::Other(OpaqueDependency {
                declared_name: "local".into(),
                payload: serde_json::Value::Null,
            }),
        ]);

        let resolved = dispatcher.dispatch(&manifest, &CancellationToken::new()).await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.get(&0), Some(&Identity::new("a.pkg")));
    }

    #[tokio::test]
    async fn partial_failure_does_not_fail_the_dispatch() {
        let registry = Arc::new(ScriptedRegistryClient::new());
        registry.script_success("https://example.com/a", [Identity::new("a.pkg")]);
        registry.script_failure("https://example.com/b");
        let cache = Arc::new(IdentityCache::new());
        let mapper = IdentityMapper::new(cache, registry);
        let observability = Arc::new(RecordingObservability::default());
        let dispatcher =
            TransformationDispatcher::new(mapper, observability.clone() as Arc<dyn ObservabilityScope>);

        let manifest = manifest_with(vec![
            source_control_dep("a", "https://example.com/a"),
            source_control_dep("b", "https://example.com/b"),
        ]);

        let resolved = dispatcher.dispatch(&manifest, &CancellationToken::new()).await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.get(&0), Some(&Identity::new("a.pkg")));
        assert!(resolved.get(&1).is_none());
        assert_eq!(observability.warnings.lock().unwrap().len(), 1);
        assert!(observability.warnings.lock().unwrap()[0].contains("https://example.com/b"));
    }

    #[tokio::test]
    async fn a_cancelled_token_fails_the_dispatch_and_commits_no_partial_result() {
        let registry = Arc::new(ScriptedRegistryClient::new());
        registry.script_success("https://example.com/a", [Identity::new("a.pkg")]);
        let cache = Arc::new(IdentityCache::new());
        let mapper = IdentityMapper::new(cache, registry.clone());
        let observability: Arc<dyn ObservabilityScope> = Arc::new(RecordingObservability::default());
        let dispatcher = TransformationDispatcher::new(mapper, observability);

        let manifest = manifest_with(vec![source_control_dep("a", "https://example.com/a")]);

        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let result = dispatcher.dispatch(&manifest, &cancellation).await;
        assert!(matches!(result, Err(CoreError::Cancelled)));
    }
}

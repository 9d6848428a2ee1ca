//! Applying a resolved identity mapping to a manifest: the field-by-field reconstruction
//! and cross-reference rewriting that dominates this crate's size.

use crate::dependency::{Dependency, RegistryDependency, SourceControlDependency};
use crate::dispatcher::ResolvedIdentities;
use crate::error::CoreError;
use crate::identity::Identity;
use crate::manifest::Manifest;
use crate::mode::Mode;
use crate::observability::ObservabilityScope;
use crate::target::{TargetDependency, TargetDescription};
use std::collections::HashMap;

/// Rewrites a manifest's dependency list and target-dependency cross-references according
/// to a [`Mode`] and the identities a [`crate::dispatcher::TransformationDispatcher`]
/// resolved.
pub struct ManifestRewriter;

impl ManifestRewriter {
    /// Produces a new manifest from `manifest`, rewriting dependencies at the positions
    /// named in `resolved` per `mode`, then propagating any declared-name change into
    /// target-dependency cross-references. `manifest` itself is left untouched.
    pub fn rewrite(
        manifest: &Manifest,
        resolved: &ResolvedIdentities,
        mode: Mode,
        observability: &dyn ObservabilityScope,
    ) -> Result<Manifest, CoreError> {
        if resolved.is_empty() {
            return Ok(manifest.clone());
        }

        let mut cross_references: HashMap<String, String> = HashMap::new();
        let mut dependencies = Vec::with_capacity(manifest.dependencies.len());

        for (index, dependency) in manifest.dependencies.iter().enumerate() {
            match resolved.get(&index) {
                None => dependencies.push(dependency.clone()),
                Some(identity) => {
                    let declared_name = dependency.declared_name().to_string();
                    let scm = match dependency {
                        Dependency::SourceControl(scm) if scm.remote_url().is_some() => scm,
                        _ => {
                            return Err(CoreError::InternalInvariant(format!(
                                "dispatcher assigned identity '{identity}' to a dependency at \
                                 index {index} that is not an eligible source-control dependency"
                            )))
                        }
                    };

                    dependencies.push(Self::rewrite_dependency(
                        scm,
                        &declared_name,
                        identity,
                        mode,
                        &mut cross_references,
                        observability,
                    )?);
                }
            }
        }

        let targets = if cross_references.is_empty() {
            manifest.targets.clone()
        } else {
            manifest
                .targets
                .iter()
                .map(|target| Self::rewrite_target(target, &cross_references))
                .collect()
        };

        Ok(manifest.with_dependencies_and_targets(dependencies, targets))
    }

    fn rewrite_dependency(
        scm: &SourceControlDependency,
        declared_name: &str,
        identity: &Identity,
        mode: Mode,
        cross_references: &mut HashMap<String, String>,
        observability: &dyn ObservabilityScope,
    ) -> Result<Dependency, CoreError> {
        let location = &scm.location;

        if mode == Mode::Swizzle && scm.requirement.is_registry_representable() {
            let requirement = scm.requirement.to_registry_requirement().ok_or_else(|| {
                CoreError::InternalInvariant(format!(
                    "requirement '{req}' was reported representable but did not convert",
                    req = scm.requirement
                ))
            })?;

            observability.info(&format!(
                "swizzling '{location}' with registry dependency '{identity}'."
            ));

            cross_references.insert(declared_name.to_lowercase(), identity.canonical_string().to_string());

            return Ok(Dependency::Registry(RegistryDependency {
                identity: identity.clone(),
                requirement,
                product_filter: scm.product_filter.clone(),
                traits: scm.traits.clone(),
            }));
        }

        // `Mode::Identity`, or `Mode::Swizzle` with a branch/revision requirement that
        // falls back to an identity-only rewrite (no cross-reference recorded).
        observability.info(&format!("adjusting '{location}' identity to registry identity of '{identity}'."));

        Ok(Dependency::SourceControl(SourceControlDependency {
            identity: identity.clone(),
            ..scm.clone()
        }))
    }

    fn rewrite_target(
        target: &TargetDescription,
        cross_references: &HashMap<String, String>,
    ) -> TargetDescription {
        let dependencies = target
            .dependencies
            .iter()
            .map(|dependency| Self::rewrite_target_dependency(dependency, cross_references))
            .collect();

        TargetDescription {
            name: target.name.clone(),
            dependencies,
        }
    }

    fn rewrite_target_dependency(
        dependency: &TargetDependency,
        cross_references: &HashMap<String, String>,
    ) -> TargetDependency {
        match dependency {
            TargetDependency::Product {
                name,
                package_name,
                module_aliases,
                condition,
            } => {
                let mapped = package_name
                    .as_ref()
                    .and_then(|package_name| cross_references.get(&package_name.to_lowercase()));

                match mapped {
                    Some(mapped) => TargetDependency::Product {
                        name: name.clone(),
                        package_name: Some(mapped.clone()),
                        module_aliases: module_aliases.clone(),
                        condition: condition.clone(),
                    },
                    None => dependency.clone(),
                }
            }
            TargetDependency::ByName { name, condition } => {
                match cross_references.get(&name.to_lowercase()) {
                    Some(mapped) => TargetDependency::Product {
                        name: name.clone(),
                        package_name: Some(mapped.clone()),
                        module_aliases: HashMap::new(),
                        condition: condition.clone(),
                    },
                    None => dependency.clone(),
                }
            }
            TargetDependency::Target { .. } => dependency.clone(),
        }
    }
}

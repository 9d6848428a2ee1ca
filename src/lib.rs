//! Registry-aware manifest transformation for a package workspace.
//!
//! Given a parsed package manifest whose dependency list mixes source-control (VCS URL)
//! and registry (scoped identifier) origins, this crate resolves the ambiguous identities
//! by consulting an authoritative registry, caches the results, and rewrites the manifest
//! so that two declarations of the same logical package converge on a single identity.
//!
//! This crate owns the decision logic only. The manifest parser/loader, the registry
//! client, archive download and filesystem management, the package graph resolver, and the
//! CLI front-end are all external collaborators, reached only through the traits in
//! [`loader`] and [`registry_client`].

#![deny(missing_docs)]

pub mod cache;
pub mod config;
pub mod dependency;
pub mod dispatcher;
pub mod error;
pub mod identity;
pub mod loader;
pub mod manifest;
pub mod mapper;
pub mod mode;
pub mod observability;
pub mod registry_client;
pub mod requirement;
pub mod rewriter;
pub mod target;

pub use cache::IdentityCache;
pub use config::CoreConfig;
pub use dependency::{Dependency, Location, OpaqueDependency, ProductFilter, RegistryDependency, SourceControlDependency, TraitDescription};
pub use dispatcher::{ResolvedIdentities, TransformationDispatcher};
pub use error::{CoreError, Result};
pub use identity::Identity;
pub use loader::{ManifestLoadRequest, ManifestLoader, RegistryAwareLoader};
pub use manifest::{Manifest, ManifestLocation, PackageKind, PackageTraitDescription, PlatformRequirement, ProductDescription};
pub use mapper::IdentityMapper;
pub use mode::{Mode, ModeDisabledError, TransformationMode};
pub use observability::{LogObservability, ObservabilityScope};
pub use registry_client::RegistryClient;
pub use requirement::Requirement;
pub use rewriter::ManifestRewriter;
pub use target::{Condition, TargetDependency, TargetDescription};

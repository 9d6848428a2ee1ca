//! Dependency declarations as they appear in a manifest's dependency list.

use crate::identity::Identity;
use crate::requirement::Requirement;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Where a source-control dependency's content is fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    /// A path on the local filesystem. Never eligible for transformation.
    Local(std::path::PathBuf),
    /// A remote VCS URL. Eligible for transformation.
    Remote(Url),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{path}", path = path.display()),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// Which products of a dependency are usable by the depending target.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProductFilter {
    /// No products may be used (the dependency exists only to be cloned/fetched).
    Nothing,
    /// All products may be used.
    #[default]
    Everything,
    /// Only the named products may be used.
    Specific(Vec<String>),
}

/// A single declared trait of a dependency (the package-manager feature-flag concept,
/// not a Rust trait). Carried through opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitDescription {
    /// The name of the trait.
    pub name: String,
    /// The other traits of this same dependency that this trait implies.
    pub enables: Vec<String>,
}

/// A dependency resolved from a component registry by package id and version requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDependency {
    /// The canonical identity of the package.
    pub identity: Identity,
    /// The version requirement.
    pub requirement: Requirement,
    /// Which products of the dependency may be used.
    pub product_filter: ProductFilter,
    /// The declared traits to enable on this dependency.
    pub traits: Vec<TraitDescription>,
}

/// A dependency resolved by cloning a VCS location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceControlDependency {
    /// The canonical identity of the package, if already known.
    ///
    /// For a freshly-parsed manifest this is typically derived from the URL and may not
    /// match the registry's canonical identity; that is precisely the ambiguity this
    /// crate resolves.
    pub identity: Identity,
    /// The package name as declared in the manifest (used for cross-reference matching).
    pub declared_name: String,
    /// Where the dependency is fetched from.
    pub location: Location,
    /// The version requirement.
    pub requirement: Requirement,
    /// Which products of the dependency may be used.
    pub product_filter: ProductFilter,
    /// The declared traits to enable on this dependency.
    pub traits: Vec<TraitDescription>,
}

impl SourceControlDependency {
    /// Returns the remote URL this dependency is eligible for transformation on,
    /// or `None` if it is a local path dependency.
    pub fn remote_url(&self) -> Option<&Url> {
        match &self.location {
            Location::Remote(url) => Some(url),
            Location::Local(_) => None,
        }
    }
}

/// A dependency declaration in a manifest's dependency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dependency {
    /// Resolved by cloning a VCS location.
    SourceControl(SourceControlDependency),
    /// Resolved by fetching a named package at a version from a registry.
    Registry(RegistryDependency),
    /// Any other dependency kind (e.g. plain local filesystem); passed through unchanged.
    Other(OpaqueDependency),
}

/// A dependency kind this crate does not interpret, carried through bit-for-bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpaqueDependency {
    /// The declared name of the dependency, used for cross-reference matching.
    pub declared_name: String,
    /// The opaque payload, stored verbatim.
    pub payload: serde_json::Value,
}

impl Dependency {
    /// Returns the declared name used to match target-dependency cross-references,
    /// if this dependency kind carries one.
    pub fn declared_name(&self) -> &str {
        match self {
            Self::SourceControl(dep) => &dep.declared_name,
            Self::Registry(_) => "",
            Self::Other(dep) => &dep.declared_name,
        }
    }
}

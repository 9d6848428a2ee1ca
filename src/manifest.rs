//! The parsed package manifest this crate rewrites.

use crate::dependency::Dependency;
use crate::target::TargetDescription;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Where the manifest's own package is located.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManifestLocation {
    /// The package being built directly by the workspace (the root package).
    Root,
    /// A package fetched from source control.
    SourceControl(Url),
    /// A package fetched from a registry.
    Registry,
    /// A package referenced by a local filesystem path.
    Local(PathBuf),
}

/// The kind of package this manifest describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageKind {
    /// The root package of the workspace.
    Root,
    /// A dependency fetched from source control.
    SourceControl,
    /// A dependency fetched from a registry.
    Registry,
    /// A dependency referenced by a local filesystem path.
    FileSystem,
}

/// A single supported-platform requirement declared by the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformRequirement {
    /// The name of the platform (e.g. `"macos"`, `"linux"`).
    pub platform: String,
    /// The minimum version of the platform required.
    pub minimum_version: Option<String>,
}

/// A declared product (library/executable) of the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescription {
    /// The name of the product.
    pub name: String,
    /// The names of the targets that make up this product.
    pub targets: Vec<String>,
}

/// A trait (feature flag) declared by the package itself, as opposed to one enabled on a
/// dependency. Opaque to the rewriter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageTraitDescription {
    /// The name of the trait.
    pub name: String,
    /// A human-readable description of the trait.
    pub description: Option<String>,
}

/// A fully parsed package manifest.
///
/// All fields other than [`Manifest::dependencies`] and [`Manifest::targets`] are treated
/// as opaque carry-through data by the rewriter: they are never inspected and are copied
/// by value into the rewritten manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// The display name of the package.
    pub display_name: String,
    /// The canonical identity of the package itself.
    pub identity: crate::identity::Identity,
    /// The path to the manifest file on disk.
    pub path: PathBuf,
    /// The kind of package this manifest describes.
    pub kind: PackageKind,
    /// Where the package is located.
    pub location: ManifestLocation,
    /// The platforms the package declares support for.
    pub platforms: Vec<PlatformRequirement>,
    /// The version of the package, if it has one (registry and source-control packages do;
    /// the root package of a workspace typically does not).
    pub version: Option<Version>,
    /// The source-control revision the manifest was resolved at, if applicable.
    pub revision: Option<String>,
    /// The minimum tools version required to interpret this manifest.
    pub tools_version: Version,
    /// The package's dependencies.
    pub dependencies: Vec<Dependency>,
    /// The package's declared products.
    pub products: Vec<ProductDescription>,
    /// The package's build targets.
    pub targets: Vec<TargetDescription>,
    /// The traits (feature flags) the package itself declares.
    pub traits: Vec<PackageTraitDescription>,
    /// The default localization of package-level string resources, if any.
    pub default_localization: Option<String>,
    /// The C language standard the package's C targets are built with, if any.
    pub c_language_standard: Option<String>,
    /// The C++ language standard the package's C++ targets are built with, if any.
    pub cxx_language_standard: Option<String>,
    /// The `pkg-config` name used to look up system library dependencies, if any.
    pub pkg_config_name: Option<String>,
}

impl Manifest {
    /// Builds a new manifest from this one with its dependency and target lists replaced.
    ///
    /// Every other field is carried through by value. Centralizing reconstruction here
    /// keeps every rewrite site from having to enumerate all ~20 fields and risking one
    /// being forgotten as the schema grows.
    pub fn with_dependencies_and_targets(
        &self,
        dependencies: Vec<Dependency>,
        targets: Vec<TargetDescription>,
    ) -> Manifest {
        Manifest {
            display_name: self.display_name.clone(),
            identity: self.identity.clone(),
            path: self.path.clone(),
            kind: self.kind,
            location: self.location.clone(),
            platforms: self.platforms.clone(),
            version: self.version.clone(),
            revision: self.revision.clone(),
            tools_version: self.tools_version.clone(),
            dependencies,
            products: self.products.clone(),
            targets,
            traits: self.traits.clone(),
            default_localization: self.default_localization.clone(),
            c_language_standard: self.c_language_standard.clone(),
            cxx_language_standard: self.cxx_language_standard.clone(),
            pkg_config_name: self.pkg_config_name.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::identity::Identity;

    fn empty_manifest() -> Manifest {
        Manifest {
            display_name: "root".into(),
            identity: Identity::new("root"),
            path: PathBuf::from("/workspace/Package.toml"),
            kind: PackageKind::Root,
            location: ManifestLocation::Root,
            platforms: Vec::new(),
            version: None,
            revision: None,
            tools_version: Version::new(5, 9, 0),
            dependencies: Vec::new(),
            products: Vec::new(),
            targets: Vec::new(),
            traits: Vec::new(),
            default_localization: None,
            c_language_standard: None,
            cxx_language_standard: None,
            pkg_config_name: None,
        }
    }

    #[test]
    fn with_dependencies_and_targets_preserves_other_fields() {
        let original = empty_manifest();
        let rewritten = original.with_dependencies_and_targets(Vec::new(), Vec::new());
        assert_eq!(original.display_name, rewritten.display_name);
        assert_eq!(original.identity, rewritten.identity);
        assert_eq!(original.tools_version, rewritten.tools_version);
        assert_eq!(original.kind, rewritten.kind);
    }
}

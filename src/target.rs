//! Target descriptions and the target-dependency cross-references inside them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A build condition attached to a target-dependency item (e.g. a platform filter).
///
/// Opaque to this crate; carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Condition {
    /// The platform names this dependency item is restricted to, if any.
    pub platforms: Vec<String>,
}

/// A single entry of a target's `dependencies` list.
///
/// Only [`TargetDependency::Product`] and [`TargetDependency::ByName`] carry a
/// cross-reference to a declaring package name that the rewriter may need to update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetDependency {
    /// A reference to a specific product of a specific (or inferred) package.
    Product {
        /// The name of the product.
        name: String,
        /// The name of the package that declares the product.
        ///
        /// `None` means the package is inferred from `name` alone.
        package_name: Option<String>,
        /// Module name aliases applied when importing this product.
        module_aliases: HashMap<String, String>,
        /// The build condition for this dependency item.
        condition: Condition,
    },
    /// A reference to a dependency by name alone, with the package inferred.
    ByName {
        /// The name used to look up the dependency.
        name: String,
        /// The build condition for this dependency item.
        condition: Condition,
    },
    /// A reference to another target in the same manifest. Never mutated by the rewriter.
    Target {
        /// The name of the other target.
        name: String,
        /// The build condition for this dependency item.
        condition: Condition,
    },
}

/// A single build target in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescription {
    /// The name of the target.
    pub name: String,
    /// The target's dependency list.
    pub dependencies: Vec<TargetDependency>,
}

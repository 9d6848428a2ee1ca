//! Version requirement variants shared by source-control and registry dependencies.

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A version requirement as declared on a dependency.
///
/// Source-control dependencies may pin a branch or a revision, neither of
/// which has a registry equivalent; registry dependencies can only ever
/// carry [`Requirement::Exact`] or [`Requirement::Range`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    /// A single, exact version.
    Exact(Version),
    /// A half-open version interval `[lo, hi)`.
    Range(Version, Version),
    /// A VCS branch name. Not representable in a registry dependency.
    Branch(String),
    /// A VCS revision id. Not representable in a registry dependency.
    Revision(String),
}

impl Requirement {
    /// Returns `true` if this requirement can be carried by a registry dependency.
    pub fn is_registry_representable(&self) -> bool {
        matches!(self, Self::Exact(_) | Self::Range(_, _))
    }

    /// Converts a source-control requirement into its registry-dependency equivalent.
    ///
    /// Returns `None` for [`Requirement::Branch`] and [`Requirement::Revision`]; callers
    /// are expected to have already checked [`Self::is_registry_representable`] and treat
    /// a `None` here as an internal invariant violation, not a recoverable case.
    pub fn to_registry_requirement(&self) -> Option<Requirement> {
        match self {
            Self::Exact(v) => Some(Self::Exact(v.clone())),
            Self::Range(lo, hi) => Some(Self::Range(lo.clone(), hi.clone())),
            Self::Branch(_) | Self::Revision(_) => None,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(v) => write!(f, "{v}"),
            Self::Range(lo, hi) => write!(f, "{lo}..<{hi}"),
            Self::Branch(name) => write!(f, "branch:{name}"),
            Self::Revision(id) => write!(f, "revision:{id}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn exact_and_range_convert() {
        assert_eq!(
            Requirement::Exact(v("2.0.0")).to_registry_requirement(),
            Some(Requirement::Exact(v("2.0.0")))
        );
        assert_eq!(
            Requirement::Range(v("1.0.0"), v("2.0.0")).to_registry_requirement(),
            Some(Requirement::Range(v("1.0.0"), v("2.0.0")))
        );
    }

    #[test]
    fn branch_and_revision_do_not_convert() {
        assert_eq!(Requirement::Branch("main".into()).to_registry_requirement(), None);
        assert_eq!(Requirement::Revision("abc123".into()).to_registry_requirement(), None);
    }

    #[test]
    fn registry_representable_excludes_branch_and_revision() {
        assert!(Requirement::Exact(v("1.0.0")).is_registry_representable());
        assert!(Requirement::Range(v("1.0.0"), v("2.0.0")).is_registry_representable());
        assert!(!Requirement::Branch("main".into()).is_registry_representable());
        assert!(!Requirement::Revision("abc".into()).is_registry_representable());
    }
}

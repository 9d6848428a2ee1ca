//! The canonical, origin-independent name of a logical package.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A canonical package identity.
///
/// Two identities are equal iff they denote the same logical package,
/// regardless of which origin (source control or registry) a particular
/// dependency declaration used to reach it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Creates an identity from its canonical string form.
    pub fn new(canonical: impl Into<String>) -> Self {
        Self(canonical.into())
    }

    /// Returns the canonical string form of the identity.
    pub fn canonical_string(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{canonical}", canonical = self.0)
    }
}

impl From<String> for Identity {
    fn from(canonical: String) -> Self {
        Self(canonical)
    }
}

impl From<&str> for Identity {
    fn from(canonical: &str) -> Self {
        Self(canonical.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identities_compare_by_canonical_string() {
        assert_eq!(Identity::new("apple.swift-nio"), Identity::new("apple.swift-nio"));
        assert_ne!(Identity::new("apple.swift-nio"), Identity::new("swift-nio"));
    }

    #[test]
    fn sorted_first_is_lexicographic() {
        let mut ids = vec![Identity::new("z.foo"), Identity::new("a.foo")];
        ids.sort();
        assert_eq!(ids[0], Identity::new("a.foo"));
    }
}

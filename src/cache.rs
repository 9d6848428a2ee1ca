//! Time-bounded memoization of source-control URL to registry identity lookups.

use crate::identity::Identity;
use dashmap::DashMap;
use std::time::{Duration, Instant};

/// The default time-to-live for both positive and negative cache entries.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// The outcome of a past identity lookup for a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The registry was queried successfully.
    ///
    /// `None` means the registry was reached but reported no matching identity, which is
    /// cached identically to a found identity: both avoid re-querying within the TTL.
    Success(Option<Identity>),
    /// The registry query failed. Cached with the same TTL as a success, to protect a
    /// flaky registry from being hammered by repeated failing lookups.
    Failure,
}

struct Entry {
    outcome: Outcome,
    expires_at: Instant,
}

/// A concurrent, TTL-bounded cache from source-control URL to identity lookup outcome.
///
/// Entries are never explicitly evicted; an expired entry is simply overwritten in place
/// the next time [`IdentityCache::store`] is called for that URL. The cache has no
/// capacity bound — it is scoped to the lifetime of a single workspace session, not a
/// long-running server, so unbounded growth is not a concern addressed here.
pub struct IdentityCache {
    entries: DashMap<String, Entry>,
    ttl: Duration,
}

impl IdentityCache {
    /// Creates a new, empty cache using the default TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a new, empty cache using a custom TTL (primarily for tests).
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Looks up the cached outcome for a URL.
    ///
    /// Returns `None` if there is no entry, or if the entry has expired. An expired entry
    /// is left in place; it is overwritten on the next [`Self::store`], not evicted here.
    pub fn lookup(&self, url: &str) -> Option<Outcome> {
        let entry = self.entries.get(url)?;
        if entry.expires_at > Instant::now() {
            Some(entry.outcome.clone())
        } else {
            None
        }
    }

    /// Records an outcome for a URL, resetting its expiry to `now + TTL`.
    ///
    /// Concurrent stores for the same URL are last-writer-wins; this is acceptable because
    /// all writers are computing equivalent results modulo transient registry disagreement,
    /// and the TTL bounds how long any discrepancy survives.
    pub fn store(&self, url: impl Into<String>, outcome: Outcome) {
        self.entries.insert(
            url.into(),
            Entry {
                outcome,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }
}

impl Default for IdentityCache {
    fn default() -> Self {
        Self::new()
    }
}

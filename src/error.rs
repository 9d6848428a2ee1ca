//! The error taxonomy surfaced by this crate to its caller.
//!
//! Only [`CoreError::LookupFailure`] is ever recovered *inside* this crate (the dispatcher
//! converts it to a warning on the [`crate::observability::ObservabilityScope`] and leaves
//! the affected dependency unchanged). Every other variant propagates to the caller.

use thiserror::Error;

/// An error surfaced by the manifest transformation core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A registry lookup for a URL failed.
    ///
    /// This variant is constructed internally by the mapper and is always intercepted by
    /// the dispatcher before it can reach a caller; it is public only so that a custom
    /// [`crate::registry_client::RegistryClient`] test double can construct one directly.
    #[error("failed querying registry identity for '{url}'")]
    LookupFailure {
        /// The URL the lookup was for.
        url: String,
        /// The underlying cause.
        #[source]
        source: anyhow::Error,
    },

    /// The dispatcher assigned a resolved identity to a dependency that was not eligible
    /// for transformation, or the rewriter reached a combination of mode/requirement that
    /// should be structurally unreachable. Always indicates a bug in this crate, not bad
    /// input: callers should treat this as fatal rather than attempt recovery.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    /// The underlying manifest loader failed. Propagated verbatim; no rewriting was
    /// attempted.
    #[error("underlying manifest loader failed")]
    UnderlyingLoader(#[source] anyhow::Error),

    /// The surrounding load was cancelled before it completed. No cache entries were
    /// written for lookups that were still in flight.
    #[error("manifest load was cancelled")]
    Cancelled,
}

/// A convenience alias for this crate's fallible operations.
pub type Result<T> = std::result::Result<T, CoreError>;

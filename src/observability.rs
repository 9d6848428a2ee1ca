//! The observability channel external collaborators use to surface decisions to a user.
//!
//! This is distinct from the ambient `log` calls sprinkled through this crate for
//! diagnostics: it is the interface the dispatcher and rewriter use to report a specific
//! dependency's rewrite or a specific lookup's failure, matching the shape the workspace
//! tool embedding this crate is expected to already have for reporting build decisions.

/// An error underlying an observability message, if one caused it.
pub type UnderlyingError = anyhow::Error;

/// A sink for `{info, warning, error}` messages about manifest transformation decisions.
///
/// Implementations are expected to be cheap to call and safe to share across concurrently
/// running tasks, since it is threaded by reference through every concurrent lookup task
/// the dispatcher spawns.
pub trait ObservabilityScope: Send + Sync {
    /// Reports an informational message (e.g. "dependency X was rewritten to Y").
    fn info(&self, message: &str);

    /// Reports a non-fatal warning (e.g. "lookup for URL X failed, leaving it unchanged").
    fn warning(&self, message: &str, underlying_error: Option<&UnderlyingError>);

    /// Reports an error. Not used by this crate's own recovered paths (only
    /// [`Self::warning`] is), but part of the external channel's full contract.
    fn error(&self, message: &str, underlying_error: Option<&UnderlyingError>);
}

/// The default [`ObservabilityScope`], forwarding each channel to the matching `log` macro.
///
/// This is the ambient logging stack: embedders that don't need a custom sink (a TUI, a
/// structured event bus) can use this directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObservability;

impl ObservabilityScope for LogObservability {
    fn info(&self, message: &str) {
        log::info!("{message}");
    }

    fn warning(&self, message: &str, underlying_error: Option<&UnderlyingError>) {
        match underlying_error {
            Some(err) => log::warn!("{message}: {err:#}"),
            None => log::warn!("{message}"),
        }
    }

    fn error(&self, message: &str, underlying_error: Option<&UnderlyingError>) {
        match underlying_error {
            Some(err) => log::error!("{message}: {err:#}"),
            None => log::error!("{message}"),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// An [`ObservabilityScope`] that records every message for assertions in tests.
    #[derive(Default)]
    pub struct RecordingObservability {
        pub infos: Mutex<Vec<String>>,
        pub warnings: Mutex<Vec<String>>,
    }

    impl ObservabilityScope for RecordingObservability {
        fn info(&self, message: &str) {
            self.infos.lock().unwrap().push(message.to_string());
        }

        fn warning(&self, message: &str, _underlying_error: Option<&UnderlyingError>) {
            self.warnings.lock().unwrap().push(message.to_string());
        }

        fn error(&self, _message: &str, _underlying_error: Option<&UnderlyingError>) {}
    }
}

//! The transformation mode: the one piece of configuration this crate's caller chooses.

use std::fmt;

/// The outer configuration variant a workspace tool exposes to its user.
///
/// `Disabled` has no [`Mode`] equivalent: constructing [`crate::loader::RegistryAwareLoader`]
/// with it is a static error. Callers are expected to bypass the decorator entirely when the
/// user has chosen `Disabled`, not construct it and have it act as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformationMode {
    /// Manifest transformation is turned off; the decorator must not be constructed.
    Disabled,
    /// Adjust a source-control dependency's identity in place. See [`Mode::Identity`].
    Identity,
    /// Replace a source-control dependency with a registry dependency outright where
    /// possible. See [`Mode::Swizzle`].
    Swizzle,
}

/// The active transformation mode, once a [`TransformationMode`] has been confirmed to not
/// be `Disabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Rewrite only the `identity` field of matching source-control dependencies.
    Identity,
    /// Replace matching source-control dependencies with registry dependencies when the
    /// requirement is representable in one; fall back to [`Mode::Identity`] otherwise.
    Swizzle,
}

/// The error returned when constructing the decorator with [`TransformationMode::Disabled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeDisabledError;

impl fmt::Display for ModeDisabledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot construct a registry-aware loader with transformation disabled; \
             bypass the decorator instead"
        )
    }
}

impl std::error::Error for ModeDisabledError {}

impl TryFrom<TransformationMode> for Mode {
    type Error = ModeDisabledError;

    fn try_from(mode: TransformationMode) -> Result<Self, Self::Error> {
        match mode {
            TransformationMode::Disabled => Err(ModeDisabledError),
            TransformationMode::Identity => Ok(Mode::Identity),
            TransformationMode::Swizzle => Ok(Mode::Swizzle),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn disabled_does_not_convert() {
        assert!(Mode::try_from(TransformationMode::Disabled).is_err());
    }

    #[test]
    fn identity_and_swizzle_convert() {
        assert_eq!(Mode::try_from(TransformationMode::Identity), Ok(Mode::Identity));
        assert_eq!(Mode::try_from(TransformationMode::Swizzle), Ok(Mode::Swizzle));
    }
}

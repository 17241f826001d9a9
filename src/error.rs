//! Error taxonomy shared by the assertions and the retry helper.

use thiserror::Error;

use crate::failure::AssertionFailure;

/// Result alias for verification operations.
pub type VerifyResult<T = ()> = Result<T, VerifyError>;

/// Errors raised by assertions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// Malformed call arguments, detected before anything is evaluated.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidInput {
        /// Offending argument name.
        argument: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// The verified property does not hold.
    #[error("{0}")]
    AssertionFailed(Box<AssertionFailure>),
    /// No ordering is available for the element type.
    #[error("no ordering comparison is available for `{type_name}`")]
    ComparisonUnavailable {
        /// Name of the element type.
        type_name: &'static str,
    },
}

impl VerifyError {
    /// Build an [`VerifyError::InvalidInput`].
    pub fn invalid_input(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            argument,
            reason: reason.into(),
        }
    }

    /// The failure payload, if this is an assertion failure.
    pub fn failure(&self) -> Option<&AssertionFailure> {
        match self {
            Self::AssertionFailed(failure) => Some(failure),
            _ => None,
        }
    }

    /// True for argument-class errors.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

impl From<AssertionFailure> for VerifyError {
    fn from(failure: AssertionFailure) -> Self {
        Self::AssertionFailed(Box::new(failure))
    }
}

/// Panic with the rendered error. Backs the `assert_*` wrappers.
#[track_caller]
pub(crate) fn raise(result: VerifyResult) {
    if let Err(error) = result {
        panic!("{error}");
    }
}

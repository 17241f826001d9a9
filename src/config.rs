//! Verification configuration.

use serde::{Deserialize, Serialize};

use crate::join::JoinKind;

/// Formatting limit applied to each labeled value of a failure.
pub const DEFAULT_MAX_FORMATTED_VALUE_LENGTH: usize = 2000;

/// Configuration for a [`Verifier`](crate::sequence::Verifier).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VerifyConfig {
    /// Maximum characters kept per formatted value before truncation.
    pub max_formatted_value_length: usize,
    /// Emit a `tracing` warning for every failure produced.
    pub log_failures: bool,
    /// Strategy used by [`Verifier::join`](crate::sequence::Verifier::join).
    pub join_kind: JoinKind,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            max_formatted_value_length: DEFAULT_MAX_FORMATTED_VALUE_LENGTH,
            log_failures: false,
            join_kind: JoinKind::default(),
        }
    }
}

impl VerifyConfig {
    /// Set the per-value formatting limit.
    pub fn with_max_formatted_value_length(mut self, max: usize) -> Self {
        self.max_formatted_value_length = max;
        self
    }

    /// Enable or disable failure logging.
    pub fn with_log_failures(mut self, log_failures: bool) -> Self {
        self.log_failures = log_failures;
        self
    }

    /// Set the join strategy.
    pub fn with_join_kind(mut self, join_kind: JoinKind) -> Self {
        self.join_kind = join_kind;
        self
    }
}

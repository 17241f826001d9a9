//! Cardinality assertion.

use crate::config::VerifyConfig;
use crate::error::{VerifyError, VerifyResult, raise};
use crate::failure::AssertionFailureBuilder;

pub(crate) fn check_count<I>(expected: i64, values: I, config: &VerifyConfig) -> VerifyResult
where
    I: IntoIterator,
{
    let expected = usize::try_from(expected).map_err(|_| {
        VerifyError::invalid_input(
            "expected_count",
            format!("must be greater than or equal to zero, got {expected}"),
        )
    })?;

    let values = values.into_iter();
    // Exact size hints come from slices, vectors and other sized collections.
    let actual = match values.size_hint() {
        (lower, Some(upper)) if lower == upper => lower,
        _ => values.count(),
    };
    if actual == expected {
        return Ok(());
    }

    Err(AssertionFailureBuilder::with_config(
        "Expected the sequence to contain a certain number of elements.",
        config,
    )
    .expected(&expected)
    .actual(&actual)
    .build()
    .into())
}

/// Verify that `values` yields exactly `expected` elements.
///
/// A negative `expected` is rejected with [`VerifyError::InvalidInput`] before the
/// sequence is touched.
///
/// # Example
///
/// ```rust
/// use datajoin_testing::sequence::verify_count;
///
/// assert!(verify_count(3, &[1, 2, 3]).is_ok());
/// assert!(verify_count(3, &[1, 2]).is_err());
/// ```
pub fn verify_count<I: IntoIterator>(expected: i64, values: I) -> VerifyResult {
    check_count(expected, values, &VerifyConfig::default())
}

/// Assert that `values` yields exactly `expected` elements.
///
/// # Panics
///
/// Panics if the count differs or `expected` is negative.
#[track_caller]
pub fn assert_count<I: IntoIterator>(expected: i64, values: I) {
    raise(verify_count(expected, values));
}

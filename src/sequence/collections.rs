//! Membership, emptiness and element-wise equality assertions.

use std::fmt::Debug;

use crate::config::VerifyConfig;
use crate::error::{VerifyResult, raise};
use crate::failure::AssertionFailureBuilder;
use crate::match_table::MatchTable;

pub(crate) fn check_contains<I, F>(
    values: I,
    expected: &I::Item,
    equality: F,
    config: &VerifyConfig,
) -> VerifyResult
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Debug,
    F: Fn(&I::Item, &I::Item) -> bool,
{
    let values = values.into_iter();
    if values.clone().any(|item| equality(&item, expected)) {
        return Ok(());
    }
    let enumeration: Vec<I::Item> = values.collect();
    Err(AssertionFailureBuilder::with_config(
        "Expected the value to appear within the enumeration.",
        config,
    )
    .expected(expected)
    .labeled("Enumeration", &enumeration)
    .build()
    .into())
}

pub(crate) fn check_does_not_contain<I, F>(
    values: I,
    unexpected: &I::Item,
    equality: F,
    config: &VerifyConfig,
) -> VerifyResult
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Debug,
    F: Fn(&I::Item, &I::Item) -> bool,
{
    let values = values.into_iter();
    if !values.clone().any(|item| equality(&item, unexpected)) {
        return Ok(());
    }
    let enumeration: Vec<I::Item> = values.collect();
    Err(AssertionFailureBuilder::with_config(
        "Expected the value to not appear within the enumeration.",
        config,
    )
    .labeled("Unexpected Value", unexpected)
    .labeled("Enumeration", &enumeration)
    .build()
    .into())
}

pub(crate) fn check_is_empty<I>(values: I, config: &VerifyConfig) -> VerifyResult
where
    I: IntoIterator,
    I::Item: Debug,
{
    let actual: Vec<I::Item> = values.into_iter().collect();
    if actual.is_empty() {
        return Ok(());
    }
    Err(
        AssertionFailureBuilder::with_config("Expected value to be empty.", config)
            .actual(&actual)
            .build()
            .into(),
    )
}

pub(crate) fn check_is_not_empty<I>(values: I, config: &VerifyConfig) -> VerifyResult
where
    I: IntoIterator,
{
    if values.into_iter().next().is_some() {
        return Ok(());
    }
    Err(
        AssertionFailureBuilder::with_config("Expected value to be non-empty.", config)
            .labeled_text("Actual Value", "[]")
            .build()
            .into(),
    )
}

pub(crate) fn check_elements_equal<I, J, F>(
    expected: I,
    actual: J,
    equality: F,
    config: &VerifyConfig,
) -> VerifyResult
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: Debug,
    F: Fn(&I::Item, &I::Item) -> bool,
{
    let expected: Vec<I::Item> = expected.into_iter().collect();
    let actual: Vec<I::Item> = actual.into_iter().collect();

    let mismatch = expected
        .iter()
        .zip(&actual)
        .position(|(e, a)| !equality(e, a))
        .or_else(|| (expected.len() != actual.len()).then(|| expected.len().min(actual.len())));
    let Some(index) = mismatch else {
        return Ok(());
    };

    let mut builder = AssertionFailureBuilder::with_config(
        "Expected elements to be equal but they differ in at least one position.",
        config,
    )
    .labeled("Expected Sequence", &expected)
    .labeled("Actual Sequence", &actual)
    .labeled("Failing Position", &index);
    if let Some(value) = expected.get(index) {
        builder = builder.expected(value);
    }
    if let Some(value) = actual.get(index) {
        builder = builder.actual(value);
    }
    Err(builder.build().into())
}

pub(crate) fn check_elements_equal_ignoring_order<I, J, F>(
    expected: I,
    actual: J,
    equality: F,
    config: &VerifyConfig,
) -> VerifyResult
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: Debug,
    F: Fn(&I::Item, &I::Item) -> bool,
{
    let mut table = MatchTable::new(equality);
    expected
        .into_iter()
        .for_each(|value| table.add_left_value(value));
    actual
        .into_iter()
        .for_each(|value| table.add_right_value(value));
    if table.is_balanced() {
        return Ok(());
    }

    let mismatches: Vec<String> = table
        .mismatches()
        .map(|(value, counts)| {
            format!(
                "{value:?} (expected {}, found {})",
                counts.left, counts.right
            )
        })
        .collect();
    Err(AssertionFailureBuilder::with_config(
        "Expected elements to be equal but possibly in a different order.",
        config,
    )
    .labeled_text("Mismatched Values", mismatches.join("; "))
    .labeled("Mismatch Count", &table.non_equal_count())
    .build()
    .into())
}

/// Verify that `values` contains `expected`.
pub fn verify_contains<I>(values: I, expected: I::Item) -> VerifyResult
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: PartialEq + Debug,
{
    check_contains(values, &expected, |a, b| a == b, &VerifyConfig::default())
}

/// Verify that `values` does not contain `unexpected`.
pub fn verify_does_not_contain<I>(values: I, unexpected: I::Item) -> VerifyResult
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: PartialEq + Debug,
{
    check_does_not_contain(
        values,
        &unexpected,
        |a, b| a == b,
        &VerifyConfig::default(),
    )
}

/// Verify that `values` yields nothing.
pub fn verify_is_empty<I>(values: I) -> VerifyResult
where
    I: IntoIterator,
    I::Item: Debug,
{
    check_is_empty(values, &VerifyConfig::default())
}

/// Verify that `values` yields at least one element.
pub fn verify_is_not_empty<I: IntoIterator>(values: I) -> VerifyResult {
    check_is_not_empty(values, &VerifyConfig::default())
}

/// Verify that both sequences hold equal elements in the same order.
pub fn verify_elements_equal<I, J>(expected: I, actual: J) -> VerifyResult
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: PartialEq + Debug,
{
    check_elements_equal(expected, actual, |a, b| a == b, &VerifyConfig::default())
}

/// Ordered element-wise equality under a custom equality.
pub fn verify_elements_equal_by<I, J, F>(expected: I, actual: J, equality: F) -> VerifyResult
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: Debug,
    F: Fn(&I::Item, &I::Item) -> bool,
{
    check_elements_equal(expected, actual, equality, &VerifyConfig::default())
}

/// Verify that both sequences hold the same multiset of elements.
///
/// # Example
///
/// ```rust
/// use datajoin_testing::sequence::verify_elements_equal_ignoring_order;
///
/// assert!(verify_elements_equal_ignoring_order(&[1, 2, 2], &[2, 1, 2]).is_ok());
/// assert!(verify_elements_equal_ignoring_order(&[1, 1], &[1]).is_err());
/// ```
pub fn verify_elements_equal_ignoring_order<I, J>(expected: I, actual: J) -> VerifyResult
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: PartialEq + Debug,
{
    check_elements_equal_ignoring_order(expected, actual, |a, b| a == b, &VerifyConfig::default())
}

/// Multiset equality under a custom equality.
pub fn verify_elements_equal_ignoring_order_by<I, J, F>(
    expected: I,
    actual: J,
    equality: F,
) -> VerifyResult
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: Debug,
    F: Fn(&I::Item, &I::Item) -> bool,
{
    check_elements_equal_ignoring_order(expected, actual, equality, &VerifyConfig::default())
}

/// Assert that `values` contains `expected`.
///
/// # Panics
///
/// Panics if the value is absent.
#[track_caller]
pub fn assert_contains<I>(values: I, expected: I::Item)
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: PartialEq + Debug,
{
    raise(verify_contains(values, expected));
}

/// Assert that `values` does not contain `unexpected`.
///
/// # Panics
///
/// Panics if the value is present.
#[track_caller]
pub fn assert_does_not_contain<I>(values: I, unexpected: I::Item)
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: PartialEq + Debug,
{
    raise(verify_does_not_contain(values, unexpected));
}

/// Assert that `values` yields nothing.
///
/// # Panics
///
/// Panics if any element is present.
#[track_caller]
pub fn assert_is_empty<I>(values: I)
where
    I: IntoIterator,
    I::Item: Debug,
{
    raise(verify_is_empty(values));
}

/// Assert that `values` yields at least one element.
///
/// # Panics
///
/// Panics on an empty sequence.
#[track_caller]
pub fn assert_is_not_empty<I: IntoIterator>(values: I) {
    raise(verify_is_not_empty(values));
}

/// Assert ordered element-wise equality.
///
/// # Panics
///
/// Panics at the first differing position.
#[track_caller]
pub fn assert_elements_equal<I, J>(expected: I, actual: J)
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: PartialEq + Debug,
{
    raise(verify_elements_equal(expected, actual));
}

/// Assert multiset equality.
///
/// # Panics
///
/// Panics listing every value whose counts differ.
#[track_caller]
pub fn assert_elements_equal_ignoring_order<I, J>(expected: I, actual: J)
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: PartialEq + Debug,
{
    raise(verify_elements_equal_ignoring_order(expected, actual));
}

//! Ordering assertion.

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::comparison::{SortOrder, subject_type_name};
use crate::config::VerifyConfig;
use crate::error::{VerifyError, VerifyResult, raise};
use crate::failure::AssertionFailureBuilder;

pub(crate) fn check_sorted<I, F>(
    values: I,
    order: SortOrder,
    mut compare: F,
    config: &VerifyConfig,
) -> VerifyResult
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Debug,
    F: FnMut(&I::Item, &I::Item) -> VerifyResult<Ordering>,
{
    let values = values.into_iter();
    let mut previous: Option<I::Item> = None;

    for (index, value) in values.clone().enumerate() {
        if let Some(previous) = &previous {
            let delta = match compare(&value, previous) {
                Ok(delta) => delta,
                Err(VerifyError::ComparisonUnavailable { type_name }) => {
                    return Err(AssertionFailureBuilder::with_config(
                        "Expected the elements to be sorted in a specific order but no implicit ordering comparison can be found for the subject type.",
                        config,
                    )
                    .labeled_text("Type", type_name)
                    .error(VerifyError::ComparisonUnavailable { type_name })
                    .build()
                    .into());
                }
                Err(other) => return Err(other),
            };

            if !order.accepts(delta) {
                let sequence: Vec<I::Item> = values.collect();
                return Err(AssertionFailureBuilder::with_config(
                    "Expected the elements to be sorted in a specific order but the sequence of values mismatches at one position at least.",
                    config,
                )
                .labeled_text("Expected Sort Order", order.description())
                .labeled("Sequence", &sequence)
                .labeled("Failing Position", &index)
                .build()
                .into());
            }
        }
        previous = Some(value);
    }
    Ok(())
}

pub(crate) fn partial_compare<T: PartialOrd>(current: &T, previous: &T) -> VerifyResult<Ordering> {
    current
        .partial_cmp(previous)
        .ok_or(VerifyError::ComparisonUnavailable {
            type_name: subject_type_name::<T>(),
        })
}

/// Verify that consecutive elements respect `order` under `PartialOrd`.
///
/// A pair without an ordering (e.g. a NaN) fails the assertion naming the element
/// type.
///
/// # Example
///
/// ```rust
/// use datajoin_testing::comparison::SortOrder;
/// use datajoin_testing::sequence::verify_sorted;
///
/// assert!(verify_sorted(&[1, 2, 2, 3], SortOrder::Increasing).is_ok());
/// assert!(verify_sorted(&[1, 2, 2, 3], SortOrder::StrictlyIncreasing).is_err());
/// ```
pub fn verify_sorted<I>(values: I, order: SortOrder) -> VerifyResult
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: PartialOrd + Debug,
{
    check_sorted(values, order, partial_compare, &VerifyConfig::default())
}

/// Verify ordering under a custom comparison.
pub fn verify_sorted_by<I, F>(values: I, order: SortOrder, mut compare: F) -> VerifyResult
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Debug,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    check_sorted(
        values,
        order,
        |a, b| Ok(compare(a, b)),
        &VerifyConfig::default(),
    )
}

/// Assert that consecutive elements respect `order`.
///
/// # Panics
///
/// Panics at the first out-of-order element or on an incomparable pair.
#[track_caller]
pub fn assert_sorted<I>(values: I, order: SortOrder)
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: PartialOrd + Debug,
{
    raise(verify_sorted(values, order));
}

/// Assert ordering under a custom comparison.
///
/// # Panics
///
/// Panics at the first out-of-order element.
#[track_caller]
pub fn assert_sorted_by<I, F>(values: I, order: SortOrder, compare: F)
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Debug,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    raise(verify_sorted_by(values, order, compare));
}

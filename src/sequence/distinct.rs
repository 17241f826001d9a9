//! Uniqueness assertion.

use std::fmt::Debug;

use crate::config::VerifyConfig;
use crate::error::{VerifyResult, raise};
use crate::failure::AssertionFailureBuilder;

// Only the equality is available, no hash or order, hence the nested scan.
pub(crate) fn check_distinct<I, F>(values: I, equality: F, config: &VerifyConfig) -> VerifyResult
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Debug,
    F: Fn(&I::Item, &I::Item) -> bool,
{
    let values = values.into_iter();
    let mut duplicates: Vec<I::Item> = Vec::new();

    for (i, candidate) in values.clone().enumerate() {
        let duplicated = values
            .clone()
            .enumerate()
            .any(|(j, other)| i != j && equality(&candidate, &other));
        if duplicated && !duplicates.iter().any(|seen| equality(seen, &candidate)) {
            duplicates.push(candidate);
        }
    }

    if duplicates.is_empty() {
        return Ok(());
    }

    Err(AssertionFailureBuilder::with_config(
        "Expected all values in the sequence to be unique but some of them are not.",
        config,
    )
    .labeled("Duplicated Values", &duplicates)
    .build()
    .into())
}

/// Verify that no two elements of `values` are equal.
///
/// The sequence is enumerated in a nested loop, so its iterator must be `Clone`.
///
/// # Example
///
/// ```rust
/// use datajoin_testing::sequence::verify_distinct;
///
/// assert!(verify_distinct(&[1, 2, 3]).is_ok());
/// assert!(verify_distinct(&[1, 2, 2, 3]).is_err());
/// ```
pub fn verify_distinct<I>(values: I) -> VerifyResult
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: PartialEq + Debug,
{
    check_distinct(values, |a, b| a == b, &VerifyConfig::default())
}

/// Verify uniqueness under a custom equality.
pub fn verify_distinct_by<I, F>(values: I, equality: F) -> VerifyResult
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Debug,
    F: Fn(&I::Item, &I::Item) -> bool,
{
    check_distinct(values, equality, &VerifyConfig::default())
}

/// Assert that no two elements of `values` are equal.
///
/// # Panics
///
/// Panics listing every duplicated value.
#[track_caller]
pub fn assert_distinct<I>(values: I)
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: PartialEq + Debug,
{
    raise(verify_distinct(values));
}

/// Assert uniqueness under a custom equality.
///
/// # Panics
///
/// Panics listing every duplicated value.
#[track_caller]
pub fn assert_distinct_by<I, F>(values: I, equality: F)
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Debug,
    F: Fn(&I::Item, &I::Item) -> bool,
{
    raise(verify_distinct_by(values, equality));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::sequences::unique_vec;
    use proptest::prelude::*;

    #[test]
    fn unique_values_pass() {
        assert!(verify_distinct(&[1, 2, 3]).is_ok());
        assert!(verify_distinct(Vec::<i32>::new()).is_ok());
    }

    #[test]
    fn duplicate_is_reported_once() {
        let error = verify_distinct(&[1, 2, 2, 3]).unwrap_err();
        let failure = error.failure().expect("assertion failure");
        assert_eq!(failure.value("Duplicated Values"), Some("[2]"));
    }

    #[test]
    fn every_duplicated_value_is_listed() {
        let error = verify_distinct(&["a", "b", "a", "c", "b", "a"]).unwrap_err();
        assert_eq!(
            error.failure().and_then(|f| f.value("Duplicated Values")),
            Some(r#"["a", "b"]"#)
        );
    }

    #[test]
    fn custom_equality_is_honoured() {
        let words = ["Cat", "dog", "CAT"];
        assert!(verify_distinct(&words).is_ok());
        let error = verify_distinct_by(&words, |a, b| a.eq_ignore_ascii_case(b)).unwrap_err();
        assert_eq!(
            error.failure().and_then(|f| f.value("Duplicated Values")),
            Some(r#"["Cat"]"#)
        );
    }

    #[test]
    fn repeated_runs_give_identical_payloads() {
        let values = vec![4, 4, 5];
        assert_eq!(verify_distinct(&values), verify_distinct(&values));
    }

    #[test]
    #[should_panic(expected = "Duplicated Values")]
    fn assert_distinct_panics_on_duplicates() {
        assert_distinct(&[7, 7]);
    }

    proptest! {
        #[test]
        fn unique_vectors_always_pass(values in unique_vec(0u16..500, 0..=30)) {
            prop_assert!(verify_distinct(&values).is_ok());
        }
    }
}

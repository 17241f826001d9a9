//! Assertions over sequences.
//!
//! Every assertion comes in two shapes: `verify_*` returns a [`VerifyResult`] and
//! `assert_*` panics with the rendered failure. Functions that enumerate the input
//! more than once require `I::IntoIter: Clone`, which holds for slices, `Vec`
//! references and most adapters over them.
//!
//! [`Verifier`] bundles a [`VerifyConfig`] and a [`ComparerRegistry`] so that
//! element comparisons can be customised per type and failures formatted with the
//! configured limits.

mod collections;
mod count;
mod distinct;
mod sorted;

use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::Arc;

use crate::comparison::{ComparerRegistry, SortOrder, subject_type_name};
use crate::config::VerifyConfig;
use crate::error::{VerifyError, VerifyResult};
use crate::join::join_rows;

pub use collections::{
    assert_contains, assert_does_not_contain, assert_elements_equal,
    assert_elements_equal_ignoring_order, assert_is_empty, assert_is_not_empty, verify_contains,
    verify_does_not_contain, verify_elements_equal, verify_elements_equal_by,
    verify_elements_equal_ignoring_order, verify_elements_equal_ignoring_order_by,
    verify_is_empty, verify_is_not_empty,
};
pub use count::{assert_count, verify_count};
pub use distinct::{assert_distinct, assert_distinct_by, verify_distinct, verify_distinct_by};
pub use sorted::{assert_sorted, assert_sorted_by, verify_sorted, verify_sorted_by};

/// Configured entry point for the sequence assertions.
///
/// Default comparers are looked up in the registry by element type. A registered
/// equality (or one derived from a registered ordering) overrides `PartialEq`, and
/// a registered ordering overrides `PartialOrd`. Types without a natural order go
/// through [`Verifier::sorted_registered`], which fails on the first comparison
/// when nothing is registered.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use datajoin_testing::comparison::{ComparerRegistry, SortOrder};
/// use datajoin_testing::config::VerifyConfig;
/// use datajoin_testing::sequence::Verifier;
///
/// #[derive(Debug)]
/// struct Release(u32, u32);
///
/// let mut registry = ComparerRegistry::new();
/// registry.register_ordering::<Release, _>(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
/// let verifier = Verifier::with_registry(VerifyConfig::default(), Arc::new(registry));
///
/// let releases = [Release(1, 0), Release(1, 4), Release(2, 0)];
/// assert!(verifier.sorted_registered(&releases, SortOrder::StrictlyIncreasing).is_ok());
/// assert!(verifier.sorted(&[3, 2, 1], SortOrder::Decreasing).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: VerifyConfig,
    registry: Arc<ComparerRegistry>,
    message: Option<String>,
}

impl Verifier {
    /// Verifier with an empty registry.
    pub fn new(config: VerifyConfig) -> Self {
        Self::with_registry(config, Arc::new(ComparerRegistry::new()))
    }

    /// Verifier sharing `registry`.
    pub fn with_registry(config: VerifyConfig, registry: Arc<ComparerRegistry>) -> Self {
        Self {
            config,
            registry,
            message: None,
        }
    }

    /// Attach `message` to every failure this verifier reports.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    /// Registered comparers.
    pub fn registry(&self) -> &ComparerRegistry {
        &self.registry
    }

    /// See [`verify_count`].
    pub fn count<I: IntoIterator>(&self, expected: i64, values: I) -> VerifyResult {
        self.report("count", count::check_count(expected, values, &self.config))
    }

    /// See [`verify_distinct`]. Uses the registered equality for `T` if any.
    pub fn distinct<'a, T, I>(&self, values: I) -> VerifyResult
    where
        T: PartialEq + Debug + 'static,
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: Clone,
    {
        let result = match self.registry.equality::<T>() {
            Some(equality) => {
                distinct::check_distinct(values, |a, b| equality(*a, *b), &self.config)
            }
            None => distinct::check_distinct(values, |a, b| a == b, &self.config),
        };
        self.report("distinct", result)
    }

    /// See [`verify_distinct_by`].
    pub fn distinct_by<I, F>(&self, values: I, equality: F) -> VerifyResult
    where
        I: IntoIterator,
        I::IntoIter: Clone,
        I::Item: Debug,
        F: Fn(&I::Item, &I::Item) -> bool,
    {
        self.report(
            "distinct",
            distinct::check_distinct(values, equality, &self.config),
        )
    }

    /// See [`verify_sorted`]. Uses the registered ordering for `T` if any,
    /// `PartialOrd` otherwise.
    pub fn sorted<'a, T, I>(&self, values: I, order: SortOrder) -> VerifyResult
    where
        T: PartialOrd + Debug + 'static,
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: Clone,
    {
        let result = match self.registry.ordering::<T>() {
            Some(ordering) => sorted::check_sorted(
                values,
                order,
                |current, previous| Ok(ordering(*current, *previous)),
                &self.config,
            ),
            None => sorted::check_sorted(
                values,
                order,
                |current, previous| sorted::partial_compare(*current, *previous),
                &self.config,
            ),
        };
        self.report("sorted", result)
    }

    /// Ordering check for types without `PartialOrd`. Requires an ordering
    /// registered for `T`; without one the first comparison fails naming the type.
    pub fn sorted_registered<'a, T, I>(&self, values: I, order: SortOrder) -> VerifyResult
    where
        T: Debug + 'static,
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: Clone,
    {
        let result = match self.registry.ordering::<T>() {
            Some(ordering) => sorted::check_sorted(
                values,
                order,
                |current, previous| Ok(ordering(*current, *previous)),
                &self.config,
            ),
            None => sorted::check_sorted(
                values,
                order,
                |_, _| {
                    Err(VerifyError::ComparisonUnavailable {
                        type_name: subject_type_name::<T>(),
                    })
                },
                &self.config,
            ),
        };
        self.report("sorted", result)
    }

    /// See [`verify_sorted_by`].
    pub fn sorted_by<I, F>(&self, values: I, order: SortOrder, mut compare: F) -> VerifyResult
    where
        I: IntoIterator,
        I::IntoIter: Clone,
        I::Item: Debug,
        F: FnMut(&I::Item, &I::Item) -> Ordering,
    {
        let result = sorted::check_sorted(
            values,
            order,
            |current, previous| Ok(compare(current, previous)),
            &self.config,
        );
        self.report("sorted", result)
    }

    /// See [`verify_contains`]. Uses the registered equality for `T` if any.
    pub fn contains<'a, T, I>(&self, values: I, expected: &'a T) -> VerifyResult
    where
        T: PartialEq + Debug + 'static,
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: Clone,
    {
        let result = match self.registry.equality::<T>() {
            Some(equality) => collections::check_contains(
                values,
                &expected,
                |a, b| equality(*a, *b),
                &self.config,
            ),
            None => collections::check_contains(values, &expected, |a, b| a == b, &self.config),
        };
        self.report("contains", result)
    }

    /// See [`verify_does_not_contain`].
    pub fn does_not_contain<I>(&self, values: I, unexpected: I::Item) -> VerifyResult
    where
        I: IntoIterator,
        I::IntoIter: Clone,
        I::Item: PartialEq + Debug,
    {
        self.report(
            "does_not_contain",
            collections::check_does_not_contain(values, &unexpected, |a, b| a == b, &self.config),
        )
    }

    /// See [`verify_is_empty`].
    pub fn is_empty<I>(&self, values: I) -> VerifyResult
    where
        I: IntoIterator,
        I::Item: Debug,
    {
        self.report("is_empty", collections::check_is_empty(values, &self.config))
    }

    /// See [`verify_is_not_empty`].
    pub fn is_not_empty<I: IntoIterator>(&self, values: I) -> VerifyResult {
        self.report(
            "is_not_empty",
            collections::check_is_not_empty(values, &self.config),
        )
    }

    /// See [`verify_elements_equal`]. Uses the registered equality for `T` if any.
    pub fn elements_equal<'a, T, I, J>(&self, expected: I, actual: J) -> VerifyResult
    where
        T: PartialEq + Debug + 'static,
        I: IntoIterator<Item = &'a T>,
        J: IntoIterator<Item = &'a T>,
    {
        let result = match self.registry.equality::<T>() {
            Some(equality) => collections::check_elements_equal(
                expected,
                actual,
                |a, b| equality(*a, *b),
                &self.config,
            ),
            None => {
                collections::check_elements_equal(expected, actual, |a, b| a == b, &self.config)
            }
        };
        self.report("elements_equal", result)
    }

    /// See [`verify_elements_equal_ignoring_order`]. Uses the registered equality
    /// for `T` if any.
    pub fn elements_equal_ignoring_order<'a, T, I, J>(&self, expected: I, actual: J) -> VerifyResult
    where
        T: PartialEq + Debug + 'static,
        I: IntoIterator<Item = &'a T>,
        J: IntoIterator<Item = &'a T>,
    {
        let result = match self.registry.equality::<T>() {
            Some(equality) => collections::check_elements_equal_ignoring_order(
                expected,
                actual,
                |a, b| equality(*a, *b),
                &self.config,
            ),
            None => collections::check_elements_equal_ignoring_order(
                expected,
                actual,
                |a, b| a == b,
                &self.config,
            ),
        };
        self.report("elements_equal_ignoring_order", result)
    }

    /// Join `sources` with the configured [`JoinKind`](crate::join::JoinKind).
    pub fn join<T: Clone>(&self, sources: &[Vec<T>]) -> VerifyResult<Vec<Vec<T>>> {
        let result = join_rows(sources, self.config.join_kind).map_err(VerifyError::from);
        self.report("join", result)
    }

    fn report<T>(&self, operation: &'static str, result: VerifyResult<T>) -> VerifyResult<T> {
        let result = result.map_err(|error| match (error, &self.message) {
            (VerifyError::AssertionFailed(mut failure), Some(message)) => {
                failure.message.get_or_insert_with(|| message.clone());
                VerifyError::AssertionFailed(failure)
            }
            (error, _) => error,
        });
        if self.config.log_failures {
            if let Err(error) = &result {
                tracing::warn!(operation, %error, "verification failed");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join::JoinKind;

    #[derive(Debug)]
    struct Version(u32, u32);

    #[derive(Debug, PartialEq)]
    struct Tag(&'static str);

    fn version_registry() -> Arc<ComparerRegistry> {
        let mut registry = ComparerRegistry::new();
        registry.register_ordering::<Version, _>(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        Arc::new(registry)
    }

    #[test]
    fn sorted_uses_the_registered_ordering() {
        let verifier = Verifier::with_registry(VerifyConfig::default(), version_registry());
        let versions = [Version(0, 9), Version(1, 0), Version(1, 0)];
        assert!(verifier.sorted_registered(&versions, SortOrder::Increasing).is_ok());

        let error = verifier
            .sorted_registered(&versions, SortOrder::StrictlyIncreasing)
            .unwrap_err();
        assert_eq!(
            error.failure().and_then(|f| f.value("Failing Position")),
            Some("2")
        );
    }

    #[test]
    fn sorted_without_ordering_names_the_type() {
        let verifier = Verifier::default();
        let versions = [Version(1, 0), Version(2, 0)];
        let error = verifier
            .sorted_registered(&versions, SortOrder::Increasing)
            .unwrap_err();
        let failure = error.failure().expect("assertion failure");
        assert!(failure.description.contains("no implicit ordering comparison"));
        assert!(failure.value("Type").is_some_and(|name| name.ends_with("Version")));

        // Nothing to compare, nothing to fail.
        assert!(
            verifier
                .sorted_registered(&versions[..1], SortOrder::Increasing)
                .is_ok()
        );
    }

    #[test]
    fn sorted_falls_back_to_partial_ord() {
        let verifier = Verifier::default();
        assert!(verifier.sorted(&[1, 2, 3], SortOrder::Increasing).is_ok());
        assert!(verifier.sorted(&["b", "a"], SortOrder::StrictlyDecreasing).is_ok());

        let error = verifier.sorted(&[1, 3, 2], SortOrder::Increasing).unwrap_err();
        assert_eq!(
            error.failure().and_then(|f| f.value("Failing Position")),
            Some("2")
        );
    }

    #[test]
    fn registered_ordering_overrides_partial_ord() {
        let mut registry = ComparerRegistry::new();
        registry.register_ordering::<i32, _>(|a, b| b.cmp(a));
        let verifier = Verifier::with_registry(VerifyConfig::default(), Arc::new(registry));
        assert!(verifier.sorted(&[3, 2, 1], SortOrder::Increasing).is_ok());
        assert!(verifier.sorted(&[1, 2, 3], SortOrder::Increasing).is_err());
    }

    #[test]
    fn custom_message_is_attached_to_failures() {
        let verifier = Verifier::default().with_message("fixture rows drifted");
        let error = verifier.count(3, [1, 2]).unwrap_err();
        let failure = error.failure().expect("assertion failure");
        assert_eq!(failure.message.as_deref(), Some("fixture rows drifted"));
        assert!(error.to_string().contains("\nfixture rows drifted\n"));

        assert!(verifier.count(2, [1, 2]).is_ok());
        let invalid = verifier.count(-1, [1]).unwrap_err();
        assert!(invalid.is_invalid_input());
    }

    #[test]
    fn registered_equality_overrides_partial_eq() {
        let mut registry = ComparerRegistry::new();
        registry.register_equality::<Tag, _>(|a, b| a.0.eq_ignore_ascii_case(b.0));
        let verifier = Verifier::with_registry(VerifyConfig::default(), Arc::new(registry));

        let tags = [Tag("alpha"), Tag("ALPHA")];
        assert!(Verifier::default().distinct(&tags).is_ok());
        assert!(verifier.distinct(&tags).is_err());
        assert!(verifier.contains(&tags, &Tag("Alpha")).is_ok());
        assert!(
            verifier
                .elements_equal_ignoring_order(&[Tag("a"), Tag("b")], &[Tag("B"), Tag("A")])
                .is_ok()
        );
        assert!(
            verifier
                .elements_equal(&[Tag("a"), Tag("b")], &[Tag("A"), Tag("B")])
                .is_ok()
        );
    }

    #[test]
    fn contains_falls_back_to_partial_eq() {
        let verifier = Verifier::default();
        let tags = [Tag("alpha")];
        assert!(verifier.contains(&tags, &Tag("alpha")).is_ok());
        assert!(verifier.contains(&tags, &Tag("beta")).is_err());
    }

    #[test]
    fn failures_use_the_configured_value_limit() {
        let verifier = Verifier::new(VerifyConfig::default().with_max_formatted_value_length(8));
        let values: Vec<u32> = (0..100).collect();
        let error = verifier.sorted_by(&values, SortOrder::Decreasing, |a, b| a.cmp(b));
        let failure = error.unwrap_err().failure().cloned().expect("assertion failure");
        let sequence = failure.value("Sequence").expect("sequence label");
        assert_eq!(sequence.chars().count(), 8);
        assert!(sequence.ends_with("..."));
    }

    #[test]
    fn logging_does_not_change_verdicts() {
        let quiet = Verifier::default();
        let loud = Verifier::new(VerifyConfig::default().with_log_failures(true));
        assert_eq!(quiet.count(2, [1]), loud.count(2, [1]));
        assert_eq!(quiet.is_empty([1]), loud.is_empty([1]));
        assert_eq!(quiet.is_not_empty([1]), loud.is_not_empty([1]));
    }

    #[test]
    fn join_uses_the_configured_kind() {
        let sources = vec![vec![1, 2, 3], vec![10, 20]];
        let zipped = Verifier::new(VerifyConfig::default().with_join_kind(JoinKind::Sequential))
            .join(&sources)
            .expect("join");
        assert_eq!(zipped, vec![vec![1, 10], vec![2, 20]]);

        let product = Verifier::default().join(&sources).expect("join");
        assert_eq!(product.len(), 6);

        let error = Verifier::default()
            .join(&[vec![1], Vec::new()])
            .unwrap_err();
        assert!(error.is_invalid_input());
    }

    #[test]
    fn distinct_by_and_does_not_contain() {
        let verifier = Verifier::default();
        assert!(verifier.distinct_by([1, 11, 21], |a, b| a % 10 == b % 10).is_err());
        assert!(verifier.does_not_contain(["x", "y"], "z").is_ok());
    }
}

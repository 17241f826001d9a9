//! Sequence-oriented generators.

use proptest::collection::SizeRange;
use proptest::prelude::*;

use crate::comparison::SortOrder;

/// Vectors of pairwise distinct values in shuffled order, as inputs that must pass
/// [`verify_distinct`](crate::sequence::verify_distinct).
pub fn unique_vec<S>(element: S, len: impl Into<SizeRange>) -> impl Strategy<Value = Vec<S::Value>>
where
    S: Strategy,
    S::Value: Ord,
{
    prop::collection::btree_set(element, len)
        .prop_map(|values| values.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// Generate vectors already sorted in `order`.
///
/// Strict orders deduplicate, so the result may be shorter than requested.
pub fn sorted_vec<S>(
    element: S,
    len: impl Into<SizeRange>,
    order: SortOrder,
) -> impl Strategy<Value = Vec<S::Value>>
where
    S: Strategy,
    S::Value: Ord,
{
    prop::collection::vec(element, len).prop_map(move |mut values| {
        values.sort();
        if matches!(
            order,
            SortOrder::StrictlyIncreasing | SortOrder::StrictlyDecreasing
        ) {
            values.dedup();
        }
        if matches!(order, SortOrder::Decreasing | SortOrder::StrictlyDecreasing) {
            values.reverse();
        }
        values
    })
}

/// Any sort order.
pub fn sort_order() -> impl Strategy<Value = SortOrder> {
    prop::sample::select(SortOrder::ALL.to_vec())
}

//! Strategies for join inputs.

use std::ops::RangeInclusive;

use proptest::prelude::*;

use crate::join::JoinKind;

/// Source lengths for a join: `sources` entries, each in `len` (lengths are never zero).
pub fn join_lengths(
    sources: RangeInclusive<usize>,
    len: RangeInclusive<usize>,
) -> impl Strategy<Value = Vec<usize>> {
    assert!(*sources.start() >= 1, "at least one source is required");
    assert!(*len.start() >= 1, "sources must not be empty");
    prop::collection::vec(len, sources)
}

/// Non-empty data sources drawn from `element`.
pub fn data_sources<S>(
    element: S,
    sources: RangeInclusive<usize>,
    len: RangeInclusive<usize>,
) -> impl Strategy<Value = Vec<Vec<S::Value>>>
where
    S: Strategy,
{
    assert!(*sources.start() >= 1, "at least one source is required");
    assert!(*len.start() >= 1, "sources must not be empty");
    prop::collection::vec(prop::collection::vec(element, len), sources)
}

/// Any built-in join kind.
pub fn join_kind() -> impl Strategy<Value = JoinKind> {
    prop_oneof![
        Just(JoinKind::Combinatorial),
        Just(JoinKind::Sequential),
        Just(JoinKind::Pairwise),
    ]
}

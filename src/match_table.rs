//! Multiset reconciliation of two unordered collections.
//!
//! # Example
//!
//! ```rust
//! use datajoin_testing::match_table::MatchTable;
//!
//! let mut table = MatchTable::with_default();
//! for value in [1, 2, 2] {
//!     table.add_left_value(value);
//! }
//! for value in [2, 1, 2] {
//!     table.add_right_value(value);
//! }
//! assert_eq!(table.non_equal_count(), 0);
//! ```

use std::fmt;

/// Per-value occurrence counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchCounts {
    /// Occurrences on the left/expected side.
    pub left: usize,
    /// Occurrences on the right/actual side.
    pub right: usize,
}

impl MatchCounts {
    fn is_balanced(self) -> bool {
        self.left == self.right
    }
}

/// Tallies left and right occurrences of each distinct value.
///
/// Lookups are linear scans with the equality predicate, so no hashing is needed
/// and any predicate works. Intended for test-sized data.
pub struct MatchTable<T, F = fn(&T, &T) -> bool> {
    equality: F,
    entries: Vec<(T, MatchCounts)>,
    non_equal_count: usize,
}

impl<T: PartialEq> MatchTable<T> {
    /// Table keyed by `PartialEq`.
    pub fn with_default() -> Self {
        Self::new(<T as PartialEq>::eq)
    }
}

impl<T, F> MatchTable<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    /// Empty table keyed by `equality`.
    pub fn new(equality: F) -> Self {
        Self {
            equality,
            entries: Vec::new(),
            non_equal_count: 0,
        }
    }

    /// Record one occurrence on the left side.
    pub fn add_left_value(&mut self, key: T) {
        self.add(key, 1, 0);
    }

    /// Record one occurrence on the right side.
    pub fn add_right_value(&mut self, key: T) {
        self.add(key, 0, 1);
    }

    /// Number of distinct values whose left and right counts currently differ.
    pub fn non_equal_count(&self) -> usize {
        self.non_equal_count
    }

    /// True when both sides hold the same multiset.
    pub fn is_balanced(&self) -> bool {
        self.non_equal_count == 0
    }

    /// Every distinct value with its counters, in first-seen order.
    pub fn items(&self) -> impl Iterator<Item = (&T, MatchCounts)> + '_ {
        self.entries.iter().map(|(value, counts)| (value, *counts))
    }

    /// Values whose counters differ.
    pub fn mismatches(&self) -> impl Iterator<Item = (&T, MatchCounts)> + '_ {
        self.items().filter(|(_, counts)| !counts.is_balanced())
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add(&mut self, key: T, left: usize, right: usize) {
        let equality = &self.equality;
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| equality(existing, &key))
        {
            Some((_, counts)) => {
                let was_balanced = counts.is_balanced();
                counts.left += left;
                counts.right += right;
                match (was_balanced, counts.is_balanced()) {
                    (true, false) => self.non_equal_count += 1,
                    (false, true) => self.non_equal_count -= 1,
                    _ => {}
                }
            }
            None => {
                self.entries.push((key, MatchCounts { left, right }));
                self.non_equal_count += 1;
            }
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for MatchTable<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchTable")
            .field("entries", &self.entries)
            .field("non_equal_count", &self.non_equal_count)
            .finish()
    }
}

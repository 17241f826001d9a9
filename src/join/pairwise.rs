//! Pairwise (all-pairs) covering.
//!
//! Computing minimal covering arrays is expensive, so tuples are built greedily:
//! every value pair of every source pair carries a usage score, and each new tuple
//! is assembled from the least used pairs until no pair with a score of zero
//! remains. The result is not minimal but stays far below the cross product for
//! more than two sources.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use super::{JoinError, JoinStrategy, validate_lengths};

/// Covers every pair of values across every pair of sources at least once.
#[derive(Debug, Default, Clone, Copy)]
pub struct PairwiseStrategy;

impl PairwiseStrategy {
    /// Lazily generate the covering tuples.
    pub fn generator(&self, lengths: &[usize]) -> Result<PairwiseGenerator, JoinError> {
        validate_lengths(lengths)?;
        Ok(PairwiseGenerator::new(lengths.to_vec()))
    }
}

impl JoinStrategy for PairwiseStrategy {
    fn name(&self) -> &'static str {
        "pairwise"
    }

    fn join(&self, lengths: &[usize]) -> Result<Vec<Vec<usize>>, JoinError> {
        Ok(self.generator(lengths)?.collect())
    }
}

/// Usage counters for the value pairs of two sources, stored for the lower-indexed
/// source first.
#[derive(Debug, Clone)]
struct ScoreTable {
    columns: usize,
    scores: Vec<u32>,
}

impl ScoreTable {
    fn new(rows: usize, columns: usize) -> Self {
        Self {
            columns,
            scores: vec![0; rows * columns],
        }
    }

    fn get(&self, row: usize, column: usize) -> u32 {
        self.scores[row * self.columns + column]
    }

    fn increment(&mut self, row: usize, column: usize) {
        self.scores[row * self.columns + column] += 1;
    }
}

/// Iterator over pairwise covering tuples.
#[derive(Debug, Clone)]
pub struct PairwiseGenerator {
    lengths: Vec<usize>,
    /// `tables[i][j]` for `i < j`, indexed by (value of source `i`, value of source `j`).
    tables: Vec<Vec<Option<ScoreTable>>>,
    emitted: usize,
    exhausted: bool,
}

struct Pick {
    score: u32,
    first_value: usize,
    second_source: usize,
    second_value: usize,
}

impl PairwiseGenerator {
    fn new(lengths: Vec<usize>) -> Self {
        let sources = lengths.len();
        let tables = (0..sources)
            .map(|i| {
                (0..sources)
                    .map(|j| (i < j).then(|| ScoreTable::new(lengths[i], lengths[j])))
                    .collect()
            })
            .collect();
        Self {
            lengths,
            tables,
            emitted: 0,
            exhausted: false,
        }
    }

    fn score(&self, first: usize, second: usize, first_value: usize, second_value: usize) -> u32 {
        let (i, j, a, b) = if first < second {
            (first, second, first_value, second_value)
        } else {
            (second, first, second_value, first_value)
        };
        self.tables[i][j]
            .as_ref()
            .map(|table| table.get(a, b))
            .unwrap_or(0)
    }

    /// Lowest-scored pair anchored at `first`, against any other source.
    fn best_pick(&self, first: usize, chosen: &[Option<usize>]) -> Option<Pick> {
        let mut best: Option<Pick> = None;
        for second in (0..self.lengths.len()).filter(|s| *s != first) {
            let candidates: Vec<usize> = match chosen[second] {
                Some(value) => vec![value],
                None => (0..self.lengths[second]).collect(),
            };
            for first_value in 0..self.lengths[first] {
                for &second_value in &candidates {
                    let score = self.score(first, second, first_value, second_value);
                    if best.as_ref().is_none_or(|b| score < b.score) {
                        best = Some(Pick {
                            score,
                            first_value,
                            second_source: second,
                            second_value,
                        });
                    }
                }
            }
        }
        best
    }

    fn next_tuple(&mut self) -> Option<Vec<usize>> {
        let sources = self.lengths.len();
        let mut chosen: Vec<Option<usize>> = vec![None; sources];
        let mut found_uncovered = false;

        // First pass only commits once an uncovered pair shows up, so remaining
        // uncovered pairs are found before slots get filled with covered ones.
        for fill in [false, true] {
            for first in 0..sources {
                if chosen[first].is_some() {
                    continue;
                }
                let Some(pick) = self.best_pick(first, &chosen) else {
                    continue;
                };
                if pick.score == 0 {
                    found_uncovered = true;
                }
                if found_uncovered || fill {
                    chosen[first] = Some(pick.first_value);
                    chosen[pick.second_source] = Some(pick.second_value);
                }
            }
            if !found_uncovered {
                return None;
            }
        }

        let tuple: Vec<usize> = chosen.into_iter().map(|v| v.unwrap_or(0)).collect();
        for i in 0..sources {
            for j in (i + 1)..sources {
                if let Some(table) = self.tables[i][j].as_mut() {
                    table.increment(tuple[i], tuple[j]);
                }
            }
        }
        Some(tuple)
    }
}

impl Iterator for PairwiseGenerator {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        // A single source has no pairs to cover: one tuple per value.
        let next = if self.lengths.len() == 1 {
            (self.emitted < self.lengths[0]).then(|| vec![self.emitted])
        } else {
            self.next_tuple()
        };
        match next {
            Some(_) => self.emitted += 1,
            None => self.exhausted = true,
        }
        next
    }
}

impl FusedIterator for PairwiseGenerator {}

/// A value pair missing from a set of tuples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UncoveredPair {
    /// Lower source position.
    pub first_source: usize,
    /// Value index within the first source.
    pub first_value: usize,
    /// Higher source position.
    pub second_source: usize,
    /// Value index within the second source.
    pub second_value: usize,
}

/// Every value pair of every source pair that no tuple covers.
pub fn uncovered_pairs(lengths: &[usize], tuples: &[Vec<usize>]) -> Vec<UncoveredPair> {
    let mut missing = Vec::new();
    for i in 0..lengths.len() {
        for j in (i + 1)..lengths.len() {
            let mut seen = vec![false; lengths[i] * lengths[j]];
            for tuple in tuples {
                if let (Some(&a), Some(&b)) = (tuple.get(i), tuple.get(j)) {
                    if a < lengths[i] && b < lengths[j] {
                        seen[a * lengths[j] + b] = true;
                    }
                }
            }
            for a in 0..lengths[i] {
                for b in 0..lengths[j] {
                    if !seen[a * lengths[j] + b] {
                        missing.push(UncoveredPair {
                            first_source: i,
                            first_value: a,
                            second_source: j,
                            second_value: b,
                        });
                    }
                }
            }
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::join::join_lengths;
    use crate::join::{JoinKind, join3};
    use proptest::prelude::*;

    #[test]
    fn three_binary_sources_cover_all_pairs_below_cross_product() {
        let rows = join3(&[0, 1], &['a', 'b'], &[false, true], JoinKind::Pairwise).unwrap();
        assert!(rows.len() < 8, "got {} rows", rows.len());

        let mut pairs = std::collections::HashSet::new();
        for (x, y, z) in &rows {
            pairs.insert(format!("0:{x}/1:{y}"));
            pairs.insert(format!("0:{x}/2:{z}"));
            pairs.insert(format!("1:{y}/2:{z}"));
        }
        assert_eq!(pairs.len(), 12);
    }

    #[test]
    fn known_tuple_sequence_for_three_binary_sources() {
        let tuples = PairwiseStrategy.join(&[2, 2, 2]).unwrap();
        assert_eq!(
            tuples,
            vec![
                vec![0, 0, 0],
                vec![0, 1, 1],
                vec![1, 0, 0],
                vec![1, 1, 1],
                vec![0, 0, 1],
                vec![0, 1, 0],
            ]
        );
    }

    #[test]
    fn two_sources_degrade_to_cross_product() {
        let tuples = PairwiseStrategy.join(&[2, 3]).unwrap();
        assert_eq!(tuples.len(), 6);
        assert!(uncovered_pairs(&[2, 3], &tuples).is_empty());
    }

    #[test]
    fn larger_domains_stay_well_below_cross_product() {
        let lengths = [3, 3, 3, 3, 3];
        let tuples = PairwiseStrategy.join(&lengths).unwrap();
        assert!(uncovered_pairs(&lengths, &tuples).is_empty());
        assert!(tuples.len() < 243 / 4, "got {} tuples", tuples.len());
    }

    #[test]
    fn generator_is_lazy_and_fused() {
        let mut generator = PairwiseStrategy.generator(&[2, 2]).unwrap();
        assert_eq!(generator.next(), Some(vec![0, 0]));
        assert_eq!(generator.by_ref().count(), 3);
        assert_eq!(generator.next(), None);
    }

    #[test]
    fn single_source_yields_each_value_once() {
        let tuples = PairwiseStrategy.join(&[3]).unwrap();
        assert_eq!(tuples, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn uncovered_pairs_lists_gaps() {
        let missing = uncovered_pairs(&[2, 2], &[vec![0, 0], vec![1, 1]]);
        assert_eq!(missing.len(), 2);
        assert_eq!(
            missing[0],
            UncoveredPair {
                first_source: 0,
                first_value: 0,
                second_source: 1,
                second_value: 1,
            }
        );
    }

    proptest! {
        #[test]
        fn every_pair_is_covered(lengths in join_lengths(2..=5, 1..=4)) {
            let tuples = PairwiseStrategy.join(&lengths).unwrap();
            prop_assert!(uncovered_pairs(&lengths, &tuples).is_empty());

            let product: usize = lengths.iter().product();
            prop_assert!(tuples.len() <= product);
        }
    }
}

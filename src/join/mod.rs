//! Join strategies for data-driven tests.
//!
//! A strategy sees only the lengths of its sources and yields index tuples, one
//! index per source. [`join_rows`], [`join2`] and [`join3`] turn those tuples back
//! into values.
//!
//! # Example
//!
//! ```rust
//! use datajoin_testing::join::{JoinKind, join2};
//!
//! let rows = join2(&[1, 2, 3], &["a", "b"], JoinKind::Sequential).unwrap();
//! assert_eq!(rows, vec![(1, "a"), (2, "b")]);
//! ```

mod combinatorial;
mod pairwise;
mod sequential;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::VerifyError;

pub use combinatorial::CombinatorialStrategy;
pub use pairwise::{PairwiseGenerator, PairwiseStrategy, UncoveredPair, uncovered_pairs};
pub use sequential::SequentialStrategy;

/// Join argument errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// No sources were supplied.
    #[error("at least one data source is required")]
    NoSources,
    /// A source has no values, so no tuple can be produced.
    #[error("data source {index} is empty")]
    EmptySource {
        /// Position of the empty source.
        index: usize,
    },
    /// The cross product of the source lengths does not fit in `usize`.
    #[error("the cross product of {sources} data sources is too large")]
    ProductOverflow {
        /// Number of sources.
        sources: usize,
    },
}

impl From<JoinError> for VerifyError {
    fn from(error: JoinError) -> Self {
        VerifyError::invalid_input("sources", error.to_string())
    }
}

/// Combines N sources into index tuples.
pub trait JoinStrategy: fmt::Debug + Send + Sync {
    /// Stable strategy name.
    fn name(&self) -> &'static str;

    /// Produce index tuples for sources of the given lengths.
    fn join(&self, lengths: &[usize]) -> Result<Vec<Vec<usize>>, JoinError>;
}

/// Selects one of the built-in strategy singletons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    /// Full cross product.
    #[default]
    Combinatorial,
    /// Positional zip, truncated to the shortest source.
    Sequential,
    /// Covering of every value pair across every pair of sources.
    Pairwise,
}

static COMBINATORIAL: CombinatorialStrategy = CombinatorialStrategy;
static SEQUENTIAL: SequentialStrategy = SequentialStrategy;
static PAIRWISE: PairwiseStrategy = PairwiseStrategy;

impl JoinKind {
    /// All built-in kinds.
    pub const ALL: [JoinKind; 3] = [Self::Combinatorial, Self::Sequential, Self::Pairwise];

    /// The strategy singleton for this kind.
    pub fn strategy(self) -> &'static dyn JoinStrategy {
        match self {
            Self::Combinatorial => &COMBINATORIAL,
            Self::Sequential => &SEQUENTIAL,
            Self::Pairwise => &PAIRWISE,
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.strategy().name())
    }
}

/// Reject joins that cannot produce any tuple.
pub(crate) fn validate_lengths(lengths: &[usize]) -> Result<(), JoinError> {
    if lengths.is_empty() {
        return Err(JoinError::NoSources);
    }
    match lengths.iter().position(|len| *len == 0) {
        Some(index) => Err(JoinError::EmptySource { index }),
        None => Ok(()),
    }
}

fn join_indices(lengths: &[usize], kind: JoinKind) -> Result<Vec<Vec<usize>>, JoinError> {
    let strategy = kind.strategy();
    let tuples = strategy.join(lengths)?;
    tracing::debug!(
        strategy = strategy.name(),
        sources = lengths.len(),
        tuples = tuples.len(),
        "joined data sources"
    );
    Ok(tuples)
}

/// Join homogeneous sources into rows of values.
pub fn join_rows<T: Clone>(sources: &[Vec<T>], kind: JoinKind) -> Result<Vec<Vec<T>>, JoinError> {
    let lengths: Vec<usize> = sources.iter().map(Vec::len).collect();
    let tuples = join_indices(&lengths, kind)?;
    Ok(tuples
        .into_iter()
        .map(|indices| {
            indices
                .into_iter()
                .zip(sources)
                .map(|(index, source)| source[index].clone())
                .collect()
        })
        .collect())
}

/// Join two sources.
pub fn join2<A, B>(first: &[A], second: &[B], kind: JoinKind) -> Result<Vec<(A, B)>, JoinError>
where
    A: Clone,
    B: Clone,
{
    let tuples = join_indices(&[first.len(), second.len()], kind)?;
    Ok(tuples
        .iter()
        .map(|t| (first[t[0]].clone(), second[t[1]].clone()))
        .collect())
}

/// Join three sources.
pub fn join3<A, B, C>(
    first: &[A],
    second: &[B],
    third: &[C],
    kind: JoinKind,
) -> Result<Vec<(A, B, C)>, JoinError>
where
    A: Clone,
    B: Clone,
    C: Clone,
{
    let tuples = join_indices(&[first.len(), second.len(), third.len()], kind)?;
    Ok(tuples
        .iter()
        .map(|t| {
            (
                first[t[0]].clone(),
                second[t[1]].clone(),
                third[t[2]].clone(),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::join::join_lengths;
    use proptest::prelude::*;

    #[test]
    fn zero_sources_is_rejected_by_every_strategy() {
        for kind in JoinKind::ALL {
            assert_eq!(kind.strategy().join(&[]), Err(JoinError::NoSources));
        }
    }

    #[test]
    fn empty_source_is_rejected_by_every_strategy() {
        for kind in JoinKind::ALL {
            assert_eq!(
                join2::<i32, i32>(&[1, 2], &[], kind),
                Err(JoinError::EmptySource { index: 1 })
            );
        }
    }

    #[test]
    fn single_source_is_identity() {
        let source = vec![vec!['x', 'y', 'z']];
        for kind in JoinKind::ALL {
            let rows = join_rows(&source, kind).expect("single source should join");
            assert_eq!(rows, vec![vec!['x'], vec!['y'], vec!['z']], "{kind}");
        }
    }

    #[test]
    fn join_error_maps_to_invalid_input() {
        let error: VerifyError = JoinError::EmptySource { index: 2 }.into();
        assert!(error.is_invalid_input());
    }

    #[test]
    fn kind_names_round_trip_through_serde() {
        let json = serde_json::to_string(&JoinKind::Pairwise).expect("kind should serialize");
        assert_eq!(json, "\"pairwise\"");
        assert_eq!(JoinKind::Pairwise.to_string(), "pairwise");
    }

    proptest! {
        #[test]
        fn every_tuple_indexes_inside_its_sources(lengths in join_lengths(1..=4, 1..=4)) {
            for kind in JoinKind::ALL {
                let tuples = kind.strategy().join(&lengths).expect("valid lengths should join");
                prop_assert!(!tuples.is_empty());
                for tuple in &tuples {
                    prop_assert_eq!(tuple.len(), lengths.len());
                    for (index, len) in tuple.iter().zip(&lengths) {
                        prop_assert!(index < len);
                    }
                }
            }
        }
    }
}

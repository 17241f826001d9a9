//! Positional zip of all sources.

use super::{JoinError, JoinStrategy, validate_lengths};

/// Tuple `i` takes the `i`-th value of every source. Longer sources are truncated
/// to the shortest one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialStrategy;

impl JoinStrategy for SequentialStrategy {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn join(&self, lengths: &[usize]) -> Result<Vec<Vec<usize>>, JoinError> {
        validate_lengths(lengths)?;
        let shortest = lengths.iter().copied().min().unwrap_or(0);
        Ok((0..shortest).map(|i| vec![i; lengths.len()]).collect())
    }
}

//! Full cross product.

use super::{JoinError, JoinStrategy, validate_lengths};

/// Every combination of one value per source, last source varying fastest.
#[derive(Debug, Default, Clone, Copy)]
pub struct CombinatorialStrategy;

impl CombinatorialStrategy {
    /// Number of tuples [`join`](JoinStrategy::join) would produce, without
    /// producing them.
    pub fn tuple_count(&self, lengths: &[usize]) -> Result<usize, JoinError> {
        validate_lengths(lengths)?;
        lengths
            .iter()
            .try_fold(1usize, |total, len| total.checked_mul(*len))
            .ok_or(JoinError::ProductOverflow {
                sources: lengths.len(),
            })
    }
}

impl JoinStrategy for CombinatorialStrategy {
    fn name(&self) -> &'static str {
        "combinatorial"
    }

    fn join(&self, lengths: &[usize]) -> Result<Vec<Vec<usize>>, JoinError> {
        let total = self.tuple_count(lengths)?;
        let mut tuples = Vec::with_capacity(total);
        let mut indices = vec![0usize; lengths.len()];
        loop {
            tuples.push(indices.clone());

            // Odometer increment from the last position.
            let mut position = lengths.len();
            loop {
                if position == 0 {
                    return Ok(tuples);
                }
                position -= 1;
                indices[position] += 1;
                if indices[position] < lengths[position] {
                    break;
                }
                indices[position] = 0;
            }
        }
    }
}

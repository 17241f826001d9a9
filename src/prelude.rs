//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use datajoin_testing::prelude::*;
//!
//! let rows = join2(&[1, 2], &["a", "b"], JoinKind::Combinatorial).unwrap();
//! assert_count(4, &rows);
//! ```

// Re-export proptest
pub use proptest::prelude::*;

pub use crate::comparison::{ComparerRegistry, SortOrder};
pub use crate::config::VerifyConfig;
pub use crate::error::{VerifyError, VerifyResult};
pub use crate::failure::{AssertionFailure, AssertionFailureBuilder};
pub use crate::generators::join::{data_sources, join_kind, join_lengths};
pub use crate::generators::sequences::{sort_order, sorted_vec, unique_vec};
pub use crate::join::{JoinError, JoinKind, JoinStrategy, join_rows, join2, join3};
pub use crate::match_table::MatchTable;
pub use crate::retry::Retry;
pub use crate::sequence::{
    Verifier, assert_contains, assert_count, assert_distinct, assert_does_not_contain,
    assert_elements_equal, assert_elements_equal_ignoring_order, assert_is_empty,
    assert_is_not_empty, assert_sorted, verify_contains, verify_count, verify_distinct,
    verify_does_not_contain, verify_elements_equal, verify_elements_equal_ignoring_order,
    verify_is_empty, verify_is_not_empty, verify_sorted,
};

//! # datajoin-testing
//!
//! `datajoin-testing` provides the two halves of data-driven testing:
//! - `join`: combine N data sources into test tuples (combinatorial, sequential, pairwise)
//! - `sequence`: assertions over sequences (count, distinct, sorted, membership, equality)
//! - `retry`: poll a condition until it holds
//! - `generators`: proptest strategies for join inputs and sequences
//!
//! Assertions return [`error::VerifyResult`]; the `assert_*` forms panic with the
//! rendered [`failure::AssertionFailure`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

pub mod comparison;
pub mod config;
pub mod error;
pub mod failure;
pub mod generators;
pub mod join;
pub mod match_table;
pub mod prelude;
pub mod retry;
pub mod sequence;

/// Re-export `proptest` for convenience.
pub use proptest;

//! Proptest strategies for data sources and sequences.

pub mod join;
pub mod sequences;

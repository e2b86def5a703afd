//! Predicate compilation and result-set evaluation.

/// Criteria-to-predicate compiler.
pub mod compile;
/// Snapshot evaluation and result sets.
pub mod query;

//! In-memory record store with atomic snapshot replacement.

/// Helper index aliases.
pub mod indices;
/// School store and immutable snapshots.
pub mod store;

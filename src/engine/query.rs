//! Applies a compiled predicate to a store snapshot.

use crate::{core::store::StoreSnapshot, school::SchoolRecord, types::SchoolId};

use super::compile::Predicate;

/// Ordered subset of record ids passing the current predicate.
///
/// Fully derived: recomputed whole on every criteria or store change, never
/// incrementally patched. Preserves store load order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSet {
    ids: Vec<SchoolId>,
}

impl ResultSet {
    /// Matching ids in store order.
    pub fn ids(&self) -> &[SchoolId] {
        &self.ids
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True when `id` is in the result.
    pub fn contains(&self, id: SchoolId) -> bool {
        self.ids.contains(&id)
    }

    /// Materializes the matching records against the snapshot they were
    /// evaluated from.
    pub fn records<'a>(&self, snapshot: &'a StoreSnapshot) -> Vec<&'a SchoolRecord> {
        self.ids
            .iter()
            .filter_map(|id| snapshot.get(*id).ok())
            .collect()
    }
}

/// Evaluates `predicate` over every record in `snapshot`, in store order.
///
/// Atomic with respect to one criteria version and one snapshot: the caller
/// takes the snapshot reference once, so a concurrent store replacement
/// cannot affect an in-flight evaluation.
pub fn evaluate(snapshot: &StoreSnapshot, predicate: &Predicate) -> ResultSet {
    let ids = snapshot
        .all()
        .filter(|rec| predicate.matches(rec))
        .map(|rec| rec.id)
        .collect();

    ResultSet { ids }
}

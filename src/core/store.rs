use std::sync::Arc;

use hashbrown::HashMap;

use crate::{
    school::SchoolRecord,
    types::{SchoolId, SchoolLevel},
};

use super::indices::VecIndex;

/// Store lookup and load failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Lookup of a nonexistent school id.
    MissingSchool(SchoolId),
    /// A load was handed two records with the same id.
    DuplicateId(SchoolId),
}

/// Immutable view of the store contents at one point in time.
///
/// Evaluation always runs against a single snapshot reference, so a store
/// replacement mid-evaluation can never mix two record collections.
#[derive(Debug, Default)]
pub struct StoreSnapshot {
    records: HashMap<SchoolId, SchoolRecord>,
    order: Vec<SchoolId>,
    by_level: VecIndex<SchoolLevel>,
}

impl StoreSnapshot {
    fn build(records: Vec<SchoolRecord>) -> Result<Self, StoreError> {
        let mut snapshot = Self::default();

        for rec in records {
            if snapshot.records.contains_key(&rec.id) {
                return Err(StoreError::DuplicateId(rec.id));
            }
            snapshot.order.push(rec.id);
            snapshot.by_level.entry(rec.level).or_default().push(rec.id);
            snapshot.records.insert(rec.id, rec);
        }

        Ok(snapshot)
    }

    /// Record by id, or [`StoreError::MissingSchool`].
    pub fn get(&self, id: SchoolId) -> Result<&SchoolRecord, StoreError> {
        self.records.get(&id).ok_or(StoreError::MissingSchool(id))
    }

    /// All records in load order.
    pub fn all(&self) -> impl Iterator<Item = &SchoolRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Ids in load order.
    pub fn ordered_ids(&self) -> &[SchoolId] {
        &self.order
    }

    /// Records of one level, in load order.
    pub fn by_level(&self, level: SchoolLevel) -> Vec<&SchoolRecord> {
        self.by_level
            .get(&level)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Authoritative school collection for one session.
///
/// Individual records are never mutated after load; a feed refresh replaces
/// the whole snapshot and publishes the new one atomically.
#[derive(Debug, Default)]
pub struct SchoolStore {
    snapshot: Arc<StoreSnapshot>,
}

impl SchoolStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `records`.
    pub fn with_records(records: Vec<SchoolRecord>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.load(records)?;
        Ok(store)
    }

    /// Replaces the entire contents atomically and returns the new size.
    ///
    /// The snapshot is built off to the side and swapped in whole, so readers
    /// holding the previous snapshot never observe a partial load.
    pub fn load(&mut self, records: Vec<SchoolRecord>) -> Result<usize, StoreError> {
        let snapshot = StoreSnapshot::build(records)?;
        let len = snapshot.len();
        self.snapshot = Arc::new(snapshot);
        Ok(len)
    }

    /// Current snapshot reference.
    pub fn snapshot(&self) -> Arc<StoreSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Record by id from the current snapshot.
    pub fn get_cloned(&self, id: SchoolId) -> Result<SchoolRecord, StoreError> {
        self.snapshot.get(id).cloned()
    }

    /// Number of records in the current snapshot.
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    /// True when the current snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}

use hashbrown::HashMap;

use crate::types::SchoolId;

/// Map from index key to school ids, in insertion order.
pub type VecIndex<K> = HashMap<K, Vec<SchoolId>>;

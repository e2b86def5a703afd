//! Session event stream payloads.

use crate::{
    school::GeoPoint,
    types::{Revision, SchoolId},
};

/// Events emitted from the single-writer session loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// The visible marker set changed; `ids` is the new result in store order.
    ResultsChanged {
        /// Monotonic evaluation counter, lets listeners drop stale results.
        revision: Revision,
        /// Matching school ids, in store order.
        ids: Vec<SchoolId>,
    },
    /// The record store was atomically replaced by a feed refresh.
    StoreReplaced {
        /// Number of records in the new snapshot.
        total: usize,
    },
    /// The selected marker changed.
    SelectionChanged {
        /// Selected school, or `None` when deselected.
        id: Option<SchoolId>,
    },
    /// The map viewport moved.
    ViewportChanged {
        /// New map center.
        center: GeoPoint,
        /// New zoom level.
        zoom: f64,
        /// Display scale denominator derived from the zoom.
        scale: u32,
    },
}

//! Filter evaluation engine behind the EduView school map.
//!
//! Holds an immutable collection of school records, compiles the sidebar's
//! filter selections into a composite predicate, and publishes the visible
//! marker set to subscribers whenever the criteria or the store change.
//!
//! # Examples
//!
//! Synchronous usage with [`core::store::SchoolStore`]:
//! ```
//! use eduview::{
//!     core::store::SchoolStore,
//!     criteria::FilterCriteria,
//!     engine::{compile::compile, query::evaluate},
//!     feed,
//!     types::BuildingCondition,
//! };
//!
//! let store = SchoolStore::with_records(feed::sample_schools()).expect("load");
//! let mut criteria = FilterCriteria::new();
//! criteria
//!     .set_field(
//!         eduview::criteria::FilterKey::Condition,
//!         Some(eduview::criteria::FilterValue::Condition(BuildingCondition::RusakBerat)),
//!     )
//!     .expect("set condition");
//!
//! let results = evaluate(&store.snapshot(), &compile(&criteria));
//! assert_eq!(results.ids(), &[4]);
//! ```
//!
//! Session usage with the single-writer runtime:
//! ```
//! use eduview::{
//!     core::store::SchoolStore,
//!     criteria::FilterCriteria,
//!     feed,
//!     runtime::handle::{spawn_eduview, SessionConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = SchoolStore::with_records(feed::sample_schools()).expect("load");
//! let handle = spawn_eduview(store, FilterCriteria::new(), SessionConfig::default());
//! handle.set_search("negeri").await.expect("search");
//! let (_, results) = handle.results().await.expect("results");
//! assert_eq!(results.ids(), &[1, 2, 4]);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// In-memory record store and snapshot helpers.
pub mod core;
/// Filter criteria model and batched mutation patches.
pub mod criteria;
/// Predicate compiler and query evaluation.
pub mod engine;
/// Record feed decoding with per-record skip reporting.
pub mod feed;
/// Single-writer session runtime and events.
pub mod runtime;
/// School domain records and facility flags.
pub mod school;
/// Shared primitive types and enums.
pub mod types;

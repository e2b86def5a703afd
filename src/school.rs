//! School domain record and facility flags.

use serde::{Deserialize, Serialize};

use crate::types::{
    Accreditation, BuildingCondition, DistanceBand, Facility, Ownership, Priority, ProjectStatus,
    RecommendationKind, RoadCondition, SchoolId, SchoolLevel,
};

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

/// Presence flags for the four tracked facilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FacilitySet {
    /// Library present.
    pub perpustakaan: bool,
    /// Computer lab present.
    pub lab_komputer: bool,
    /// Adequate toilets present.
    pub toilet_layak: bool,
    /// Internet access present.
    pub akses_internet: bool,
}

impl FacilitySet {
    /// Returns the presence flag for one facility.
    pub fn has(&self, facility: Facility) -> bool {
        match facility {
            Facility::Perpustakaan => self.perpustakaan,
            Facility::LabKomputer => self.lab_komputer,
            Facility::ToiletLayak => self.toilet_layak,
            Facility::AksesInternet => self.akses_internet,
        }
    }
}

/// Fully materialized school record as served by the record feed.
///
/// Records are immutable once loaded into a store snapshot; a data refresh
/// replaces the whole snapshot rather than patching individual records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRecord {
    /// Stable identifier, unique within one store snapshot.
    pub id: SchoolId,
    /// Display name, also the target of free-text search.
    pub name: String,
    /// Map position.
    pub position: GeoPoint,
    /// School level.
    pub level: SchoolLevel,
    /// Ownership status.
    pub ownership: Ownership,
    /// Building condition.
    pub condition: BuildingCondition,
    /// Accreditation grade.
    pub accreditation: Accreditation,
    /// Suitability score in `0..=100`.
    pub score: u8,
    /// Free-text recommendation note, may be empty.
    #[serde(default)]
    pub recommendation: String,
    /// Facility presence flags.
    pub facilities: FacilitySet,
    /// Distance band to the nearest main road, when surveyed.
    #[serde(default)]
    pub distance: Option<DistanceBand>,
    /// Access road condition, when surveyed.
    #[serde(default)]
    pub road: Option<RoadCondition>,
    /// Recommended intervention kind, when assessed.
    #[serde(default)]
    pub recommendation_kind: Option<RecommendationKind>,
    /// Intervention priority, when assessed.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Construction project status, when a project exists.
    #[serde(default)]
    pub project: Option<ProjectStatus>,
}

/// Upper bound of the suitability score scale.
pub const SCORE_MAX: u8 = 100;

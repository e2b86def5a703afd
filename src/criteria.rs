//! Filter criteria model: the current set of user-selected constraints.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::types::{
    Accreditation, BuildingCondition, DistanceBand, Facility, Ownership, Priority, ProjectStatus,
    RecommendationKind, RoadCondition, SchoolLevel,
};

/// Criteria mutations that violate an invariant are rejected with this error
/// and leave the criteria untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    /// `min > max` or a bound outside `0..=100`.
    InvalidScoreRange {
        /// Rejected lower bound.
        min: u8,
        /// Rejected upper bound.
        max: u8,
    },
    /// A value of the wrong kind was supplied for a single-select key.
    ValueMismatch {
        /// Key the value was supplied for.
        key: FilterKey,
    },
}

/// The nine single-select filter keys exposed by the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKey {
    /// School level (`jenjang`).
    Level,
    /// Ownership status (`status`).
    Ownership,
    /// Building condition (`kondisi`).
    Condition,
    /// Accreditation grade (`akreditasi`).
    Accreditation,
    /// Distance band to a main road (`jarak`).
    Distance,
    /// Access road condition (`kondisiJalan`).
    Road,
    /// Recommendation kind (`jenisRekomendasi`).
    Recommendation,
    /// Intervention priority (`prioritas`).
    Priority,
    /// Project status (`statusProyek`).
    Project,
}

impl FilterKey {
    /// All single-select keys in a fixed order, used for deterministic
    /// clause emission.
    pub const ALL: [FilterKey; 9] = [
        FilterKey::Level,
        FilterKey::Ownership,
        FilterKey::Condition,
        FilterKey::Accreditation,
        FilterKey::Distance,
        FilterKey::Road,
        FilterKey::Recommendation,
        FilterKey::Priority,
        FilterKey::Project,
    ];
}

/// A selected value for one single-select key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterValue {
    /// Selected school level.
    Level(SchoolLevel),
    /// Selected ownership.
    Ownership(Ownership),
    /// Selected building condition.
    Condition(BuildingCondition),
    /// Selected accreditation grade.
    Accreditation(Accreditation),
    /// Selected distance band.
    Distance(DistanceBand),
    /// Selected road condition.
    Road(RoadCondition),
    /// Selected recommendation kind.
    Recommendation(RecommendationKind),
    /// Selected priority.
    Priority(Priority),
    /// Selected project status.
    Project(ProjectStatus),
}

impl FilterValue {
    /// The key this value belongs to.
    pub fn key(&self) -> FilterKey {
        match self {
            FilterValue::Level(_) => FilterKey::Level,
            FilterValue::Ownership(_) => FilterKey::Ownership,
            FilterValue::Condition(_) => FilterKey::Condition,
            FilterValue::Accreditation(_) => FilterKey::Accreditation,
            FilterValue::Distance(_) => FilterKey::Distance,
            FilterValue::Road(_) => FilterKey::Road,
            FilterValue::Recommendation(_) => FilterKey::Recommendation,
            FilterValue::Priority(_) => FilterKey::Priority,
            FilterValue::Project(_) => FilterKey::Project,
        }
    }
}

/// Inclusive suitability score window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    min: u8,
    max: u8,
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

impl ScoreRange {
    /// Builds a validated range.
    pub fn new(min: u8, max: u8) -> Result<Self, CriteriaError> {
        if min > max || max > 100 {
            return Err(CriteriaError::InvalidScoreRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> u8 {
        self.max
    }

    /// True when `score` falls inside the window, bounds included.
    pub fn contains(&self, score: u8) -> bool {
        (self.min..=self.max).contains(&score)
    }

    /// True when the window is the full default scale.
    pub fn is_full(&self) -> bool {
        *self == Self::default()
    }
}

/// Mutable per-session constraint state.
///
/// Every mutation either succeeds and is immediately observable, or is
/// rejected with [`CriteriaError`] leaving all fields unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    level: Option<SchoolLevel>,
    ownership: Option<Ownership>,
    condition: Option<BuildingCondition>,
    accreditation: Option<Accreditation>,
    distance: Option<DistanceBand>,
    road: Option<RoadCondition>,
    recommendation: Option<RecommendationKind>,
    priority: Option<Priority>,
    project: Option<ProjectStatus>,
    required: HashSet<Facility>,
    score: ScoreRange,
    search: String,
}

impl FilterCriteria {
    /// Empty criteria: no constraints, range `[0, 100]`, empty search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (`Some`) or clears (`None`) one single-select key.
    ///
    /// Rejects a value whose kind does not match `key`.
    pub fn set_field(
        &mut self,
        key: FilterKey,
        value: Option<FilterValue>,
    ) -> Result<(), CriteriaError> {
        match (key, value) {
            (FilterKey::Level, Some(FilterValue::Level(x))) => self.level = Some(x),
            (FilterKey::Level, None) => self.level = None,
            (FilterKey::Ownership, Some(FilterValue::Ownership(x))) => self.ownership = Some(x),
            (FilterKey::Ownership, None) => self.ownership = None,
            (FilterKey::Condition, Some(FilterValue::Condition(x))) => self.condition = Some(x),
            (FilterKey::Condition, None) => self.condition = None,
            (FilterKey::Accreditation, Some(FilterValue::Accreditation(x))) => {
                self.accreditation = Some(x)
            }
            (FilterKey::Accreditation, None) => self.accreditation = None,
            (FilterKey::Distance, Some(FilterValue::Distance(x))) => self.distance = Some(x),
            (FilterKey::Distance, None) => self.distance = None,
            (FilterKey::Road, Some(FilterValue::Road(x))) => self.road = Some(x),
            (FilterKey::Road, None) => self.road = None,
            (FilterKey::Recommendation, Some(FilterValue::Recommendation(x))) => {
                self.recommendation = Some(x)
            }
            (FilterKey::Recommendation, None) => self.recommendation = None,
            (FilterKey::Priority, Some(FilterValue::Priority(x))) => self.priority = Some(x),
            (FilterKey::Priority, None) => self.priority = None,
            (FilterKey::Project, Some(FilterValue::Project(x))) => self.project = Some(x),
            (FilterKey::Project, None) => self.project = None,
            _ => return Err(CriteriaError::ValueMismatch { key }),
        }

        Ok(())
    }

    /// Current selection for one single-select key.
    pub fn selected(&self, key: FilterKey) -> Option<FilterValue> {
        match key {
            FilterKey::Level => self.level.map(FilterValue::Level),
            FilterKey::Ownership => self.ownership.map(FilterValue::Ownership),
            FilterKey::Condition => self.condition.map(FilterValue::Condition),
            FilterKey::Accreditation => self.accreditation.map(FilterValue::Accreditation),
            FilterKey::Distance => self.distance.map(FilterValue::Distance),
            FilterKey::Road => self.road.map(FilterValue::Road),
            FilterKey::Recommendation => self.recommendation.map(FilterValue::Recommendation),
            FilterKey::Priority => self.priority.map(FilterValue::Priority),
            FilterKey::Project => self.project.map(FilterValue::Project),
        }
    }

    /// Marks one facility as required (`true`) or unconstrained (`false`).
    pub fn set_facility_required(&mut self, facility: Facility, required: bool) {
        if required {
            self.required.insert(facility);
        } else {
            self.required.remove(&facility);
        }
    }

    /// True when the facility is currently required.
    pub fn is_facility_required(&self, facility: Facility) -> bool {
        self.required.contains(&facility)
    }

    /// Required facilities in [`Facility::ALL`] order.
    pub fn required_facilities(&self) -> Vec<Facility> {
        Facility::ALL
            .into_iter()
            .filter(|f| self.required.contains(f))
            .collect()
    }

    /// Replaces the score window, rejecting an invalid range.
    pub fn set_score_range(&mut self, min: u8, max: u8) -> Result<(), CriteriaError> {
        self.score = ScoreRange::new(min, max)?;
        Ok(())
    }

    /// Current score window.
    pub fn score_range(&self) -> ScoreRange {
        self.score
    }

    /// Replaces the free-text search token after trimming.
    pub fn set_search_text(&mut self, token: &str) {
        self.search = token.trim().to_string();
    }

    /// Current trimmed search token.
    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// Restores the exact default snapshot.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when no constraint is active.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Sparse criteria mutation where each `Some` field overwrites session state.
///
/// One logical UI action (a filter panel "apply", a reset button) collapses
/// into a single patch so the predicate is recompiled once, not per field.
/// For single-select keys the outer `Option` means "touch this key" and the
/// inner one means set versus clear.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CriteriaPatch {
    /// Restore defaults before applying the remaining fields.
    pub reset: bool,
    /// Optional change to the level selection.
    pub level: Option<Option<SchoolLevel>>,
    /// Optional change to the ownership selection.
    pub ownership: Option<Option<Ownership>>,
    /// Optional change to the condition selection.
    pub condition: Option<Option<BuildingCondition>>,
    /// Optional change to the accreditation selection.
    pub accreditation: Option<Option<Accreditation>>,
    /// Optional change to the distance selection.
    pub distance: Option<Option<DistanceBand>>,
    /// Optional change to the road condition selection.
    pub road: Option<Option<RoadCondition>>,
    /// Optional change to the recommendation kind selection.
    pub recommendation: Option<Option<RecommendationKind>>,
    /// Optional change to the priority selection.
    pub priority: Option<Option<Priority>>,
    /// Optional change to the project status selection.
    pub project: Option<Option<ProjectStatus>>,
    /// Facility requirement toggles, applied in order.
    pub facilities: Vec<(Facility, bool)>,
    /// Optional replacement score window as `(min, max)`.
    pub score: Option<(u8, u8)>,
    /// Optional replacement search token.
    pub search: Option<String>,
}

impl CriteriaPatch {
    /// Returns true when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// A patch that only restores defaults.
    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::default()
        }
    }

    /// Applies this patch to `criteria` all-or-nothing: the patch is
    /// validated up front, so a rejected patch leaves the criteria unchanged.
    pub fn apply_to(&self, criteria: &mut FilterCriteria) -> Result<(), CriteriaError> {
        // Only the score window can be invalid; validate before any write.
        let score = self.score.map(|(min, max)| ScoreRange::new(min, max)).transpose()?;

        if self.reset {
            criteria.reset();
        }

        if let Some(v) = self.level {
            criteria.level = v;
        }
        if let Some(v) = self.ownership {
            criteria.ownership = v;
        }
        if let Some(v) = self.condition {
            criteria.condition = v;
        }
        if let Some(v) = self.accreditation {
            criteria.accreditation = v;
        }
        if let Some(v) = self.distance {
            criteria.distance = v;
        }
        if let Some(v) = self.road {
            criteria.road = v;
        }
        if let Some(v) = self.recommendation {
            criteria.recommendation = v;
        }
        if let Some(v) = self.priority {
            criteria.priority = v;
        }
        if let Some(v) = self.project {
            criteria.project = v;
        }
        for (facility, required) in &self.facilities {
            criteria.set_facility_required(*facility, *required);
        }
        if let Some(score) = score {
            criteria.score = score;
        }
        if let Some(search) = &self.search {
            criteria.set_search_text(search);
        }

        Ok(())
    }
}

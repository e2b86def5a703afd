//! Turns [`FilterCriteria`] into a composite record predicate.

use crate::{
    criteria::{FilterCriteria, FilterKey, FilterValue, ScoreRange},
    school::SchoolRecord,
    types::Facility,
};

/// One conjunct of a compiled predicate.
#[derive(Debug, Clone, PartialEq)]
enum Clause {
    /// Record field equals the selected value. Records without a value for an
    /// optional field fail an active constraint on it.
    Field(FilterValue),
    /// Facility presence flag must be set.
    Facility(Facility),
    /// Score inside the window, bounds inclusive.
    Score(ScoreRange),
    /// Lowercased token must appear in the lowercased record name.
    Name(String),
}

impl Clause {
    fn matches(&self, rec: &SchoolRecord) -> bool {
        match self {
            Clause::Field(FilterValue::Level(v)) => rec.level == *v,
            Clause::Field(FilterValue::Ownership(v)) => rec.ownership == *v,
            Clause::Field(FilterValue::Condition(v)) => rec.condition == *v,
            Clause::Field(FilterValue::Accreditation(v)) => rec.accreditation == *v,
            Clause::Field(FilterValue::Distance(v)) => rec.distance == Some(*v),
            Clause::Field(FilterValue::Road(v)) => rec.road == Some(*v),
            Clause::Field(FilterValue::Recommendation(v)) => {
                rec.recommendation_kind == Some(*v)
            }
            Clause::Field(FilterValue::Priority(v)) => rec.priority == Some(*v),
            Clause::Field(FilterValue::Project(v)) => rec.project == Some(*v),
            Clause::Facility(f) => rec.facilities.has(*f),
            Clause::Score(range) => range.contains(rec.score),
            Clause::Name(token) => rec.name.to_lowercase().contains(token),
        }
    }
}

/// Compiled conjunction of all active constraints.
///
/// Pure function of the criteria it was compiled from: compiling identical
/// criteria twice classifies every record identically.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// True when `rec` passes every active constraint.
    pub fn matches(&self, rec: &SchoolRecord) -> bool {
        self.clauses.iter().all(|clause| clause.matches(rec))
    }

    /// True when no constraint is active and every record passes.
    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Compiles `criteria` into a [`Predicate`]. Pure and deterministic.
///
/// Unset single-selects, unrequired facilities, the full `[0, 100]` score
/// window and an empty search token contribute no clause.
pub fn compile(criteria: &FilterCriteria) -> Predicate {
    let mut clauses = Vec::new();

    for key in FilterKey::ALL {
        if let Some(value) = criteria.selected(key) {
            clauses.push(Clause::Field(value));
        }
    }

    for facility in criteria.required_facilities() {
        clauses.push(Clause::Facility(facility));
    }

    let range = criteria.score_range();
    if !range.is_full() {
        clauses.push(Clause::Score(range));
    }

    let token = criteria.search_text();
    if !token.is_empty() {
        clauses.push(Clause::Name(token.to_lowercase()));
    }

    Predicate { clauses }
}

use proptest::prelude::*;

use eduview::{
    core::store::SchoolStore,
    criteria::{FilterCriteria, FilterKey, FilterValue},
    engine::{compile::compile, query::evaluate},
    school::{FacilitySet, GeoPoint, SchoolRecord},
    types::{
        Accreditation, BuildingCondition, Facility, Ownership, Priority, SchoolId, SchoolLevel,
    },
};

const NAMES: [&str; 6] = [
    "SD Negeri 01 Bogor",
    "SMP Negeri 1 Bogor",
    "SMA Swasta Bina Bangsa",
    "SMK Negeri 2 Bogor",
    "SD Islam Al-Hidayah",
    "MTs Nurul Iman Ciawi",
];

const TOKENS: [&str; 5] = ["", "negeri", "SD", "  bogor  ", "zzz"];

fn level_strategy() -> impl Strategy<Value = SchoolLevel> {
    prop_oneof![
        Just(SchoolLevel::Sd),
        Just(SchoolLevel::Smp),
        Just(SchoolLevel::Sma),
        Just(SchoolLevel::Smk),
    ]
}

fn ownership_strategy() -> impl Strategy<Value = Ownership> {
    prop_oneof![Just(Ownership::Negeri), Just(Ownership::Swasta)]
}

fn condition_strategy() -> impl Strategy<Value = BuildingCondition> {
    prop_oneof![
        Just(BuildingCondition::Baik),
        Just(BuildingCondition::RusakRingan),
        Just(BuildingCondition::RusakBerat),
    ]
}

fn accreditation_strategy() -> impl Strategy<Value = Accreditation> {
    prop_oneof![
        Just(Accreditation::A),
        Just(Accreditation::B),
        Just(Accreditation::C),
        Just(Accreditation::Ungraded),
    ]
}

fn priority_strategy() -> impl Strategy<Value = Option<Priority>> {
    prop_oneof![
        Just(None),
        Just(Some(Priority::Mendesak)),
        Just(Some(Priority::Penting)),
        Just(Some(Priority::Normal)),
    ]
}

prop_compose! {
    fn record_strategy()(
        name_idx in 0usize..NAMES.len(),
        level in level_strategy(),
        ownership in ownership_strategy(),
        condition in condition_strategy(),
        accreditation in accreditation_strategy(),
        score in 0u8..=100,
        flags in prop::array::uniform4(any::<bool>()),
        priority in priority_strategy(),
    ) -> SchoolRecord {
        SchoolRecord {
            // Id is assigned after collection, once per position.
            id: 0,
            name: NAMES[name_idx].to_string(),
            position: GeoPoint { lat: -6.6, lon: 106.8 },
            level,
            ownership,
            condition,
            accreditation,
            score,
            recommendation: String::new(),
            facilities: FacilitySet {
                perpustakaan: flags[0],
                lab_komputer: flags[1],
                toilet_layak: flags[2],
                akses_internet: flags[3],
            },
            distance: None,
            road: None,
            recommendation_kind: None,
            priority,
            project: None,
        }
    }
}

#[derive(Debug, Clone)]
struct RawCriteria {
    level: Option<SchoolLevel>,
    ownership: Option<Ownership>,
    condition: Option<BuildingCondition>,
    priority: Option<Priority>,
    required: [bool; 4],
    score_a: u8,
    score_b: u8,
    token_idx: usize,
}

prop_compose! {
    fn criteria_strategy()(
        level in prop::option::of(level_strategy()),
        ownership in prop::option::of(ownership_strategy()),
        condition in prop::option::of(condition_strategy()),
        priority in priority_strategy(),
        required in prop::array::uniform4(any::<bool>()),
        score_a in 0u8..=100,
        score_b in 0u8..=100,
        token_idx in 0usize..TOKENS.len(),
    ) -> RawCriteria {
        RawCriteria { level, ownership, condition, priority, required, score_a, score_b, token_idx }
    }
}

fn build_criteria(raw: &RawCriteria) -> FilterCriteria {
    let mut criteria = FilterCriteria::new();
    criteria
        .set_field(FilterKey::Level, raw.level.map(FilterValue::Level))
        .expect("level");
    criteria
        .set_field(FilterKey::Ownership, raw.ownership.map(FilterValue::Ownership))
        .expect("ownership");
    criteria
        .set_field(FilterKey::Condition, raw.condition.map(FilterValue::Condition))
        .expect("condition");
    criteria
        .set_field(FilterKey::Priority, raw.priority.map(FilterValue::Priority))
        .expect("priority");
    for (facility, required) in Facility::ALL.into_iter().zip(raw.required) {
        criteria.set_facility_required(facility, required);
    }
    let (min, max) = if raw.score_a <= raw.score_b {
        (raw.score_a, raw.score_b)
    } else {
        (raw.score_b, raw.score_a)
    };
    criteria.set_score_range(min, max).expect("sorted range");
    criteria.set_search_text(TOKENS[raw.token_idx]);
    criteria
}

/// Brute-force restatement of the documented predicate semantics.
fn reference_matches(raw: &RawCriteria, rec: &SchoolRecord) -> bool {
    let (min, max) = if raw.score_a <= raw.score_b {
        (raw.score_a, raw.score_b)
    } else {
        (raw.score_b, raw.score_a)
    };
    let token = TOKENS[raw.token_idx].trim().to_lowercase();

    raw.level.is_none_or(|v| rec.level == v)
        && raw.ownership.is_none_or(|v| rec.ownership == v)
        && raw.condition.is_none_or(|v| rec.condition == v)
        && raw.priority.is_none_or(|v| rec.priority == Some(v))
        && Facility::ALL
            .into_iter()
            .zip(raw.required)
            .all(|(f, req)| !req || rec.facilities.has(f))
        && (min..=max).contains(&rec.score)
        && (token.is_empty() || rec.name.to_lowercase().contains(&token))
}

fn store_from(records: Vec<SchoolRecord>) -> SchoolStore {
    let records = records
        .into_iter()
        .enumerate()
        .map(|(idx, mut rec)| {
            rec.id = idx as SchoolId + 1;
            rec
        })
        .collect();
    SchoolStore::with_records(records).expect("unique ids")
}

proptest! {
    #[test]
    fn engine_agrees_with_reference_predicate(
        records in prop::collection::vec(record_strategy(), 0..60),
        raw in criteria_strategy(),
    ) {
        let store = store_from(records);
        let criteria = build_criteria(&raw);
        let snapshot = store.snapshot();

        let results = evaluate(&snapshot, &compile(&criteria));

        let expected: Vec<SchoolId> = snapshot
            .all()
            .filter(|rec| reference_matches(&raw, rec))
            .map(|rec| rec.id)
            .collect();

        prop_assert_eq!(results.ids(), expected.as_slice());
    }

    #[test]
    fn compiling_twice_classifies_every_record_identically(
        records in prop::collection::vec(record_strategy(), 0..40),
        raw in criteria_strategy(),
    ) {
        let store = store_from(records);
        let criteria = build_criteria(&raw);
        let snapshot = store.snapshot();

        let first = compile(&criteria);
        let second = compile(&criteria);

        for rec in snapshot.all() {
            prop_assert_eq!(first.matches(rec), second.matches(rec));
        }
        let first_results = evaluate(&snapshot, &first);
        let second_results = evaluate(&snapshot, &second);
        prop_assert_eq!(first_results.ids(), second_results.ids());
    }

    #[test]
    fn unconstrained_criteria_returns_store_order(
        records in prop::collection::vec(record_strategy(), 0..60),
    ) {
        let store = store_from(records);
        let snapshot = store.snapshot();
        let results = evaluate(&snapshot, &compile(&FilterCriteria::new()));

        prop_assert_eq!(results.ids(), snapshot.ordered_ids());
    }

    #[test]
    fn result_order_is_a_subsequence_of_store_order(
        records in prop::collection::vec(record_strategy(), 0..60),
        raw in criteria_strategy(),
    ) {
        let store = store_from(records);
        let criteria = build_criteria(&raw);
        let snapshot = store.snapshot();
        let results = evaluate(&snapshot, &compile(&criteria));

        let mut store_iter = snapshot.ordered_ids().iter();
        for id in results.ids() {
            prop_assert!(
                store_iter.any(|candidate| candidate == id),
                "result id {} out of store order", id
            );
        }
    }
}

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use eduview::{
    core::store::SchoolStore,
    criteria::{FilterCriteria, FilterKey, FilterValue},
    engine::{compile::compile, query::evaluate},
    school::{FacilitySet, GeoPoint, SchoolRecord},
    types::{Accreditation, BuildingCondition, Ownership, SchoolLevel},
};

fn synthetic_record(i: u64) -> SchoolRecord {
    let levels = [
        SchoolLevel::Sd,
        SchoolLevel::Smp,
        SchoolLevel::Sma,
        SchoolLevel::Smk,
    ];
    let conditions = [
        BuildingCondition::Baik,
        BuildingCondition::RusakRingan,
        BuildingCondition::RusakBerat,
    ];

    SchoolRecord {
        id: i + 1,
        name: format!("SD Negeri {i} Bogor"),
        position: GeoPoint {
            lat: -6.6,
            lon: 106.8,
        },
        level: levels[(i % 4) as usize],
        ownership: if i % 3 == 0 {
            Ownership::Swasta
        } else {
            Ownership::Negeri
        },
        condition: conditions[(i % 3) as usize],
        accreditation: Accreditation::B,
        score: (i % 101) as u8,
        recommendation: String::new(),
        facilities: FacilitySet {
            perpustakaan: i % 2 == 0,
            lab_komputer: i % 5 == 0,
            toilet_layak: true,
            akses_internet: i % 7 != 0,
        },
        distance: None,
        road: None,
        recommendation_kind: None,
        priority: None,
        project: None,
    }
}

fn synthetic_store(n: u64) -> SchoolStore {
    let records = (0..n).map(synthetic_record).collect();
    SchoolStore::with_records(records).expect("unique ids")
}

fn mixed_criteria() -> FilterCriteria {
    let mut criteria = FilterCriteria::new();
    criteria
        .set_field(FilterKey::Level, Some(FilterValue::Level(SchoolLevel::Sd)))
        .expect("level");
    criteria.set_score_range(20, 80).expect("range");
    criteria.set_search_text("negeri");
    criteria
}

fn bench_compile(c: &mut Criterion) {
    let criteria = mixed_criteria();
    c.bench_function("compile_mixed_criteria", |b| {
        b.iter(|| compile(&criteria));
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let criteria = mixed_criteria();
    let predicate = compile(&criteria);

    for n in [1_000u64, 10_000u64, 50_000u64] {
        let store = synthetic_store(n);
        let snapshot = store.snapshot();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| evaluate(&snapshot, &predicate));
        });
    }

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    c.bench_function("store_load_10k", |b| {
        b.iter(|| {
            let mut store = SchoolStore::new();
            let records = (0..10_000u64).map(synthetic_record).collect();
            store.load(records).expect("load");
        });
    });
}

criterion_group!(benches, bench_compile, bench_evaluate, bench_load);
criterion_main!(benches);

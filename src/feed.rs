//! Record feed decoding with per-record skip reporting.
//!
//! The feed is a JSON array in the upstream survey export shape
//! (`jenjang`, `kondisi`, `skorKelayakan`, camelCase facility flags).
//! Malformed entries are rejected one by one so a single bad record
//! never blanks the whole map.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    school::{FacilitySet, GeoPoint, SchoolRecord, SCORE_MAX},
    types::{
        Accreditation, BuildingCondition, DistanceBand, Ownership, Priority, ProjectStatus,
        RecommendationKind, RoadCondition, SchoolId, SchoolLevel,
    },
};

/// Reason a feed entry was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Entry failed to decode (missing field, enum value outside the closed set).
    Decode(String),
    /// Score outside `0..=100`.
    ScoreOutOfRange(i64),
    /// Entry reuses an id already seen earlier in the feed.
    DuplicateId(SchoolId),
}

/// One rejected feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Position in the feed array.
    pub index: usize,
    /// Why the entry was rejected.
    pub reason: FeedError,
}

/// Outcome of decoding a feed: surviving records plus rejected entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedReport {
    /// Records that passed validation, in feed order.
    pub records: Vec<SchoolRecord>,
    /// Entries rejected record-by-record.
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawFacilities {
    perpustakaan: bool,
    lab_komputer: bool,
    toilet_layak: bool,
    akses_internet: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchool {
    id: SchoolId,
    name: String,
    /// `[lat, lon]` pair as exported by the survey tool.
    coordinates: [f64; 2],
    jenjang: SchoolLevel,
    status: Ownership,
    kondisi: BuildingCondition,
    akreditasi: Accreditation,
    skor_kelayakan: i64,
    #[serde(default)]
    rekomendasi: String,
    fasilitas: RawFacilities,
    #[serde(default)]
    jarak: Option<DistanceBand>,
    #[serde(default)]
    kondisi_jalan: Option<RoadCondition>,
    #[serde(default)]
    jenis_rekomendasi: Option<RecommendationKind>,
    #[serde(default)]
    prioritas: Option<Priority>,
    #[serde(default)]
    status_proyek: Option<ProjectStatus>,
}

impl RawSchool {
    fn into_record(self) -> Result<SchoolRecord, FeedError> {
        if !(0..=i64::from(SCORE_MAX)).contains(&self.skor_kelayakan) {
            return Err(FeedError::ScoreOutOfRange(self.skor_kelayakan));
        }

        Ok(SchoolRecord {
            id: self.id,
            name: self.name,
            position: GeoPoint {
                lat: self.coordinates[0],
                lon: self.coordinates[1],
            },
            level: self.jenjang,
            ownership: self.status,
            condition: self.kondisi,
            accreditation: self.akreditasi,
            score: self.skor_kelayakan as u8,
            recommendation: self.rekomendasi,
            facilities: FacilitySet {
                perpustakaan: self.fasilitas.perpustakaan,
                lab_komputer: self.fasilitas.lab_komputer,
                toilet_layak: self.fasilitas.toilet_layak,
                akses_internet: self.fasilitas.akses_internet,
            },
            distance: self.jarak,
            road: self.kondisi_jalan,
            recommendation_kind: self.jenis_rekomendasi,
            priority: self.prioritas,
            project: self.status_proyek,
        })
    }
}

/// Decodes a JSON feed, rejecting malformed entries record-by-record.
///
/// Fails only when the outer document is not a JSON array.
pub fn decode_feed(json: &str) -> Result<FeedReport, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(json)?;

    let mut report = FeedReport::default();
    let mut seen = hashbrown::HashSet::<SchoolId>::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let raw: RawSchool = match serde_json::from_value(entry) {
            Ok(raw) => raw,
            Err(err) => {
                report.skipped.push(SkippedEntry {
                    index,
                    reason: FeedError::Decode(err.to_string()),
                });
                continue;
            }
        };

        let record = match raw.into_record() {
            Ok(record) => record,
            Err(reason) => {
                report.skipped.push(SkippedEntry { index, reason });
                continue;
            }
        };

        if !seen.insert(record.id) {
            report.skipped.push(SkippedEntry {
                index,
                reason: FeedError::DuplicateId(record.id),
            });
            continue;
        }

        report.records.push(record);
    }

    Ok(report)
}

/// The five Bogor survey records bundled with the application.
pub fn sample_schools() -> Vec<SchoolRecord> {
    vec![
        SchoolRecord {
            id: 1,
            name: "SD Negeri 01 Bogor".to_string(),
            position: GeoPoint {
                lat: -6.5971,
                lon: 106.8060,
            },
            level: SchoolLevel::Sd,
            ownership: Ownership::Negeri,
            condition: BuildingCondition::Baik,
            accreditation: Accreditation::A,
            score: 85,
            recommendation: "Tidak Ada Rekomendasi Mendesak".to_string(),
            facilities: FacilitySet {
                perpustakaan: true,
                lab_komputer: true,
                toilet_layak: true,
                akses_internet: true,
            },
            distance: None,
            road: None,
            recommendation_kind: None,
            priority: None,
            project: None,
        },
        SchoolRecord {
            id: 2,
            name: "SMP Negeri 1 Bogor".to_string(),
            position: GeoPoint {
                lat: -6.6012,
                lon: 106.7962,
            },
            level: SchoolLevel::Smp,
            ownership: Ownership::Negeri,
            condition: BuildingCondition::RusakRingan,
            accreditation: Accreditation::A,
            score: 75,
            recommendation: "Perbaikan Ringan pada Atap dan Dinding".to_string(),
            facilities: FacilitySet {
                perpustakaan: true,
                lab_komputer: true,
                toilet_layak: true,
                akses_internet: false,
            },
            distance: None,
            road: None,
            recommendation_kind: Some(RecommendationKind::Renovasi),
            priority: Some(Priority::Normal),
            project: None,
        },
        SchoolRecord {
            id: 3,
            name: "SMA Swasta Bina Bangsa".to_string(),
            position: GeoPoint {
                lat: -6.5890,
                lon: 106.7930,
            },
            level: SchoolLevel::Sma,
            ownership: Ownership::Swasta,
            condition: BuildingCondition::Baik,
            accreditation: Accreditation::B,
            score: 70,
            recommendation: "Peningkatan Fasilitas Laboratorium".to_string(),
            facilities: FacilitySet {
                perpustakaan: true,
                lab_komputer: false,
                toilet_layak: true,
                akses_internet: true,
            },
            distance: None,
            road: None,
            recommendation_kind: None,
            priority: None,
            project: None,
        },
        SchoolRecord {
            id: 4,
            name: "SMK Negeri 2 Bogor".to_string(),
            position: GeoPoint {
                lat: -6.6100,
                lon: 106.8020,
            },
            level: SchoolLevel::Smk,
            ownership: Ownership::Negeri,
            condition: BuildingCondition::RusakBerat,
            accreditation: Accreditation::A,
            score: 45,
            recommendation: "Renovasi Menyeluruh Gedung Utama".to_string(),
            facilities: FacilitySet {
                perpustakaan: true,
                lab_komputer: true,
                toilet_layak: false,
                akses_internet: true,
            },
            distance: None,
            road: None,
            recommendation_kind: Some(RecommendationKind::Renovasi),
            priority: Some(Priority::Mendesak),
            project: Some(ProjectStatus::Perencanaan),
        },
        SchoolRecord {
            id: 5,
            name: "SD Islam Al-Hidayah".to_string(),
            position: GeoPoint {
                lat: -6.5850,
                lon: 106.8100,
            },
            level: SchoolLevel::Sd,
            ownership: Ownership::Swasta,
            condition: BuildingCondition::Baik,
            accreditation: Accreditation::B,
            score: 80,
            recommendation: "Penambahan Fasilitas Lab Komputer".to_string(),
            facilities: FacilitySet {
                perpustakaan: true,
                lab_komputer: false,
                toilet_layak: true,
                akses_internet: true,
            },
            distance: None,
            road: None,
            recommendation_kind: None,
            priority: None,
            project: None,
        },
    ]
}

//! Shared primitive IDs and closed-set school attribute enums.
//!
//! Enum serde names match the Indonesian labels used by the upstream
//! record feed ("Rusak Ringan", "Belum", ...).

use serde::{Deserialize, Serialize};

/// Stable school identifier.
pub type SchoolId = u64;
/// Monotonic evaluation revision published with each result set.
pub type Revision = u64;

/// School level bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchoolLevel {
    /// Sekolah Dasar (primary).
    #[serde(rename = "SD")]
    Sd,
    /// Sekolah Menengah Pertama (junior secondary).
    #[serde(rename = "SMP")]
    Smp,
    /// Sekolah Menengah Atas (senior secondary).
    #[serde(rename = "SMA")]
    Sma,
    /// Sekolah Menengah Kejuruan (vocational).
    #[serde(rename = "SMK")]
    Smk,
}

/// Public or private ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ownership {
    /// State-run.
    Negeri,
    /// Privately run.
    Swasta,
}

/// Building condition, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuildingCondition {
    /// Good condition.
    Baik,
    /// Lightly damaged.
    #[serde(rename = "Rusak Ringan")]
    RusakRingan,
    /// Heavily damaged.
    #[serde(rename = "Rusak Berat")]
    RusakBerat,
}

/// National accreditation grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accreditation {
    /// Grade A.
    A,
    /// Grade B.
    B,
    /// Grade C.
    C,
    /// Not yet accredited.
    #[serde(rename = "Belum")]
    Ungraded,
}

/// The four facilities tracked per school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facility {
    /// Library.
    Perpustakaan,
    /// Computer lab.
    #[serde(rename = "Lab Komputer")]
    LabKomputer,
    /// Adequate toilets.
    #[serde(rename = "Toilet Layak")]
    ToiletLayak,
    /// Internet access.
    #[serde(rename = "Akses Internet")]
    AksesInternet,
}

impl Facility {
    /// All known facilities, in display order.
    pub const ALL: [Facility; 4] = [
        Facility::Perpustakaan,
        Facility::LabKomputer,
        Facility::ToiletLayak,
        Facility::AksesInternet,
    ];
}

/// Distance band to the nearest main road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceBand {
    /// Near.
    Dekat,
    /// Moderate.
    Sedang,
    /// Far.
    Jauh,
}

/// Access road condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadCondition {
    /// Good.
    Baik,
    /// Moderate.
    Sedang,
    /// Poor.
    Buruk,
}

/// Kind of intervention recommended for a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationKind {
    /// New construction.
    #[serde(rename = "Pembangunan Baru")]
    PembangunanBaru,
    /// Renovation.
    Renovasi,
}

/// Intervention priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Urgent.
    Mendesak,
    /// Important.
    Penting,
    /// Routine.
    Normal,
}

/// Monitoring status of an ongoing construction project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Planning.
    Perencanaan,
    /// Under construction.
    Konstruksi,
    /// Completed.
    Selesai,
}

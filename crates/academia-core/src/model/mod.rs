// ── Domain model ──
//
// Minimal shapes needed by the UI. The backend owns the real schema;
// these carry only what screens render or filter on.

mod catalog;
mod enrollment;

use strum::{AsRefStr, Display, EnumIter};

pub use catalog::{AcademicYear, Course, Faculty};
pub use enrollment::Enrollment;

/// Anything stored in an [`EntityCollection`](crate::store::EntityCollection).
pub trait Entity: Clone + Send + Sync + 'static {
    /// Opaque unique identifier within its collection.
    fn id(&self) -> &str;
}

/// The four stores populated by the startup loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum StoreKind {
    Enrollments,
    Faculties,
    AcademicYears,
    Courses,
}

impl StoreKind {
    /// All stores, in load-report order.
    pub const ALL: [StoreKind; 4] = [
        Self::Enrollments,
        Self::Faculties,
        Self::AcademicYears,
        Self::Courses,
    ];

    /// File stem used by file-backed sources (`academic_years.json`).
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Enrollments => "enrollments",
            Self::Faculties => "faculties",
            Self::AcademicYears => "academic_years",
            Self::Courses => "courses",
        }
    }
}

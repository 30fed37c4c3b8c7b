// ── Catalog entities ──
//
// Reference data loaded once at startup: courses, faculties, academic years.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Entity;

/// A course from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    /// Short display token, e.g. `MTH101`.
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub credits: Option<u32>,
}

/// An organisational unit offering courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub name: String,
}

impl Faculty {
    /// Short token for badges; falls back to the name when no code is set.
    pub fn short_code(&self) -> &str {
        if self.code.is_empty() {
            &self.name
        } else {
            &self.code
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicYear {
    pub id: String,
    /// Human label, e.g. `2024/2025`.
    pub label: String,
    #[serde(default)]
    pub is_current: bool,
}

impl AcademicYear {
    /// The year flagged current, or the last one listed if none is.
    pub fn current_of(years: &[Arc<AcademicYear>]) -> Option<&Arc<AcademicYear>> {
        years.iter().find(|y| y.is_current).or_else(|| years.last())
    }
}

impl Entity for Course {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Faculty {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for AcademicYear {
    fn id(&self) -> &str {
        &self.id
    }
}

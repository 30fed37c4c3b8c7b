use serde::{Deserialize, Serialize};

use super::Entity;

/// A student's enrollment in one course for one academic year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: String,
    pub student_name: String,
    pub course_id: String,
    pub academic_year_id: String,
    #[serde(default)]
    pub faculty_id: Option<String>,
}

impl Entity for Enrollment {
    fn id(&self) -> &str {
        &self.id
    }
}

// ── API-to-domain type conversions ──
//
// Bridges raw `academia_api` response types into the domain model.

use academia_api::types::{
    AcademicYearResponse, CourseResponse, EnrollmentResponse, FacultyResponse,
};

use crate::model::{AcademicYear, Course, Enrollment, Faculty};

impl From<CourseResponse> for Course {
    fn from(c: CourseResponse) -> Self {
        Course {
            id: c.id,
            code: c.code.trim().to_owned(),
            title: c.title.trim().to_owned(),
            credits: c.credits,
        }
    }
}

impl From<FacultyResponse> for Faculty {
    fn from(f: FacultyResponse) -> Self {
        Faculty {
            id: f.id,
            code: f.code.trim().to_owned(),
            name: f.name.trim().to_owned(),
        }
    }
}

impl From<AcademicYearResponse> for AcademicYear {
    fn from(y: AcademicYearResponse) -> Self {
        AcademicYear {
            id: y.id,
            label: y.label,
            is_current: y.is_current,
        }
    }
}

impl From<EnrollmentResponse> for Enrollment {
    fn from(e: EnrollmentResponse) -> Self {
        Enrollment {
            id: e.id,
            student_name: e.student_name,
            course_id: e.course_id,
            academic_year_id: e.academic_year_id,
            faculty_id: e.faculty_id.filter(|f| !f.is_empty()),
        }
    }
}

use std::collections::HashSet;
use std::time::Duration;

use super::DataSource;
use crate::error::CoreError;
use crate::model::{AcademicYear, Course, Enrollment, Faculty, StoreKind};

/// In-memory source. Backs `--demo` mode and loader tests.
///
/// Individual stores can be made to fail, and every fetch can be delayed
/// to exercise timeouts and cancellation.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    enrollments: Vec<Enrollment>,
    faculties: Vec<Faculty>,
    academic_years: Vec<AcademicYear>,
    courses: Vec<Course>,
    failing: HashSet<StoreKind>,
    delay: Option<Duration>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enrollments(mut self, items: Vec<Enrollment>) -> Self {
        self.enrollments = items;
        self
    }

    pub fn with_faculties(mut self, items: Vec<Faculty>) -> Self {
        self.faculties = items;
        self
    }

    pub fn with_academic_years(mut self, items: Vec<AcademicYear>) -> Self {
        self.academic_years = items;
        self
    }

    pub fn with_courses(mut self, items: Vec<Course>) -> Self {
        self.courses = items;
        self
    }

    /// Make fetches of `kind` fail.
    pub fn failing(mut self, kind: StoreKind) -> Self {
        self.failing.insert(kind);
        self
    }

    /// Sleep this long before answering any fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn answer<T: Clone>(&self, kind: StoreKind, items: &[T]) -> Result<Vec<T>, CoreError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(&kind) {
            return Err(CoreError::Injected {
                store: kind.to_string(),
            });
        }
        Ok(items.to_vec())
    }

    /// Small sample catalog for trying the UI without a backend.
    pub fn demo() -> Self {
        let course = |id: &str, code: &str, title: &str, credits: u32| Course {
            id: id.into(),
            code: code.into(),
            title: title.into(),
            credits: Some(credits),
        };
        let faculty = |id: &str, code: &str, name: &str| Faculty {
            id: id.into(),
            code: code.into(),
            name: name.into(),
        };
        let enrollment = |id: &str, student: &str, course: &str, faculty: &str| Enrollment {
            id: id.into(),
            student_name: student.into(),
            course_id: course.into(),
            academic_year_id: "2024".into(),
            faculty_id: Some(faculty.into()),
        };

        Self::new()
            .with_courses(vec![
                course("c1", "MTH101", "Calculus I", 6),
                course("c2", "MTH201", "Linear Algebra", 6),
                course("c3", "PHY201", "Classical Mechanics", 5),
                course("c4", "CHM110", "General Chemistry", 5),
                course("c5", "HIS120", "Medieval History", 4),
                course("c6", "LIT210", "Comparative Literature", 4),
                course("c7", "CSC150", "Introduction to Programming", 6),
                course("c8", "CSC310", "Operating Systems", 6),
            ])
            .with_faculties(vec![
                faculty("sci", "SCI", "Faculty of Science"),
                faculty("hum", "HUM", "Faculty of Humanities"),
                faculty("eng", "ENG", "Faculty of Engineering"),
            ])
            .with_academic_years(vec![
                AcademicYear {
                    id: "2023".into(),
                    label: "2023/2024".into(),
                    is_current: false,
                },
                AcademicYear {
                    id: "2024".into(),
                    label: "2024/2025".into(),
                    is_current: true,
                },
            ])
            .with_enrollments(vec![
                enrollment("e1", "Ada Lovelace", "c1", "sci"),
                enrollment("e2", "Ada Lovelace", "c7", "eng"),
                enrollment("e3", "Alan Turing", "c2", "sci"),
                enrollment("e4", "Alan Turing", "c8", "eng"),
                enrollment("e5", "Grace Hopper", "c7", "eng"),
                enrollment("e6", "Marie Curie", "c4", "sci"),
                enrollment("e7", "Marie Curie", "c3", "sci"),
                enrollment("e8", "Umberto Eco", "c5", "hum"),
                enrollment("e9", "Umberto Eco", "c6", "hum"),
                enrollment("e10", "Emmy Noether", "c2", "sci"),
            ])
    }
}

impl DataSource for StaticSource {
    fn describe(&self) -> String {
        "built-in demo data".into()
    }

    async fn fetch_enrollments(&self) -> Result<Vec<Enrollment>, CoreError> {
        self.answer(StoreKind::Enrollments, &self.enrollments).await
    }

    async fn fetch_faculties(&self) -> Result<Vec<Faculty>, CoreError> {
        self.answer(StoreKind::Faculties, &self.faculties).await
    }

    async fn fetch_academic_years(&self) -> Result<Vec<AcademicYear>, CoreError> {
        self.answer(StoreKind::AcademicYears, &self.academic_years)
            .await
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>, CoreError> {
        self.answer(StoreKind::Courses, &self.courses).await
    }
}

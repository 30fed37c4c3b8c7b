// Wire types for the academia REST backend.
//
// Every list endpoint returns a bare JSON array. Field names are camelCase;
// identifiers may arrive as strings or integers and are normalized to strings.

use serde::{Deserialize, Deserializer, Serialize};

/// Accept `"42"` or `42` for identifier fields.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "id_string")] String);

    Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(s)| s))
}

/// Course catalog entry: `GET /api/courses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub code: String,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub credits: Option<u32>,
}

/// `GET /api/faculties`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyResponse {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub name: String,
}

/// `GET /api/academic-years`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYearResponse {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(alias = "name")]
    pub label: String,
    #[serde(default, alias = "current")]
    pub is_current: bool,
}

/// `GET /api/enrollments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub student_name: String,
    #[serde(deserialize_with = "id_string")]
    pub course_id: String,
    #[serde(deserialize_with = "id_string")]
    pub academic_year_id: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub faculty_id: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_become_strings() {
        let course: CourseResponse =
            serde_json::from_str(r#"{"id": 7, "code": "MTH101", "title": "Calculus"}"#).unwrap();
        assert_eq!(course.id, "7");
        assert_eq!(course.credits, None);
    }

    #[test]
    fn enrollment_faculty_is_optional() {
        let e: EnrollmentResponse = serde_json::from_str(
            r#"{"id": "e1", "studentName": "Ada", "courseId": 3, "academicYearId": "y1"}"#,
        )
        .unwrap();
        assert_eq!(e.course_id, "3");
        assert!(e.faculty_id.is_none());

        let e: EnrollmentResponse = serde_json::from_str(
            r#"{"id": "e2", "studentName": "Bo", "courseId": "c", "academicYearId": "y", "facultyId": 12}"#,
        )
        .unwrap();
        assert_eq!(e.faculty_id.as_deref(), Some("12"));
    }

    #[test]
    fn academic_year_accepts_legacy_field_names() {
        let y: AcademicYearResponse =
            serde_json::from_str(r#"{"id": 1, "name": "2024/2025", "current": true}"#).unwrap();
        assert_eq!(y.label, "2024/2025");
        assert!(y.is_current);
    }
}

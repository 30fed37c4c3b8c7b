#![allow(clippy::unwrap_used)]
// Integration tests for `Client` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use academia_api::{Client, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = Client::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_courses() {
    let (server, client) = setup().await;

    let body = json!([
        { "id": "1", "code": "MTH101", "title": "Calculus", "credits": 6 },
        { "id": 2, "code": "PHY201", "title": "Mechanics" },
    ]);

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let courses = client.list_courses().await.unwrap();

    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].code, "MTH101");
    assert_eq!(courses[0].credits, Some(6));
    assert_eq!(courses[1].id, "2");
    assert_eq!(courses[1].title, "Mechanics");
}

#[tokio::test]
async fn test_list_enrollments() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": "e-1",
            "studentName": "Ada Lovelace",
            "courseId": "1",
            "academicYearId": "2024",
            "facultyId": "sci"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/enrollments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let enrollments = client.list_enrollments().await.unwrap();

    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].student_name, "Ada Lovelace");
    assert_eq!(enrollments[0].faculty_id.as_deref(), Some("sci"));
}

#[tokio::test]
async fn test_list_faculties_and_years() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/faculties"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": "sci", "code": "SCI", "name": "Science" }])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/academic-years"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "2023", "label": "2023/2024" },
            { "id": "2024", "label": "2024/2025", "isCurrent": true },
        ])))
        .mount(&server)
        .await;

    let faculties = client.list_faculties().await.unwrap();
    let years = client.list_academic_years().await.unwrap();

    assert_eq!(faculties[0].name, "Science");
    assert_eq!(years.len(), 2);
    assert!(!years[0].is_current);
    assert!(years[1].is_current);
}

#[tokio::test]
async fn test_base_url_with_api_suffix() {
    let server = MockServer::start().await;
    let client =
        Client::from_reqwest(&format!("{}/api", server.uri()), reqwest::Client::new()).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client.list_courses().await.unwrap().is_empty());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_message_from_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/faculties"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "message": "maintenance window" })),
        )
        .mount(&server)
        .await;

    let err = client.list_faculties().await.unwrap_err();

    match &err {
        Error::Http { status, message } => {
            assert_eq!(*status, 503);
            assert_eq!(message, "maintenance window");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
    assert!(err.is_transient());
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_error_plain_text_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such thing"))
        .mount(&server)
        .await;

    let err = client.list_courses().await.unwrap_err();

    assert!(matches!(err, Error::Http { status: 404, ref message } if message == "no such thing"));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/academic-years"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"a list\"}"))
        .mount(&server)
        .await;

    let err = client.list_academic_years().await.unwrap_err();

    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "{\"not\": \"a list\"}"),
        other => panic!("expected Deserialization error, got {other:?}"),
    }
}

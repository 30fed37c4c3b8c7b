use academia_api::Client;

use super::DataSource;
use crate::error::CoreError;
use crate::model::{AcademicYear, Course, Enrollment, Faculty};

/// Reads every store from the REST backend.
#[derive(Debug, Clone)]
pub struct ApiSource {
    client: Client,
}

impl ApiSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl DataSource for ApiSource {
    fn describe(&self) -> String {
        self.client.base_url().to_string()
    }

    async fn fetch_enrollments(&self) -> Result<Vec<Enrollment>, CoreError> {
        let raw = self.client.list_enrollments().await?;
        Ok(raw.into_iter().map(Enrollment::from).collect())
    }

    async fn fetch_faculties(&self) -> Result<Vec<Faculty>, CoreError> {
        let raw = self.client.list_faculties().await?;
        Ok(raw.into_iter().map(Faculty::from).collect())
    }

    async fn fetch_academic_years(&self) -> Result<Vec<AcademicYear>, CoreError> {
        let raw = self.client.list_academic_years().await?;
        Ok(raw.into_iter().map(AcademicYear::from).collect())
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>, CoreError> {
        let raw = self.client.list_courses().await?;
        Ok(raw.into_iter().map(Course::from).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn maps_backend_errors_to_core_errors() {
        let server = MockServer::start().await;
        let courses = json!([{ "id": 1, "code": "MTH101", "title": "Calculus" }]);
        Mock::given(method("GET"))
            .and(path("/api/courses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(courses))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/faculties"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = Client::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let source = ApiSource::new(client);

        let courses = source.fetch_courses().await.unwrap();
        assert_eq!(courses[0].id, "1");

        let err = source.fetch_faculties().await.unwrap_err();
        assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
    }
}

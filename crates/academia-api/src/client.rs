// Async HTTP client for the academia REST backend.
//
// Base path: {base}/api/
// Every resource is a parameterless "fetch all" returning a JSON array.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::types::{AcademicYearResponse, CourseResponse, EnrollmentResponse, FacultyResponse};

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Async client for the academia backend.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Build a client with its own connection pool and request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("academia/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Base URL with exactly one `/api/` suffix.
    ///
    /// `https://host` and `https://host/api` both become `https://host/api/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }

        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Resources ────────────────────────────────────────────────────

    pub async fn list_courses(&self) -> Result<Vec<CourseResponse>, Error> {
        self.get("courses").await
    }

    pub async fn list_faculties(&self) -> Result<Vec<FacultyResponse>, Error> {
        self.get("faculties").await
    }

    pub async fn list_academic_years(&self) -> Result<Vec<AcademicYearResponse>, Error> {
        self.get("academic-years").await
    }

    pub async fn list_enrollments(&self) -> Result<Vec<EnrollmentResponse>, Error> {
        self.get("enrollments").await
    }

    // ── HTTP ─────────────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.base_url.join(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|err| err.message.or(err.error))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Error::Http {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_api_suffix() {
        let url = Client::normalize_base_url("https://campus.example.edu").unwrap();
        assert_eq!(url.as_str(), "https://campus.example.edu/api/");
    }

    #[test]
    fn base_url_keeps_existing_api_suffix() {
        let url = Client::normalize_base_url("https://campus.example.edu/v2/api/").unwrap();
        assert_eq!(url.as_str(), "https://campus.example.edu/v2/api/");
    }

    #[test]
    fn base_url_rejects_garbage() {
        assert!(matches!(
            Client::normalize_base_url("not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }
}

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::DataSource;
use crate::error::CoreError;
use crate::model::{AcademicYear, Course, Enrollment, Faculty, StoreKind};

/// Reads each store from `<dir>/<store>.json` (a JSON array).
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, kind: StoreKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.file_stem()))
    }

    async fn read_list<T: DeserializeOwned>(&self, kind: StoreKind) -> Result<Vec<T>, CoreError> {
        let path = self.path_for(kind);
        debug!(path = %path.display(), "reading store file");

        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| CoreError::Io {
                path: path.clone(),
                source,
            })?;

        serde_json::from_str(&raw).map_err(|e| CoreError::Parse {
            origin: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    async fn fetch_enrollments(&self) -> Result<Vec<Enrollment>, CoreError> {
        self.read_list(StoreKind::Enrollments).await
    }

    async fn fetch_faculties(&self) -> Result<Vec<Faculty>, CoreError> {
        self.read_list(StoreKind::Faculties).await
    }

    async fn fetch_academic_years(&self) -> Result<Vec<AcademicYear>, CoreError> {
        self.read_list(StoreKind::AcademicYears).await
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>, CoreError> {
        self.read_list(StoreKind::Courses).await
    }
}

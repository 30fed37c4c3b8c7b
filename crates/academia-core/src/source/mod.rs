// ── Data sources ──
//
// A data source answers four parameterless "fetch all" calls. The startup
// loader is the only caller; screens read the StoreContext instead.

mod api;
mod file;
mod fixed;

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::CoreError;
use crate::model::{AcademicYear, Course, Enrollment, Faculty};

pub use api::ApiSource;
pub use file::FileSource;
pub use fixed::StaticSource;

/// Backend that can materialize each store in full.
pub trait DataSource: Send + Sync {
    /// Short description for logs and the status bar.
    fn describe(&self) -> String;

    fn fetch_enrollments(&self) -> impl Future<Output = Result<Vec<Enrollment>, CoreError>> + Send;

    fn fetch_faculties(&self) -> impl Future<Output = Result<Vec<Faculty>, CoreError>> + Send;

    fn fetch_academic_years(
        &self,
    ) -> impl Future<Output = Result<Vec<AcademicYear>, CoreError>> + Send;

    fn fetch_courses(&self) -> impl Future<Output = Result<Vec<Course>, CoreError>> + Send;
}

/// Where the application reads its data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// REST backend rooted at `url`.
    Api { url: Url, timeout: Duration },
    /// Directory of `<store>.json` files.
    Files(PathBuf),
    /// Built-in sample catalog.
    Demo,
}

impl SourceSpec {
    pub fn build(&self) -> Result<AnySource, CoreError> {
        Ok(match self {
            Self::Api { url, timeout } => {
                let client = academia_api::Client::new(url.as_str(), *timeout)?;
                AnySource::Api(ApiSource::new(client))
            }
            Self::Files(dir) => AnySource::Files(FileSource::new(dir.clone())),
            Self::Demo => AnySource::Static(StaticSource::demo()),
        })
    }
}

/// Runtime-selected source; the concrete type is picked from configuration.
#[derive(Debug)]
pub enum AnySource {
    Api(ApiSource),
    Files(FileSource),
    Static(StaticSource),
}

impl DataSource for AnySource {
    fn describe(&self) -> String {
        match self {
            Self::Api(s) => s.describe(),
            Self::Files(s) => s.describe(),
            Self::Static(s) => s.describe(),
        }
    }

    async fn fetch_enrollments(&self) -> Result<Vec<Enrollment>, CoreError> {
        match self {
            Self::Api(s) => s.fetch_enrollments().await,
            Self::Files(s) => s.fetch_enrollments().await,
            Self::Static(s) => s.fetch_enrollments().await,
        }
    }

    async fn fetch_faculties(&self) -> Result<Vec<Faculty>, CoreError> {
        match self {
            Self::Api(s) => s.fetch_faculties().await,
            Self::Files(s) => s.fetch_faculties().await,
            Self::Static(s) => s.fetch_faculties().await,
        }
    }

    async fn fetch_academic_years(&self) -> Result<Vec<AcademicYear>, CoreError> {
        match self {
            Self::Api(s) => s.fetch_academic_years().await,
            Self::Files(s) => s.fetch_academic_years().await,
            Self::Static(s) => s.fetch_academic_years().await,
        }
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>, CoreError> {
        match self {
            Self::Api(s) => s.fetch_courses().await,
            Self::Files(s) => s.fetch_courses().await,
            Self::Static(s) => s.fetch_courses().await,
        }
    }
}

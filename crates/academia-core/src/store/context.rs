// ── Store context ──
//
// One explicit object owning every client-side store. Created once by the
// composition root, handed to loaders and screens by reference, and torn
// down with `shutdown()`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::collection::EntityCollection;
use crate::model::{AcademicYear, Course, Enrollment, Faculty, StoreKind};
use crate::stream::EntityStream;

/// Reactive stores for enrollments, faculties, academic years and courses.
///
/// Thread-safe: reads are lock-free snapshots, writes come only from the
/// startup loader. Subscribers are notified over `watch` channels.
pub struct StoreContext {
    pub(crate) enrollments: EntityCollection<Enrollment>,
    pub(crate) faculties: EntityCollection<Faculty>,
    pub(crate) academic_years: EntityCollection<AcademicYear>,
    pub(crate) courses: EntityCollection<Course>,
    pub(crate) last_load: watch::Sender<Option<DateTime<Utc>>>,
    cancel: CancellationToken,
}

impl StoreContext {
    pub fn new() -> Self {
        let (last_load, _) = watch::channel(None);
        Self {
            enrollments: EntityCollection::new(),
            faculties: EntityCollection::new(),
            academic_years: EntityCollection::new(),
            courses: EntityCollection::new(),
            last_load,
            cancel: CancellationToken::new(),
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn academic_years_snapshot(&self) -> Arc<Vec<Arc<AcademicYear>>> {
        self.academic_years.snapshot()
    }

    pub fn courses_snapshot(&self) -> Arc<Vec<Arc<Course>>> {
        self.courses.snapshot()
    }

    // ── Lookups ──────────────────────────────────────────────────────

    /// The year flagged current, or the last one listed if none is.
    pub fn current_academic_year(&self) -> Option<Arc<AcademicYear>> {
        let years = self.academic_years.snapshot();
        AcademicYear::current_of(&years).cloned()
    }

    pub fn count(&self, kind: StoreKind) -> usize {
        match kind {
            StoreKind::Enrollments => self.enrollments.len(),
            StoreKind::Faculties => self.faculties.len(),
            StoreKind::AcademicYears => self.academic_years.len(),
            StoreKind::Courses => self.courses.len(),
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_enrollments(&self) -> EntityStream<Enrollment> {
        EntityStream::new(self.enrollments.subscribe())
    }

    pub fn subscribe_faculties(&self) -> EntityStream<Faculty> {
        EntityStream::new(self.faculties.subscribe())
    }

    pub fn subscribe_academic_years(&self) -> EntityStream<AcademicYear> {
        EntityStream::new(self.academic_years.subscribe())
    }

    pub fn subscribe_courses(&self) -> EntityStream<Course> {
        EntityStream::new(self.courses.subscribe())
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Time of the last load that ran to completion.
    pub fn last_load(&self) -> Option<DateTime<Utc>> {
        *self.last_load.borrow()
    }

    pub(crate) fn mark_loaded(&self) {
        self.last_load.send_replace(Some(Utc::now()));
    }

    /// A token cancelled when this context shuts down.
    pub fn child_token(&self) -> CancellationToken {
        self.cancel.child_token()
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancel in-flight loads and drop all stored data.
    pub fn shutdown(&self) {
        self.cancel.cancel();
        self.enrollments.clear();
        self.faculties.clear();
        self.academic_years.clear();
        self.courses.clear();
        debug!("store context shut down");
    }
}

impl Default for StoreContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn year(id: &str, current: bool) -> AcademicYear {
        AcademicYear {
            id: id.into(),
            label: format!("{id}/next"),
            is_current: current,
        }
    }

    #[test]
    fn current_year_prefers_flag() {
        let ctx = StoreContext::new();
        let years = vec![
            year("2023", false),
            year("2024", true),
            year("2025", false),
        ];
        ctx.academic_years.replace_all(years);
        assert_eq!(ctx.current_academic_year().unwrap().id, "2024");
    }

    #[test]
    fn current_year_falls_back_to_last() {
        let ctx = StoreContext::new();
        assert!(ctx.current_academic_year().is_none());

        let years = vec![year("2023", false), year("2024", false)];
        ctx.academic_years.replace_all(years);
        assert_eq!(ctx.current_academic_year().unwrap().id, "2024");
    }

    #[test]
    fn shutdown_cancels_children_and_clears() {
        let ctx = StoreContext::new();
        let token = ctx.child_token();
        ctx.courses.replace_all(vec![Course {
            id: "1".into(),
            code: "MTH101".into(),
            title: "Calculus".into(),
            credits: None,
        }]);
        assert_eq!(ctx.count(StoreKind::Courses), 1);

        ctx.shutdown();

        assert!(token.is_cancelled());
        assert!(ctx.is_shut_down());
        assert_eq!(ctx.count(StoreKind::Courses), 0);
        assert!(ctx.courses_snapshot().is_empty());
    }

    #[tokio::test]
    async fn subscription_reports_changes() {
        let ctx = StoreContext::new();
        let mut stream = ctx.subscribe_faculties();
        assert!(stream.current().is_empty());

        ctx.faculties.replace_all(vec![Faculty {
            id: "sci".into(),
            code: "SCI".into(),
            name: "Science".into(),
        }]);

        let snap = stream.changed().await.unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(stream.current().len(), 1);
        assert_eq!(ctx.count(StoreKind::Faculties), 1);
    }
}

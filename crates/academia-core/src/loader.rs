// ── Startup loader ──
//
// Fans out the four store fetches concurrently. Each fetch is bounded by a
// timeout and lands in its store as soon as it completes; the whole join
// stops early on cancellation. Failures are logged and recorded per store,
// never propagated: the UI always renders with whatever did load.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{Entity, StoreKind};
use crate::source::DataSource;
use crate::store::{EntityCollection, StoreContext};

/// Loader tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Upper bound for each individual fetch.
    pub timeout: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Result of loading one store.
#[derive(Debug)]
pub enum SourceOutcome {
    Loaded { kind: StoreKind, count: usize },
    Failed { kind: StoreKind, error: CoreError },
    Cancelled { kind: StoreKind },
}

impl SourceOutcome {
    pub fn kind(&self) -> StoreKind {
        match self {
            Self::Loaded { kind, .. } | Self::Failed { kind, .. } | Self::Cancelled { kind } => {
                *kind
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Aggregate state of one load run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Every store loaded.
    Complete,
    /// Some stores loaded, some failed.
    Partial,
    /// No store loaded.
    Failed,
    /// The run was cancelled before every store settled.
    Cancelled,
}

/// Per-store outcomes of one load run, in [`StoreKind::ALL`] order.
#[derive(Debug)]
pub struct LoadReport {
    outcomes: Vec<SourceOutcome>,
    finished_at: DateTime<Utc>,
}

impl LoadReport {
    fn new(mut outcomes: Vec<SourceOutcome>) -> Self {
        outcomes.sort_by_key(|o| StoreKind::ALL.iter().position(|k| *k == o.kind()));
        Self {
            outcomes,
            finished_at: Utc::now(),
        }
    }

    pub fn outcomes(&self) -> &[SourceOutcome] {
        &self.outcomes
    }

    pub fn outcome(&self, kind: StoreKind) -> Option<&SourceOutcome> {
        self.outcomes.iter().find(|o| o.kind() == kind)
    }

    pub fn status(&self) -> LoadStatus {
        if self
            .outcomes
            .iter()
            .any(|o| matches!(o, SourceOutcome::Cancelled { .. }))
        {
            return LoadStatus::Cancelled;
        }
        let loaded = self.outcomes.iter().filter(|o| o.is_loaded()).count();
        if loaded == self.outcomes.len() {
            LoadStatus::Complete
        } else if loaded == 0 {
            LoadStatus::Failed
        } else {
            LoadStatus::Partial
        }
    }

    /// Stores that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (StoreKind, &CoreError)> {
        self.outcomes.iter().filter_map(|o| match o {
            SourceOutcome::Failed { kind, error } => Some((*kind, error)),
            _ => None,
        })
    }

    /// Entities loaded into `kind`, or `None` if it did not load.
    pub fn loaded_count(&self, kind: StoreKind) -> Option<usize> {
        match self.outcome(kind)? {
            SourceOutcome::Loaded { count, .. } => Some(*count),
            _ => None,
        }
    }

    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }
}

/// Load every store from `source` into `ctx`.
///
/// Never fails: each store's result is recorded in the returned report.
pub async fn load_all<S: DataSource>(
    ctx: &StoreContext,
    source: &S,
    options: LoadOptions,
    cancel: &CancellationToken,
) -> LoadReport {
    info!(source = %source.describe(), "loading stores");
    let timeout = options.timeout;

    let mut pending: FuturesUnordered<BoxFuture<'_, SourceOutcome>> = FuturesUnordered::new();
    pending.push(
        load_one(
            StoreKind::Enrollments,
            timeout,
            &ctx.enrollments,
            source.fetch_enrollments(),
        )
        .boxed(),
    );
    pending.push(
        load_one(
            StoreKind::Faculties,
            timeout,
            &ctx.faculties,
            source.fetch_faculties(),
        )
        .boxed(),
    );
    pending.push(
        load_one(
            StoreKind::AcademicYears,
            timeout,
            &ctx.academic_years,
            source.fetch_academic_years(),
        )
        .boxed(),
    );
    pending.push(
        load_one(
            StoreKind::Courses,
            timeout,
            &ctx.courses,
            source.fetch_courses(),
        )
        .boxed(),
    );

    let mut outcomes = Vec::with_capacity(StoreKind::ALL.len());
    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                debug!(settled = outcomes.len(), "load cancelled");
                break;
            }

            next = pending.next() => match next {
                Some(outcome) => outcomes.push(outcome),
                None => break,
            },
        }
    }
    drop(pending);

    for kind in StoreKind::ALL {
        if !outcomes.iter().any(|o: &SourceOutcome| o.kind() == kind) {
            outcomes.push(SourceOutcome::Cancelled { kind });
        }
    }

    let report = LoadReport::new(outcomes);
    if report.status() != LoadStatus::Cancelled {
        ctx.mark_loaded();
    }
    info!(status = ?report.status(), "load finished");
    report
}

async fn load_one<T, F>(
    kind: StoreKind,
    timeout: Duration,
    collection: &EntityCollection<T>,
    fetch: F,
) -> SourceOutcome
where
    T: Entity,
    F: Future<Output = Result<Vec<T>, CoreError>>,
{
    let result = match tokio::time::timeout(timeout, fetch).await {
        Ok(result) => result,
        Err(_) => Err(CoreError::Timeout {
            store: kind.to_string(),
            timeout_secs: timeout.as_secs(),
        }),
    };

    match result {
        Ok(items) => {
            let count = collection.replace_all(items);
            debug!(store = %kind, count, "store loaded");
            SourceOutcome::Loaded { kind, count }
        }
        Err(error) => {
            warn!(store = %kind, error = %error, "failed to load store");
            SourceOutcome::Failed { kind, error }
        }
    }
}

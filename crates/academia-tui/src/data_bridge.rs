//! Data bridge: runs the loader and forwards store changes as actions.
//!
//! Runs as a background task. Loads every store once at startup, pushes
//! the resulting snapshots and the load report, then forwards each later
//! store change and serves reload requests until cancelled.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use academia_core::{AnySource, DataSource, LoadOptions, StoreContext, load_all};

use crate::action::Action;

pub async fn spawn_data_bridge(
    ctx: Arc<StoreContext>,
    source: AnySource,
    options: LoadOptions,
    action_tx: mpsc::UnboundedSender<Action>,
    mut reload_rx: mpsc::UnboundedReceiver<()>,
    cancel: CancellationToken,
) {
    let _ = action_tx.send(Action::LoadStarted(source.describe()));
    let report = load_all(&ctx, &source, options, &cancel).await;
    if cancel.is_cancelled() {
        debug!("data bridge cancelled during startup load");
        return;
    }

    // Subscribe after the load so the initial snapshots go out exactly once,
    // ahead of the report that dismisses the loading screen.
    let mut enrollments = ctx.subscribe_enrollments();
    let mut faculties = ctx.subscribe_faculties();
    let mut academic_years = ctx.subscribe_academic_years();
    let mut courses = ctx.subscribe_courses();

    let _ = action_tx.send(Action::CoursesUpdated(courses.current().clone()));
    let _ = action_tx.send(Action::FacultiesUpdated(faculties.current().clone()));
    let _ = action_tx.send(Action::AcademicYearsUpdated(
        academic_years.current().clone(),
    ));
    let _ = action_tx.send(Action::EnrollmentsUpdated(enrollments.current().clone()));
    let _ = action_tx.send(Action::LoadFinished(Arc::new(report)));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(()) = reload_rx.recv() => {
                info!("reload requested");
                let _ = action_tx.send(Action::LoadStarted(source.describe()));
                let report = load_all(&ctx, &source, options, &cancel).await;
                let _ = action_tx.send(Action::LoadFinished(Arc::new(report)));
            }

            Some(snap) = courses.changed() => {
                let _ = action_tx.send(Action::CoursesUpdated(snap));
            }
            Some(snap) = faculties.changed() => {
                let _ = action_tx.send(Action::FacultiesUpdated(snap));
            }
            Some(snap) = academic_years.changed() => {
                let _ = action_tx.send(Action::AcademicYearsUpdated(snap));
            }
            Some(snap) = enrollments.changed() => {
                debug!(count = snap.len(), "dispatching EnrollmentsUpdated");
                let _ = action_tx.send(Action::EnrollmentsUpdated(snap));
            }
        }
    }

    debug!("data bridge shut down");
}

//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use academia_core::{AcademicYear, Course, Enrollment, Faculty, LoadReport};

use crate::i18n::Language;
use crate::screen::ScreenId;
use crate::widgets::multi_select::SelectionEvent;

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──
    Quit,
    Tick,
    Render,

    // ── Navigation ──
    SwitchScreen(ScreenId),
    ToggleHelp,

    // ── Store snapshots from the data bridge ──
    CoursesUpdated(Arc<Vec<Arc<Course>>>),
    FacultiesUpdated(Arc<Vec<Arc<Faculty>>>),
    AcademicYearsUpdated(Arc<Vec<Arc<AcademicYear>>>),
    EnrollmentsUpdated(Arc<Vec<Arc<Enrollment>>>),

    // ── Loading ──
    /// A load run started; carries the source description.
    LoadStarted(String),
    LoadFinished(Arc<LoadReport>),
    /// Ask the data bridge to load every store again.
    Reload,

    // ── Language ──
    OpenLanguageSelector,
    /// The user picked a language.
    SetLanguage(Language),
    /// Broadcast after the app switched language.
    LanguageChanged(Language),

    // ── Enrollment filters ──
    CourseFilter(SelectionEvent),
    FacultyFilter(SelectionEvent),
}

//! Enrollments screen: course and faculty filters over the enrollment table.
//!
//! The screen owns both selections; the multi-select controls only report
//! what the user asked for, and changes flow back in as
//! `Action::CourseFilter` / `Action::FacultyFilter`.

use std::cell::Cell as StdCell;
use std::collections::HashMap;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Cell, Paragraph, Row, Table, TableState},
};

use academia_core::Enrollment;

use crate::action::Action;
use crate::component::Component;
use crate::i18n::I18n;
use crate::theme;
use crate::widgets::multi_select::{
    self, InputOutcome, MultiSelect, MultiSelectProps, MultiSelectState, SelectOption,
};

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Courses,
    Faculties,
    Table,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Courses => Self::Faculties,
            Self::Faculties => Self::Table,
            Self::Table => Self::Courses,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Courses => Self::Table,
            Self::Faculties => Self::Courses,
            Self::Table => Self::Faculties,
        }
    }
}

/// Display strings for one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EnrollmentRow {
    student: String,
    course: String,
    title: String,
    faculty: String,
    year: String,
}

fn props<'a>(options: &'a [SelectOption], selected: &'a [String]) -> MultiSelectProps<'a> {
    MultiSelectProps {
        options,
        selected,
        placeholder: None,
    }
}

/// Course filter first, then faculty filter. An empty selection lets
/// everything through; an enrollment without a faculty never matches an
/// active faculty filter.
fn matches_filters(e: &Enrollment, courses: &[String], faculties: &[String]) -> bool {
    let course_ok = courses.is_empty() || multi_select::is_selected(courses, &e.course_id);
    let faculty_ok = faculties.is_empty()
        || e.faculty_id
            .as_deref()
            .is_some_and(|f| multi_select::is_selected(faculties, f));
    course_ok && faculty_ok
}

pub struct EnrollmentsScreen {
    focused: bool,
    i18n: I18n,
    focus: Focus,
    enrollments: Arc<Vec<Arc<Enrollment>>>,
    course_options: Vec<SelectOption>,
    faculty_options: Vec<SelectOption>,
    year_labels: HashMap<String, String>,
    course_selection: Vec<String>,
    faculty_selection: Vec<String>,
    course_select: MultiSelectState,
    faculty_select: MultiSelectState,
    table_state: TableState,
    table_area: StdCell<Rect>,
    cached_rows: Vec<EnrollmentRow>,
}

impl EnrollmentsScreen {
    pub fn new(i18n: I18n) -> Self {
        Self {
            focused: false,
            i18n,
            focus: Focus::default(),
            enrollments: Arc::new(Vec::new()),
            course_options: Vec::new(),
            faculty_options: Vec::new(),
            year_labels: HashMap::new(),
            course_selection: Vec::new(),
            faculty_selection: Vec::new(),
            course_select: MultiSelectState::new(),
            faculty_select: MultiSelectState::new(),
            table_state: TableState::default(),
            table_area: StdCell::new(Rect::default()),
            cached_rows: Vec::new(),
        }
    }

    fn recompute_filtered(&mut self) {
        let courses: HashMap<&str, &SelectOption> = self
            .course_options
            .iter()
            .map(|o| (o.id.as_str(), o))
            .collect();
        let faculties: HashMap<&str, &SelectOption> = self
            .faculty_options
            .iter()
            .map(|o| (o.id.as_str(), o))
            .collect();

        self.cached_rows = self
            .enrollments
            .iter()
            .filter(|e| matches_filters(e, &self.course_selection, &self.faculty_selection))
            .map(|e| {
                let course = courses.get(e.course_id.as_str());
                EnrollmentRow {
                    student: e.student_name.clone(),
                    course: course.map_or_else(|| e.course_id.clone(), |c| c.code.clone()),
                    title: course.map_or_else(String::new, |c| c.title.clone()),
                    faculty: e
                        .faculty_id
                        .as_deref()
                        .map_or("─", |id| faculties.get(id).map_or(id, |f| f.code.as_str()))
                        .to_owned(),
                    year: self
                        .year_labels
                        .get(&e.academic_year_id)
                        .cloned()
                        .unwrap_or_else(|| e.academic_year_id.clone()),
                }
            })
            .collect();

        let len = self.cached_rows.len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.cached_rows.len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.table_state.select(Some(next));
    }

    fn set_focus(&mut self, focus: Focus) {
        if focus != Focus::Courses {
            self.course_select.blur();
        }
        if focus != Focus::Faculties {
            self.faculty_select.blur();
        }
        self.focus = focus;
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(10),
            KeyCode::PageUp => self.move_selection(-10),
            KeyCode::Char('g') | KeyCode::Home => self.move_selection(isize::MIN),
            KeyCode::Char('G') | KeyCode::End => self.move_selection(isize::MAX),
            _ => {}
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            " {} ({}/{}) ",
            self.i18n.t("screen.enrollments"),
            self.cached_rows.len(),
            self.enrollments.len()
        );
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(if self.focused && self.focus == Focus::Table {
                theme::border_focused()
            } else {
                theme::border_default()
            })
            .title(Span::styled(title, theme::title_style()));

        if self.cached_rows.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!(" {}", self.i18n.t("table.empty")),
                    theme::muted(),
                )),
                inner,
            );
            return;
        }

        let header = Row::new(
            [
                "table.student",
                "table.course",
                "table.title",
                "table.faculty",
                "table.year",
            ]
            .map(|k| Cell::from(self.i18n.t(k))),
        )
        .style(theme::table_header());

        let rows: Vec<Row> = self
            .cached_rows
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.student.as_str()),
                    Cell::from(r.course.as_str()).style(theme::code()),
                    Cell::from(r.title.as_str()),
                    Cell::from(r.faculty.as_str()).style(theme::faculty()),
                    Cell::from(r.year.as_str()).style(theme::muted()),
                ])
                .style(theme::text())
            })
            .collect();

        let widths = [
            Constraint::Fill(2),
            Constraint::Length(8),
            Constraint::Fill(3),
            Constraint::Length(8),
            Constraint::Length(10),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(theme::row_highlight());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = Line::from(vec![
            Span::styled(" Tab ", theme::key_hint_key()),
            Span::styled(self.i18n.t("help.focus"), theme::key_hint()),
            Span::styled("  Enter ", theme::key_hint_key()),
            Span::styled(self.i18n.t("help.open"), theme::key_hint()),
            Span::styled("  ←/→ ⌫ ", theme::key_hint_key()),
            Span::styled(self.i18n.t("help.badges"), theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), area);
    }
}

impl Component for EnrollmentsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let outcome = match self.focus {
            Focus::Courses => self
                .course_select
                .handle_key(key, props(&self.course_options, &self.course_selection)),
            Focus::Faculties => self
                .faculty_select
                .handle_key(key, props(&self.faculty_options, &self.faculty_selection)),
            Focus::Table => InputOutcome::Ignored,
        };

        match (outcome, self.focus) {
            (InputOutcome::Changed(event), Focus::Courses) => {
                return Ok(Some(Action::CourseFilter(event)));
            }
            (InputOutcome::Changed(event), Focus::Faculties) => {
                return Ok(Some(Action::FacultyFilter(event)));
            }
            (InputOutcome::Handled | InputOutcome::Changed(_), _) => return Ok(None),
            (InputOutcome::Ignored, _) => {}
        }

        match key.code {
            KeyCode::Tab => self.set_focus(self.focus.next()),
            KeyCode::BackTab => self.set_focus(self.focus.prev()),
            _ if self.focus == Focus::Table => self.handle_table_key(key),
            _ => {}
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match self
            .course_select
            .handle_mouse(mouse, props(&self.course_options, &self.course_selection))
        {
            InputOutcome::Changed(event) => {
                self.set_focus(Focus::Courses);
                return Ok(Some(Action::CourseFilter(event)));
            }
            InputOutcome::Handled => {
                self.set_focus(Focus::Courses);
                return Ok(None);
            }
            InputOutcome::Ignored => {}
        }

        match self
            .faculty_select
            .handle_mouse(mouse, props(&self.faculty_options, &self.faculty_selection))
        {
            InputOutcome::Changed(event) => {
                self.set_focus(Focus::Faculties);
                return Ok(Some(Action::FacultyFilter(event)));
            }
            InputOutcome::Handled => {
                self.set_focus(Focus::Faculties);
                return Ok(None);
            }
            InputOutcome::Ignored => {}
        }

        if mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && self
                .table_area
                .get()
                .contains(Position::new(mouse.column, mouse.row))
        {
            self.set_focus(Focus::Table);
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::CoursesUpdated(courses) => {
                self.course_options = courses
                    .iter()
                    .map(|c| SelectOption::from(&**c))
                    .collect();
            }
            Action::FacultiesUpdated(faculties) => {
                self.faculty_options = faculties
                    .iter()
                    .map(|f| SelectOption::from(&**f))
                    .collect();
            }
            Action::AcademicYearsUpdated(years) => {
                self.year_labels = years
                    .iter()
                    .map(|y| (y.id.clone(), y.label.clone()))
                    .collect();
            }
            Action::EnrollmentsUpdated(enrollments) => {
                self.enrollments = Arc::clone(enrollments);
            }
            Action::CourseFilter(event) => event.apply(&mut self.course_selection),
            Action::FacultyFilter(event) => event.apply(&mut self.faculty_selection),
            Action::LanguageChanged(language) => {
                self.i18n = I18n::new(*language);
                return Ok(None);
            }
            _ => return Ok(None),
        }
        self.recompute_filtered();
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [filters_area, table_area, hints_area] = Layout::vertical([
            Constraint::Length(multi_select::HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);
        let [course_area, faculty_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
                .spacing(1)
                .areas(filters_area);

        let courses = MultiSelect::new(
            props(&self.course_options, &self.course_selection),
            &self.course_select,
            self.i18n,
        )
        .title(self.i18n.t("filter.courses"))
        .focused(self.focused && self.focus == Focus::Courses);
        let faculties = MultiSelect::new(
            props(&self.faculty_options, &self.faculty_selection),
            &self.faculty_select,
            self.i18n,
        )
        .title(self.i18n.t("filter.faculties"))
        .focused(self.focused && self.focus == Focus::Faculties);

        let course_overlay = courses.overlay();
        let faculty_overlay = faculties.overlay();
        frame.render_widget(courses, course_area);
        frame.render_widget(faculties, faculty_area);

        self.table_area.set(table_area);
        self.render_table(frame, table_area);
        self.render_hints(frame, hints_area);

        // Overlays float over the table, so they go last.
        frame.render_widget(course_overlay, area);
        frame.render_widget(faculty_overlay, area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.course_select.blur();
            self.faculty_select.blur();
        }
    }

    fn captures_input(&self) -> bool {
        self.course_select.is_open() || self.faculty_select.is_open()
    }
}

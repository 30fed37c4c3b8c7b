//! Overview screen: store counts, current academic year, last load.

use std::sync::Arc;

use chrono::Local;
use color_eyre::eyre::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use academia_core::{AcademicYear, LoadReport, LoadStatus, SourceOutcome, StoreKind};

use crate::action::Action;
use crate::component::Component;
use crate::i18n::I18n;
use crate::theme;

pub(crate) fn store_key(kind: StoreKind) -> &'static str {
    match kind {
        StoreKind::Enrollments => "store.enrollments",
        StoreKind::Faculties => "store.faculties",
        StoreKind::AcademicYears => "store.academic-years",
        StoreKind::Courses => "store.courses",
    }
}

pub(crate) fn status_key(status: LoadStatus) -> &'static str {
    match status {
        LoadStatus::Complete => "load.complete",
        LoadStatus::Partial => "load.partial",
        LoadStatus::Failed => "load.failed",
        LoadStatus::Cancelled => "load.cancelled",
    }
}

pub struct OverviewScreen {
    focused: bool,
    i18n: I18n,
    counts: [usize; 4],
    years: Arc<Vec<Arc<AcademicYear>>>,
    report: Option<Arc<LoadReport>>,
}

impl OverviewScreen {
    pub fn new(i18n: I18n) -> Self {
        Self {
            focused: false,
            i18n,
            counts: [0; 4],
            years: Arc::new(Vec::new()),
            report: None,
        }
    }

    fn set_count(&mut self, kind: StoreKind, count: usize) {
        if let Some(i) = StoreKind::ALL.iter().position(|k| *k == kind) {
            self.counts[i] = count;
        }
    }

    fn count_lines(&self) -> Vec<Line<'static>> {
        StoreKind::ALL
            .iter()
            .zip(self.counts)
            .map(|(kind, count)| {
                let outcome = self.report.as_ref().and_then(|r| r.outcome(*kind));
                let (marker, marker_style, note) = match outcome {
                    Some(SourceOutcome::Failed { .. }) => (
                        "✗",
                        Style::default().fg(theme::RED),
                        self.i18n.t("overview.failed"),
                    ),
                    Some(SourceOutcome::Cancelled { .. }) => (
                        "–",
                        Style::default().fg(theme::AMBER),
                        self.i18n.t("overview.cancelled"),
                    ),
                    Some(SourceOutcome::Loaded { .. }) => {
                        ("✓", Style::default().fg(theme::GREEN), "")
                    }
                    None => (" ", theme::muted(), ""),
                };
                Line::from(vec![
                    Span::styled(format!("  {marker} "), marker_style),
                    Span::styled(format!("{:<20}", self.i18n.t(store_key(*kind))), theme::text()),
                    Span::styled(
                        format!("{count:>6}"),
                        Style::default()
                            .fg(theme::TEAL)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        if note.is_empty() {
                            String::new()
                        } else {
                            format!("  ({note})")
                        },
                        theme::muted(),
                    ),
                ])
            })
            .collect()
    }

    fn load_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let Some(report) = &self.report else {
            lines.push(Line::from(Span::styled(
                format!("  {}", self.i18n.t("overview.none")),
                theme::muted(),
            )));
            return lines;
        };

        let finished = report.finished_at().with_timezone(&Local);
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", self.i18n.t(status_key(report.status()))), theme::text()),
            Span::styled(
                format!("  {}", finished.format("%Y-%m-%d %H:%M:%S")),
                theme::muted(),
            ),
        ]));
        for (kind, error) in report.failures() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  ✗ {}: ", self.i18n.t(store_key(kind))),
                    Style::default().fg(theme::RED),
                ),
                Span::styled(error.to_string(), theme::muted()),
            ]));
        }
        lines
    }
}

impl Component for OverviewScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::EnrollmentsUpdated(v) => self.set_count(StoreKind::Enrollments, v.len()),
            Action::FacultiesUpdated(v) => self.set_count(StoreKind::Faculties, v.len()),
            Action::CoursesUpdated(v) => self.set_count(StoreKind::Courses, v.len()),
            Action::AcademicYearsUpdated(years) => {
                self.set_count(StoreKind::AcademicYears, years.len());
                self.years = Arc::clone(years);
            }
            Action::LoadFinished(report) => self.report = Some(Arc::clone(report)),
            Action::LanguageChanged(language) => self.i18n = I18n::new(*language),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            })
            .title(Span::styled(
                format!(" {} ", self.i18n.t("screen.overview")),
                theme::title_style(),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [counts_area, year_area, load_area] = Layout::vertical([
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(2),
        ])
        .areas(inner);

        let mut counts = vec![Line::from(Span::styled(
            format!(" {}", self.i18n.t("overview.counts")),
            theme::table_header(),
        ))];
        counts.extend(self.count_lines());
        frame.render_widget(Paragraph::new(counts), counts_area);

        let current = AcademicYear::current_of(&self.years)
            .map_or_else(|| self.i18n.t("overview.none").to_owned(), |y| y.label.clone());
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    format!(" {}", self.i18n.t("overview.current_year")),
                    theme::table_header(),
                )),
                Line::from(Span::styled(format!("  {current}"), theme::text())),
            ]),
            year_area,
        );

        let mut load = vec![Line::from(Span::styled(
            format!(" {}", self.i18n.t("overview.last_load")),
            theme::table_header(),
        ))];
        load.extend(self.load_lines());
        frame.render_widget(Paragraph::new(load), load_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use tokio_util::sync::CancellationToken;

    use academia_core::{LoadOptions, StaticSource, StoreContext, load_all};

    use super::*;
    use crate::i18n::Language;

    fn screen_text(screen: &OverviewScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 18)).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_overview_says_none() {
        let screen = OverviewScreen::new(I18n::default());
        let text = screen_text(&screen);
        assert!(text.contains("Current academic year"));
        assert!(text.contains("none"));
    }

    #[tokio::test]
    async fn shows_counts_and_failures_from_report() {
        let ctx = StoreContext::new();
        let source = StaticSource::demo().failing(StoreKind::Faculties);
        let cancel = CancellationToken::new();
        let report = load_all(&ctx, &source, LoadOptions::default(), &cancel).await;

        let mut screen = OverviewScreen::new(I18n::default());
        screen
            .update(&Action::CoursesUpdated(ctx.courses_snapshot()))
            .unwrap();
        screen
            .update(&Action::AcademicYearsUpdated(ctx.academic_years_snapshot()))
            .unwrap();
        screen
            .update(&Action::LoadFinished(Arc::new(report)))
            .unwrap();

        let text = screen_text(&screen);
        assert!(text.contains("partially loaded"), "{text}");
        assert!(text.contains("(failed)"), "{text}");
        assert!(text.contains("Simulated failure"), "{text}");

        let current = AcademicYear::current_of(&ctx.academic_years_snapshot())
            .unwrap()
            .label
            .clone();
        assert!(text.contains(&current), "{text}");
    }

    #[test]
    fn follows_language_changes() {
        let mut screen = OverviewScreen::new(I18n::default());
        screen
            .update(&Action::LanguageChanged(Language::Es))
            .unwrap();
        assert!(screen_text(&screen).contains("Curso académico actual"));
    }
}

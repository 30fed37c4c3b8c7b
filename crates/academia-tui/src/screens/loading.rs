//! Startup screen: a throbber until the first load report arrives.

use color_eyre::eyre::Result;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Paragraph},
};
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::action::Action;
use crate::component::Component;
use crate::i18n::I18n;
use crate::theme;

pub struct LoadingScreen {
    i18n: I18n,
    source: Option<String>,
    throbber_state: ThrobberState,
}

impl LoadingScreen {
    pub fn new(i18n: I18n) -> Self {
        Self {
            i18n,
            source: None,
            throbber_state: ThrobberState::default(),
        }
    }
}

impl Component for LoadingScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.throbber_state.calc_next(),
            Action::LoadStarted(source) => self.source = Some(source.clone()),
            Action::LanguageChanged(language) => self.i18n = I18n::new(*language),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Block::default().style(theme::overlay_bg()), area);

        let label = format!("  {}", self.i18n.t("loading.message"));
        let width = u16::try_from(label.chars().count() + 2).unwrap_or(u16::MAX);
        let [column] = Layout::horizontal([Constraint::Length(width.max(30))])
            .flex(Flex::Center)
            .areas(area);
        let [throbber_area, source_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(2)])
                .flex(Flex::Center)
                .areas(column);

        let throbber = Throbber::default()
            .label(label)
            .style(Style::default().fg(theme::TEAL))
            .throbber_style(Style::default().fg(theme::VIOLET));
        frame.render_stateful_widget(throbber, throbber_area, &mut self.throbber_state.clone());

        if let Some(source) = &self.source {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("{}: {source}", self.i18n.t("loading.source")),
                    theme::muted(),
                ))
                .alignment(Alignment::Center),
                Rect {
                    x: area.x,
                    width: area.width,
                    ..source_area
                },
            );
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::i18n::Language;

    fn rendered(screen: &LoadingScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
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
    fn shows_label_and_source() {
        let mut screen = LoadingScreen::new(I18n::default());
        assert!(rendered(&screen).contains("Loading data…"));
        assert!(!rendered(&screen).contains("Source:"));

        screen
            .update(&Action::LoadStarted("demo catalog".into()))
            .unwrap();
        assert!(rendered(&screen).contains("Source: demo catalog"));
    }

    #[test]
    fn follows_language_changes() {
        let mut screen = LoadingScreen::new(I18n::default());
        screen
            .update(&Action::LoadStarted("demo catalog".into()))
            .unwrap();
        screen
            .update(&Action::LanguageChanged(Language::Es))
            .unwrap();

        let text = rendered(&screen);
        assert!(text.contains("Cargando datos…"));
        assert!(text.contains("Origen: demo catalog"));
    }

    #[test]
    fn tick_advances_the_throbber() {
        let mut screen = LoadingScreen::new(I18n::default());
        let before = rendered(&screen);

        screen.update(&Action::Tick).unwrap();

        assert_ne!(rendered(&screen), before);
    }
}
